//! Day-of-week by hour-of-day activity pivot.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::core::domain::{DayOfWeek, FilteredView};

/// Mean views for one day across every hour column of the pivot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub day: DayOfWeek,
    /// Aligned with [`ActivityPivot::hours`]
    pub mean_views: Vec<f64>,
}

/// Dense grid of mean views per (day, hour).
///
/// Rows always cover Monday through Sunday in that order. Columns are the
/// hours that occur in the data, ascending. Cells without data hold `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPivot {
    pub hours: Vec<u32>,
    pub rows: Vec<PivotRow>,
}

impl ActivityPivot {
    /// Mean views for a cell, `None` if the hour is not a column.
    pub fn get(&self, day: DayOfWeek, hour: u32) -> Option<f64> {
        let column = self.hours.iter().position(|h| *h == hour)?;
        self.rows
            .get(day.index())
            .and_then(|row| row.mean_views.get(column))
            .copied()
    }

    /// `true` when no record contributed to the grid.
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

/// Average views per (day, hour) over records with derived time features.
///
/// Sums are accumulated as integers, so the result does not depend on the
/// order of the records.
///
/// ```
/// use yt_analytics::core::domain::{DayOfWeek, FilteredView};
/// use yt_analytics::services::heatmap::build_activity_pivot;
///
/// let pivot = build_activity_pivot(&FilteredView::default());
/// assert_eq!(pivot.rows.len(), 7);
/// assert_eq!(pivot.rows[0].day, DayOfWeek::Monday);
/// assert!(pivot.is_empty());
/// ```
pub fn build_activity_pivot(view: &FilteredView) -> ActivityPivot {
    let mut cells: HashMap<(DayOfWeek, u32), (u128, u64)> = HashMap::new();
    let mut hours = BTreeSet::new();

    for record in view.iter() {
        let (Some(day), Some(hour)) = (record.day_of_week, record.hour_of_day) else {
            continue;
        };
        let cell = cells.entry((day, hour)).or_insert((0, 0));
        cell.0 += u128::from(record.views);
        cell.1 += 1;
        hours.insert(hour);
    }

    let hours: Vec<u32> = hours.into_iter().collect();
    let rows = DayOfWeek::ALL
        .iter()
        .map(|&day| PivotRow {
            day,
            mean_views: hours
                .iter()
                .map(|&hour| match cells.get(&(day, hour)) {
                    Some((sum, count)) if *count > 0 => *sum as f64 / *count as f64,
                    _ => 0.0,
                })
                .collect(),
        })
        .collect();

    ActivityPivot { hours, rows }
}
