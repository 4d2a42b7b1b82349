//! Command-line video performance report.
//!
//! Loads a CSV/JSON file (or generates seeded demo data), prints the
//! engagement summary, top videos and the weekday/hour activity grid, and
//! writes the filtered view to CSV.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yt_analytics::config::AnalyticsConfig;
use yt_analytics::io::demo::generate_demo_table;
use yt_analytics::io::loaders::VideoLoader;
use yt_analytics::pipeline::{AnalysisReport, ReportStatus, VideoMetricsPipeline};
use yt_analytics::transformations::FilterCriteria;

/// Video performance report
#[derive(Parser, Debug)]
#[command(name = "yt-report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Engagement, activity heatmap and top videos for a video dataset")]
struct Cli {
    /// CSV or JSON file with title, views, comments, likes, date, content_type
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// First day to include (YYYY-MM-DD, default: earliest date in data)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day to include, whole day (YYYY-MM-DD, default: latest date in data)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Restrict to one content type ("all" or empty for no restriction)
    #[arg(long)]
    content_type: Option<String>,

    /// Number of videos in the ranking
    #[arg(long)]
    top: Option<usize>,

    /// Where to write the CSV export
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (default: analytics.toml search path)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for demo data when no input is given
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalyticsConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyticsConfig::load_or_default()?,
    };

    let outcome = match &cli.input {
        Some(path) => VideoLoader::load_from_file(path)?,
        None => {
            let mut demo = config.demo_config();
            if let Some(seed) = cli.seed {
                demo.seed = seed;
            }
            info!("No input given; generating {} demo videos (seed {})", demo.size, demo.seed);
            VideoMetricsPipeline::ingest(generate_demo_table(&demo))?
        }
    };
    for warning in outcome.warnings.iter().take(5) {
        warn!("{}", warning);
    }

    let dataset = outcome.dataset;
    let criteria =
        FilterCriteria::resolve(&dataset, cli.start, cli.end, cli.content_type.as_deref());
    let pipeline = VideoMetricsPipeline::with_config(config.pipeline_config());
    let top_n = cli.top.unwrap_or(config.analysis.top_n);
    let report = pipeline.analyze_top(&dataset, &criteria, top_n);

    print_report(&report);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export.filename));
    let bytes = pipeline.export(&dataset, &criteria)?;
    fs::write(&output, bytes).with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {}", output.display());

    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let criteria = &report.criteria;
    println!(
        "Videos {} to {} ({})",
        criteria.start_date,
        criteria.end_date,
        criteria.content_type.as_deref().unwrap_or("all types")
    );

    if report.status == ReportStatus::NoData {
        println!("No videos match the selected filters.");
        return;
    }

    println!("Total videos: {}", report.video_count);
    match report.mean_engagement_rate {
        Some(rate) => println!("Avg engagement rate: {:.2}%", rate),
        None => println!("Avg engagement rate: n/a"),
    }

    println!();
    println!("Top {} videos by engagement", report.top.len());
    for (rank, video) in report.top.iter().enumerate() {
        let rate = video
            .engagement_rate
            .map(|r| format!("{:.2}%", r))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{:>3}. {:<30} {:<10} {:>10} views {:>8}",
            rank + 1,
            video.title,
            video.content_type,
            video.views,
            rate
        );
    }

    println!();
    println!("Mean views by weekday and hour");
    let header: String = report.pivot.hours.iter().map(|h| format!("{:>8}", h)).collect();
    println!("{:<10}{}", "", header);
    for row in &report.pivot.rows {
        let cells: String = row.mean_views.iter().map(|v| format!("{:>8.0}", v)).collect();
        println!("{:<10}{}", row.day.name(), cells);
    }
}
