//! Application state for the HTTP server.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AnalyticsConfig;
use crate::core::domain::Dataset;
use crate::pipeline::VideoMetricsPipeline;

/// Identifier handed out for every stored dataset.
pub type DatasetId = Uuid;

/// In-memory registry of ingested datasets.
///
/// Datasets are immutable once stored; handlers clone the `Arc` and release
/// the lock before running any analysis. At most `capacity` datasets are
/// kept: inserting beyond that evicts the oldest one.
#[derive(Debug)]
pub struct DatasetStore {
    inner: RwLock<StoreInner>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct StoreInner {
    datasets: HashMap<DatasetId, Arc<Dataset>>,
    /// Insertion order, oldest first.
    order: VecDeque<DatasetId>,
}

impl DatasetStore {
    /// Store holding at most `capacity` datasets (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store a dataset under a fresh id, evicting the oldest when full.
    pub fn insert(&self, dataset: Dataset) -> DatasetId {
        let id = Uuid::new_v4();
        let mut inner = self.inner.write();
        while inner.datasets.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.datasets.remove(&oldest);
            tracing::info!("Evicted dataset {} (store capacity {})", oldest, self.capacity);
        }
        inner.datasets.insert(id, Arc::new(dataset));
        inner.order.push_back(id);
        id
    }

    pub fn get(&self, id: &DatasetId) -> Option<Arc<Dataset>> {
        self.inner.read().datasets.get(id).cloned()
    }

    /// Drop a dataset; `false` if the id was unknown.
    pub fn remove(&self, id: &DatasetId) -> bool {
        let mut inner = self.inner.write();
        if inner.datasets.remove(id).is_none() {
            return false;
        }
        inner.order.retain(|stored| stored != id);
        true
    }

    pub fn len(&self) -> usize {
        self.inner.read().datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().datasets.is_empty()
    }
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub pipeline: VideoMetricsPipeline,
    pub config: Arc<AnalyticsConfig>,
}

impl AppState {
    /// Create a new application state with an empty store.
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            store: Arc::new(DatasetStore::new(config.server.max_datasets)),
            pipeline: VideoMetricsPipeline::with_config(config.pipeline_config()),
            config: Arc::new(config),
        }
    }
}
