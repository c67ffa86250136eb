//! Moka storage implementation.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use smol_str::SmolStr;
use swcache_backend::{BackendResult, CacheStorage, DeleteStatus, SharedPartition};
use tracing::debug;

use crate::builder::{MokaStorageBuilder, NoCapacity, PartitionSettings};
use crate::partition::MokaPartition;

/// In-memory cache storage powered by Moka.
///
/// `MokaStorage` keeps a registry of named partitions in a [`DashMap`]; each
/// partition is an independent moka async cache created lazily on first
/// [`open`](CacheStorage::open).
///
/// # Examples
///
/// ```
/// use swcache_moka::MokaStorage;
///
/// let storage = MokaStorage::builder().unbounded().build();
/// ```
///
/// # Caveats
///
/// - Data is **not persisted** — storage is lost on process restart
/// - Deleting a partition clears it; handles opened before the delete keep
///   working but are detached from the registry
#[derive(Clone)]
pub struct MokaStorage {
    label: SmolStr,
    settings: PartitionSettings,
    partitions: Arc<DashMap<SmolStr, Arc<MokaPartition>>>,
}

impl std::fmt::Debug for MokaStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaStorage")
            .field("label", &self.label)
            .field("partitions", &self.partitions.len())
            .finish()
    }
}

impl MokaStorage {
    /// Creates a new builder for `MokaStorage`.
    pub fn builder() -> MokaStorageBuilder<NoCapacity> {
        MokaStorageBuilder::new()
    }

    pub(crate) fn new(label: SmolStr, settings: PartitionSettings) -> Self {
        Self {
            label,
            settings,
            partitions: Arc::new(DashMap::new()),
        }
    }
}

#[async_trait]
impl CacheStorage for MokaStorage {
    async fn open(&self, name: &str) -> BackendResult<SharedPartition> {
        let partition: SharedPartition = self
            .partitions
            .entry(SmolStr::new(name))
            .or_insert_with(|| {
                debug!(storage = %self.label, partition = name, "creating partition");
                Arc::new(self.settings.create(SmolStr::new(name)))
            })
            .value()
            .clone();
        Ok(partition)
    }

    async fn has(&self, name: &str) -> BackendResult<bool> {
        Ok(self.partitions.contains_key(name))
    }

    async fn keys(&self) -> BackendResult<Vec<SmolStr>> {
        let mut names: Vec<SmolStr> = self
            .partitions
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> BackendResult<DeleteStatus> {
        match self.partitions.remove(name) {
            Some((_, partition)) => {
                partition.clear();
                debug!(storage = %self.label, partition = name, "deleted partition");
                Ok(DeleteStatus::Deleted(1))
            }
            None => Ok(DeleteStatus::Missing),
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}
