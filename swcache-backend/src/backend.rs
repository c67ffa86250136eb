use std::sync::Arc;

use async_trait::async_trait;
use smol_str::SmolStr;
use swcache_core::{Request, Response};

use crate::{BackendError, DeleteStatus};

pub type BackendResult<T> = Result<T, BackendError>;

/// Shared handle to an open partition.
pub type SharedPartition = Arc<dyn Partition>;

/// Shared handle to a cache storage.
pub type SharedStorage = Arc<dyn CacheStorage>;

/// One named cache partition.
///
/// Entries are addressed by request identity (method, URL without fragment,
/// and any headers the stored response varies on). Writes to the same
/// identity overwrite; the last writer wins. Entries never expire on their
/// own.
#[async_trait]
pub trait Partition: Send + Sync {
    /// Name this partition was opened under.
    fn name(&self) -> &str;

    /// Returns the stored response matching `request`, if any.
    async fn match_request(&self, request: &Request) -> BackendResult<Option<Response>>;

    /// Stores `response` for `request`, replacing any previous entry.
    ///
    /// Fails with [`BackendError::UnsupportedMethod`] for anything but `GET`.
    async fn put(&self, request: &Request, response: Response) -> BackendResult<()>;

    /// Removes the entry for `request`.
    async fn delete(&self, request: &Request) -> BackendResult<DeleteStatus>;

    /// Number of stored entries.
    async fn len(&self) -> BackendResult<usize>;

    /// `true` when the partition holds no entries.
    async fn is_empty(&self) -> BackendResult<bool> {
        Ok(self.len().await? == 0)
    }
}

/// Registry of named partitions.
///
/// Opening a name that does not exist yet creates it. Deleting a partition
/// drops every entry it holds.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Opens the partition called `name`, creating it when missing.
    async fn open(&self, name: &str) -> BackendResult<SharedPartition>;

    /// Whether a partition called `name` exists.
    async fn has(&self, name: &str) -> BackendResult<bool>;

    /// Names of all existing partitions, sorted.
    async fn keys(&self) -> BackendResult<Vec<SmolStr>>;

    /// Deletes the partition called `name`.
    async fn delete(&self, name: &str) -> BackendResult<DeleteStatus>;

    /// Returns the name of this storage for logging.
    fn label(&self) -> &str {
        "storage"
    }
}

#[async_trait]
impl<S> CacheStorage for Arc<S>
where
    S: CacheStorage + ?Sized,
{
    async fn open(&self, name: &str) -> BackendResult<SharedPartition> {
        (**self).open(name).await
    }

    async fn has(&self, name: &str) -> BackendResult<bool> {
        (**self).has(name).await
    }

    async fn keys(&self) -> BackendResult<Vec<SmolStr>> {
        (**self).keys().await
    }

    async fn delete(&self, name: &str) -> BackendResult<DeleteStatus> {
        (**self).delete(name).await
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

#[async_trait]
impl CacheStorage for Box<dyn CacheStorage> {
    async fn open(&self, name: &str) -> BackendResult<SharedPartition> {
        (**self).open(name).await
    }

    async fn has(&self, name: &str) -> BackendResult<bool> {
        (**self).has(name).await
    }

    async fn keys(&self) -> BackendResult<Vec<SmolStr>> {
        (**self).keys().await
    }

    async fn delete(&self, name: &str) -> BackendResult<DeleteStatus> {
        (**self).delete(name).await
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}
