//! A single moka-backed partition.

use async_trait::async_trait;
use moka::future::Cache;
use smol_str::SmolStr;
use swcache_backend::{BackendError, BackendResult, DeleteStatus, Partition};
use swcache_core::{Request, RequestKey, Response, VaryHeaders};
use tracing::trace;

/// A stored response together with the request headers it varies on.
#[derive(Debug, Clone)]
pub(crate) struct StoredEntry {
    pub(crate) vary: VaryHeaders,
    pub(crate) response: Response,
}

/// One named partition held in memory.
///
/// Cloning is cheap: clones share the same underlying moka cache.
#[derive(Clone)]
pub struct MokaPartition {
    name: SmolStr,
    cache: Cache<RequestKey, StoredEntry>,
}

impl std::fmt::Debug for MokaPartition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaPartition")
            .field("name", &self.name)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl MokaPartition {
    pub(crate) fn new(name: SmolStr, cache: Cache<RequestKey, StoredEntry>) -> Self {
        Self { name, cache }
    }

    /// Drops every entry.
    pub(crate) fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl Partition for MokaPartition {
    fn name(&self) -> &str {
        &self.name
    }

    async fn match_request(&self, request: &Request) -> BackendResult<Option<Response>> {
        let key = RequestKey::from_request(request);
        let entry = self
            .cache
            .get(&key)
            .await
            .filter(|entry| entry.vary.matches(request));
        trace!(partition = %self.name, %key, hit = entry.is_some(), "match");
        Ok(entry.map(|entry| entry.response))
    }

    async fn put(&self, request: &Request, response: Response) -> BackendResult<()> {
        if *request.method() != http::Method::GET {
            return Err(BackendError::UnsupportedMethod(request.method().clone()));
        }
        let key = RequestKey::from_request(request);
        let vary = VaryHeaders::capture(request, &response);
        trace!(partition = %self.name, %key, "put");
        self.cache.insert(key, StoredEntry { vary, response }).await;
        Ok(())
    }

    async fn delete(&self, request: &Request) -> BackendResult<DeleteStatus> {
        let key = RequestKey::from_request(request);
        match self.cache.remove(&key).await {
            Some(_) => Ok(DeleteStatus::Deleted(1)),
            None => Ok(DeleteStatus::Missing),
        }
    }

    async fn len(&self) -> BackendResult<usize> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }
}
