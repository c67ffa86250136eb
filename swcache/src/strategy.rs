//! Caching strategies.
//!
//! Both strategies work against one named partition of the injected
//! [`CacheStorage`] and reach the origin through the injected [`Network`].

use std::sync::Arc;

use swcache_backend::{CacheStorage, SharedPartition};
use swcache_core::{Network, Request, RequestKey, Response};
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::metrics;
use crate::offload::OffloadManager;

/// The cache-first and stale-while-revalidate algorithms.
pub struct Strategies<S, N> {
    storage: Arc<S>,
    network: Arc<N>,
    offload: OffloadManager,
}

impl<S, N> Clone for Strategies<S, N> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            network: Arc::clone(&self.network),
            offload: self.offload.clone(),
        }
    }
}

impl<S, N> std::fmt::Debug for Strategies<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategies")
            .field("offload", &self.offload)
            .finish_non_exhaustive()
    }
}

impl<S, N> Strategies<S, N>
where
    S: CacheStorage + 'static,
    N: Network + 'static,
{
    /// Creates strategies over `storage` and `network`.
    pub fn new(storage: Arc<S>, network: Arc<N>, offload: OffloadManager) -> Self {
        Self {
            storage,
            network,
            offload,
        }
    }

    /// Manager running background refreshes.
    pub fn offload(&self) -> &OffloadManager {
        &self.offload
    }

    /// Serves from `partition` when possible, otherwise from the network.
    ///
    /// A successful (`2xx`) network response is stored before this returns,
    /// so an immediately following lookup hits. Other statuses are returned
    /// without being stored. A network failure is returned as
    /// [`CacheError::Fetch`]; there is no fallback at this level.
    pub async fn cache_first(
        &self,
        request: &Request,
        partition: &str,
    ) -> Result<Response, CacheError> {
        let cache = self.storage.open(partition).await?;
        if let Some(cached) = cache.match_request(request).await? {
            debug!(%partition, url = %request.url(), "cache hit");
            metrics::record_hit(partition);
            return Ok(cached);
        }

        debug!(%partition, url = %request.url(), "cache miss");
        metrics::record_miss(partition);
        let response = self.network.fetch(request).await?;
        if response.ok() {
            store(&cache, request, response.clone()).await;
        }
        Ok(response)
    }

    /// Serves the cached entry at once and refreshes it in the background.
    ///
    /// Without a cached entry the network result is awaited instead. Returns
    /// `Ok(None)` when there is neither a cached entry nor a network
    /// response; network failures never surface as errors here.
    pub async fn stale_while_revalidate(
        &self,
        request: &Request,
        partition: &str,
    ) -> Result<Option<Response>, CacheError> {
        let cache = self.storage.open(partition).await?;
        let cached = cache.match_request(request).await?;

        match cached {
            Some(cached) => {
                debug!(%partition, url = %request.url(), "serving cached entry, refreshing");
                metrics::record_hit(partition);
                let key = RequestKey::from_request(request);
                let network = Arc::clone(&self.network);
                let request = request.clone();
                self.offload.spawn_with_key(
                    key,
                    async move {
                        let refreshed = refresh(&cache, network.as_ref(), &request).await;
                        debug!(
                            url = %request.url(),
                            refreshed = refreshed.is_some(),
                            "revalidation completed"
                        );
                    },
                );
                Ok(Some(cached))
            }
            None => {
                metrics::record_miss(partition);
                Ok(refresh(&cache, self.network.as_ref(), request).await)
            }
        }
    }
}

/// Fetches `request` and stores a successful response into `cache`.
///
/// Any response the network produced is returned, stored or not.
async fn refresh<N>(cache: &SharedPartition, network: &N, request: &Request) -> Option<Response>
where
    N: Network + ?Sized,
{
    match network.fetch(request).await {
        Ok(response) => {
            if response.ok() {
                store(cache, request, response.clone()).await;
            }
            Some(response)
        }
        Err(err) => {
            debug!(url = %request.url(), error = %err, "revalidation fetch failed");
            None
        }
    }
}

async fn store(cache: &SharedPartition, request: &Request, response: Response) {
    if let Err(err) = cache.put(request, response).await {
        warn!(
            partition = cache.name(),
            url = %request.url(),
            error = %err,
            "failed to store response"
        );
    }
}
