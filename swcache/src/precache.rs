//! Atomic population of the CORE partition at install time.

use futures::future::try_join_all;
use swcache_backend::CacheStorage;
use swcache_core::{Network, Request};
use tracing::debug;
use url::Url;

use crate::error::PrecacheError;

/// Fetches every manifest path and stores all of them in `partition`.
///
/// Paths are resolved against `scope`, so the manifest works under any
/// sub-path deployment. Every entry is fetched before anything is stored:
/// a single network failure or non-`2xx` status aborts the batch and leaves
/// the partition untouched. Returns the number of stored entries.
pub async fn precache<S, N, P>(
    storage: &S,
    network: &N,
    scope: &Url,
    partition: &str,
    manifest: &[P],
) -> Result<usize, PrecacheError>
where
    S: CacheStorage + ?Sized,
    N: Network + ?Sized,
    P: AsRef<str>,
{
    let requests = manifest
        .iter()
        .map(|path| {
            let path = path.as_ref();
            scope
                .join(path)
                .map(|url| Request::new(http::Method::GET, url))
                .map_err(|source| PrecacheError::Url {
                    path: path.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let responses = try_join_all(requests.iter().map(|request| async move {
        let response = network
            .fetch(request)
            .await
            .map_err(|source| PrecacheError::Fetch {
                url: request.url().clone(),
                source,
            })?;
        if !response.ok() {
            return Err(PrecacheError::Status {
                url: request.url().clone(),
                status: response.status(),
            });
        }
        Ok(response)
    }))
    .await?;

    let cache = storage.open(partition).await?;
    for (request, response) in requests.iter().zip(responses) {
        cache.put(request, response).await?;
    }
    debug!(partition, entries = requests.len(), "precache batch stored");
    Ok(requests.len())
}
