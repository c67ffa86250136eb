//! The network seam: [`Network`] and [`FetchError`].

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::{Request, Response};

/// Failure to obtain any response from the network.
///
/// An HTTP error status is *not* a `FetchError`: the server answered, and the
/// response is returned as-is with `ok() == false`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (offline, DNS, connection reset...).
    #[error("network error: {0}")]
    Network(Box<dyn std::error::Error + Send + Sync>),
    /// The request could not be built or sent at all.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// Wraps any transport error.
    pub fn network<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network(Box::new(error))
    }
}

/// The origin server as seen from the worker.
///
/// Implementations perform one real fetch per call; the caching policy lives
/// entirely above this trait.
///
/// # Examples
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use swcache_core::{FetchError, Network, Request, Response};
///
/// struct Offline;
///
/// #[async_trait]
/// impl Network for Offline {
///     async fn fetch(&self, _request: &Request) -> Result<Response, FetchError> {
///         Err(FetchError::InvalidRequest("offline".into()))
///     }
/// }
/// ```
#[async_trait]
pub trait Network: Send + Sync {
    /// Performs the request against the network.
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}

#[async_trait]
impl<N> Network for Arc<N>
where
    N: Network + ?Sized,
{
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl Network for Box<dyn Network> {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        (**self).fetch(request).await
    }
}
