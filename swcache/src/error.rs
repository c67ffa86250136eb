//! Error types for worker operations.

use swcache_backend::BackendError;
use swcache_core::FetchError;
use thiserror::Error;
use url::Url;

use crate::lifecycle::InvalidTransition;

/// Error returned by the caching strategies.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Cache storage failed (opening or reading a partition).
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// The network produced no response.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Why a precache batch was abandoned.
///
/// Any failure aborts the whole batch: either every manifest entry is
/// stored, or none is.
#[derive(Debug, Error)]
pub enum PrecacheError {
    /// A manifest path does not resolve against the registration scope.
    #[error("manifest entry {path:?} is not a valid URL: {source}")]
    Url {
        /// The manifest entry.
        path: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// Fetching a manifest entry failed.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// Resolved URL of the entry.
        url: Url,
        /// Network failure.
        #[source]
        source: FetchError,
    },
    /// A manifest entry answered with a non-2xx status.
    #[error("{url} answered with status {status}")]
    Status {
        /// Resolved URL of the entry.
        url: Url,
        /// Returned status.
        status: http::StatusCode,
    },
    /// Storing the batch failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Error reported by the host environment.
#[derive(Debug, Error)]
pub enum HostError {
    /// The environment does not support the requested capability.
    #[error("unsupported by host: {0}")]
    Unsupported(&'static str),
    /// The host tried and failed.
    #[error("host operation failed: {0}")]
    Failed(String),
}

/// Error type for worker event handling.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// A caching strategy failed; on the asset path this is a broken resource.
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// Cache storage failed outside a strategy.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// The host environment failed.
    #[error(transparent)]
    Host(#[from] HostError),
    /// The event is not valid in the worker's current lifecycle state.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed into a configuration.
    #[error("invalid worker configuration: {0}")]
    Yaml(String),
}
