#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Request classification into pages, assets and passthrough.
pub mod classifier;

/// Worker configuration loaded from YAML.
pub mod config;

/// Error types for worker operations.
///
/// Defines [`WorkerError`] which covers:
/// - Strategy failures ([`CacheError`])
/// - Storage failures
/// - Host failures ([`HostError`])
/// - Lifecycle steps taken out of order
pub mod error;

/// Environment accessors: scope, clients, notification surface.
pub mod host;

/// Lifecycle state machine and event dispatch.
pub mod lifecycle;

/// Metrics collection.
///
/// When the `metrics` feature is enabled, this module provides counters
/// for cache hits and misses, offline fallbacks, precache results and
/// purged partitions, plus offload task counters and durations.
pub mod metrics;

/// Push notification composition and click resolution.
pub mod notification;

/// Background task offloading for stale-while-revalidate.
pub mod offload;

/// Install-time precaching.
pub mod precache;

/// Cache-first and stale-while-revalidate.
pub mod strategy;

pub use classifier::{Classification, Classifier, IgnoreReason};
pub use config::WorkerConfig;
pub use error::{CacheError, ConfigError, HostError, PrecacheError, WorkerError};
pub use host::{ClientId, ClientQuery, ClientType, Host, WindowClient};
pub use lifecycle::{
    ActivateReport, Event, EventOutcome, FetchOutcome, InstallReport, ServiceWorker, WorkerState,
};
pub use notification::{ClickOutcome, Notification, NotificationDefaults, NotificationOptions};
pub use strategy::Strategies;

pub use swcache_backend::{CacheNames, CacheStorage, Partition};
pub use swcache_core::{FetchError, Network, PushData, Request, RequestMode, Response};
