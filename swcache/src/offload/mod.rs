//! Background task execution for stale-while-revalidate.
//!
//! When a page is served from the PAGES partition, the refresh of that entry
//! is handed to the [`OffloadManager`] so the page never waits on the
//! network. Refreshes of the same request are de-duplicated while one is in
//! flight.
//!
//! # Example
//!
//! ```ignore
//! use swcache::offload::{OffloadConfig, OffloadManager};
//!
//! let manager = OffloadManager::new(OffloadConfig::default());
//! manager.spawn_with_key(request_key, async {
//!     // refresh logic
//! });
//! manager.wait_all().await;
//! ```

mod manager;
mod policy;

pub use manager::{OffloadKey, OffloadManager};
pub use policy::{OffloadConfig, OffloadConfigBuilder, TimeoutPolicy};
