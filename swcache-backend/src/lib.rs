//! Traits and structs for swcache storage interaction.
//!
//! If you want implement your own cache storage, you in the right place.
mod backend;
mod error;
mod names;

pub use backend::{BackendResult, CacheStorage, Partition, SharedPartition, SharedStorage};
pub use error::BackendError;
pub use names::CacheNames;

/// Status of deleting result.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteStatus {
    /// Record successfully deleted.
    Deleted(u32),
    /// Record already missing.
    Missing,
}

impl DeleteStatus {
    /// Whether anything was removed.
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}
