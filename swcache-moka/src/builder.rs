//! Builder for configuring [`MokaStorage`].

use moka::future::{Cache, CacheBuilder};
use moka::policy::EvictionPolicy;
use smol_str::SmolStr;
use swcache_core::RequestKey;

use crate::partition::{MokaPartition, StoredEntry};
use crate::storage::MokaStorage;

/// Marker type: capacity has not been configured yet.
///
/// This is the initial state of a [`MokaStorageBuilder`]. You must call one of
/// [`unbounded()`](MokaStorageBuilder::unbounded),
/// [`max_entries()`](MokaStorageBuilder::max_entries) or
/// [`max_bytes()`](MokaStorageBuilder::max_bytes) before calling `build()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapacity;

/// Marker type: partitions grow without limit.
///
/// This matches the platform cache storage, where entries are only ever
/// replaced by overwrite.
#[derive(Debug, Clone, Copy)]
pub struct Unbounded;

/// Marker type: each partition holds at most `n` entries.
#[derive(Debug, Clone, Copy)]
pub struct EntryCapacity(pub(crate) u64);

/// Marker type: each partition holds at most `n` bytes (approximate).
#[derive(Debug, Clone, Copy)]
pub struct ByteCapacity(pub(crate) u64);

#[derive(Debug, Clone, Copy)]
pub(crate) enum Capacity {
    Unbounded,
    Entries(u64),
    Bytes(u64),
}

/// Settings every newly opened partition is created with.
#[derive(Clone)]
pub(crate) struct PartitionSettings {
    capacity: Capacity,
    eviction_policy: Option<EvictionPolicy>,
}

impl PartitionSettings {
    pub(crate) fn create(&self, name: SmolStr) -> MokaPartition {
        let cache: Cache<RequestKey, StoredEntry> = match self.capacity {
            Capacity::Unbounded => Cache::builder().name(name.as_str()).build(),
            Capacity::Entries(max) => CacheBuilder::new(max)
                .name(name.as_str())
                .eviction_policy(
                    self.eviction_policy
                        .clone()
                        .unwrap_or_else(EvictionPolicy::tiny_lfu),
                )
                .build(),
            Capacity::Bytes(max) => CacheBuilder::new(max)
                .name(name.as_str())
                .weigher(byte_weigher)
                .eviction_policy(
                    self.eviction_policy
                        .clone()
                        .unwrap_or_else(EvictionPolicy::lru),
                )
                .build(),
        };
        MokaPartition::new(name, cache)
    }
}

/// Approximate byte cost of an entry: URL, header bytes and body.
fn byte_weigher(key: &RequestKey, entry: &StoredEntry) -> u32 {
    let headers: usize = entry
        .response
        .headers()
        .iter()
        .map(|(name, value)| name.as_str().len() + value.len())
        .sum();
    let size = key.url().len() + headers + entry.response.body().len();
    size.min(u32::MAX as usize) as u32
}

/// Builder for creating and configuring a [`MokaStorage`].
///
/// Use [`MokaStorage::builder`] to create a new builder instance.
///
/// # Capacity Configuration (Required)
///
/// Capacity applies to each partition separately. Configure exactly one of:
/// - [`unbounded()`](Self::unbounded) - no limit, entries are only replaced
/// - [`max_entries(n)`](Self::max_entries) - limit by entry count
/// - [`max_bytes(n)`](Self::max_bytes) - limit by approximate memory usage
///
/// # Examples
///
/// ```
/// use swcache_moka::MokaStorage;
///
/// let storage = MokaStorage::builder()
///     .label("offline")
///     .max_entries(500)
///     .build();
/// ```
pub struct MokaStorageBuilder<Cap> {
    capacity: Cap,
    label: SmolStr,
    eviction_policy: Option<EvictionPolicy>,
}

impl MokaStorageBuilder<NoCapacity> {
    /// Creates a new builder with no capacity configured.
    pub fn new() -> Self {
        Self {
            capacity: NoCapacity,
            label: SmolStr::new_static("moka"),
            eviction_policy: None,
        }
    }

    /// Partitions are never size-limited.
    pub fn unbounded(self) -> MokaStorageBuilder<Unbounded> {
        MokaStorageBuilder {
            capacity: Unbounded,
            label: self.label,
            eviction_policy: self.eviction_policy,
        }
    }

    /// Sets the maximum number of entries per partition.
    pub fn max_entries(self, capacity: u64) -> MokaStorageBuilder<EntryCapacity> {
        MokaStorageBuilder {
            capacity: EntryCapacity(capacity),
            label: self.label,
            eviction_policy: self.eviction_policy,
        }
    }

    /// Sets the approximate memory budget per partition, in bytes.
    pub fn max_bytes(self, bytes: u64) -> MokaStorageBuilder<ByteCapacity> {
        MokaStorageBuilder {
            capacity: ByteCapacity(bytes),
            label: self.label,
            eviction_policy: self.eviction_policy,
        }
    }
}

impl Default for MokaStorageBuilder<NoCapacity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cap> MokaStorageBuilder<Cap> {
    /// Sets the label used in logs.
    ///
    /// # Default
    ///
    /// `"moka"`
    pub fn label(mut self, label: impl Into<SmolStr>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the eviction policy for bounded partitions.
    ///
    /// # Default
    ///
    /// - [`max_entries`](MokaStorageBuilder::max_entries): [`EvictionPolicy::tiny_lfu()`]
    /// - [`max_bytes`](MokaStorageBuilder::max_bytes): [`EvictionPolicy::lru()`]
    ///
    /// Ignored for unbounded storage.
    pub fn eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.eviction_policy = Some(policy);
        self
    }

    fn finish(self, capacity: Capacity) -> MokaStorage {
        MokaStorage::new(
            self.label,
            PartitionSettings {
                capacity,
                eviction_policy: self.eviction_policy,
            },
        )
    }
}

impl MokaStorageBuilder<Unbounded> {
    /// Builds a storage whose partitions never evict.
    pub fn build(self) -> MokaStorage {
        self.finish(Capacity::Unbounded)
    }
}

impl MokaStorageBuilder<EntryCapacity> {
    /// Builds a storage with entry-count based partition capacity.
    pub fn build(self) -> MokaStorage {
        let max = self.capacity.0;
        self.finish(Capacity::Entries(max))
    }
}

impl MokaStorageBuilder<ByteCapacity> {
    /// Builds a storage with byte-based partition capacity.
    pub fn build(self) -> MokaStorage {
        let max = self.capacity.0;
        self.finish(Capacity::Bytes(max))
    }
}
