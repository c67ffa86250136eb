//! Metrics declaration.
//!
//! Names are registered with descriptions the first time they are used.
//! Everything here compiles away without the `metrics` feature.

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    // Strategy outcomes

    /// Track number of requests answered from a partition.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "swcache_cache_hit_total",
            "Total number of requests answered from a cache partition."
        );
        "swcache_cache_hit_total"
    };
    /// Track number of requests that had to go to the network.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "swcache_cache_miss_total",
            "Total number of requests not found in a cache partition."
        );
        "swcache_cache_miss_total"
    };
    /// Track number of navigations answered with the offline page.
    pub static ref OFFLINE_FALLBACK_COUNTER: &'static str = {
        metrics::describe_counter!(
            "swcache_offline_fallback_total",
            "Total number of page requests answered with the offline page."
        );
        "swcache_offline_fallback_total"
    };

    // Lifecycle

    /// Track number of partitions deleted during activation.
    pub static ref PARTITIONS_PURGED: &'static str = {
        metrics::describe_counter!(
            "swcache_partitions_purged_total",
            "Total number of stale cache partitions deleted on activation."
        );
        "swcache_partitions_purged_total"
    };
    /// Track number of precache batches by result.
    pub static ref PRECACHE_COUNTER: &'static str = {
        metrics::describe_counter!(
            "swcache_precache_total",
            "Total number of precache batches, labelled by result."
        );
        "swcache_precache_total"
    };

    // Offload manager

    /// Track number of offload tasks spawned.
    pub static ref OFFLOAD_TASKS_SPAWNED: &'static str = {
        metrics::describe_counter!(
            "swcache_offload_tasks_spawned_total",
            "Total number of offload tasks spawned."
        );
        "swcache_offload_tasks_spawned_total"
    };
    /// Track number of offload tasks completed.
    pub static ref OFFLOAD_TASKS_COMPLETED: &'static str = {
        metrics::describe_counter!(
            "swcache_offload_tasks_completed_total",
            "Total number of offload tasks completed."
        );
        "swcache_offload_tasks_completed_total"
    };
    /// Track number of offload tasks dropped as duplicates.
    pub static ref OFFLOAD_TASKS_DEDUPLICATED: &'static str = {
        metrics::describe_counter!(
            "swcache_offload_tasks_deduplicated_total",
            "Total number of offload tasks dropped because one was already in flight."
        );
        "swcache_offload_tasks_deduplicated_total"
    };
    /// Histogram of offload task duration.
    pub static ref OFFLOAD_TASK_DURATION: &'static str = {
        metrics::describe_histogram!(
            "swcache_offload_task_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of offload tasks in seconds."
        );
        "swcache_offload_task_duration_seconds"
    };
}

/// Records a cache hit for `partition`.
#[inline]
pub fn record_hit(partition: &str) {
    #[cfg(feature = "metrics")]
    metrics::counter!(*CACHE_HIT_COUNTER, "partition" => partition.to_string()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = partition;
}

/// Records a cache miss for `partition`.
#[inline]
pub fn record_miss(partition: &str) {
    #[cfg(feature = "metrics")]
    metrics::counter!(*CACHE_MISS_COUNTER, "partition" => partition.to_string()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = partition;
}

/// Records an offline page fallback.
#[inline]
pub fn record_offline_fallback() {
    #[cfg(feature = "metrics")]
    metrics::counter!(*OFFLINE_FALLBACK_COUNTER).increment(1);
}

/// Records `count` partitions deleted on activation.
#[inline]
pub fn record_purged(count: usize) {
    #[cfg(feature = "metrics")]
    metrics::counter!(*PARTITIONS_PURGED).increment(count as u64);
    #[cfg(not(feature = "metrics"))]
    let _ = count;
}

/// Records the result of a precache batch.
#[inline]
pub fn record_precache(success: bool) {
    #[cfg(feature = "metrics")]
    metrics::counter!(
        *PRECACHE_COUNTER,
        "result" => if success { "success" } else { "failure" }
    )
    .increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = success;
}
