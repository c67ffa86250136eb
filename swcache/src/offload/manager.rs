//! OffloadManager implementation for background task execution.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use swcache_core::RequestKey;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info_span, warn};

use super::policy::{OffloadConfig, TimeoutPolicy};

#[cfg(feature = "metrics")]
use crate::metrics::{OFFLOAD_TASKS_COMPLETED, OFFLOAD_TASKS_DEDUPLICATED, OFFLOAD_TASKS_SPAWNED};

/// Key identifying the background refresh of one cached request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OffloadKey(RequestKey);

impl OffloadKey {
    /// The request being refreshed.
    pub fn request(&self) -> &RequestKey {
        &self.0
    }
}

impl From<RequestKey> for OffloadKey {
    fn from(key: RequestKey) -> Self {
        Self(key)
    }
}

#[derive(Debug)]
struct OffloadManagerInner {
    config: OffloadConfig,
    tasks: DashMap<OffloadKey, JoinHandle<()>>,
}

/// Manager for offloading tasks to background execution.
///
/// Tasks are spawned on the ambient tokio runtime. Failures inside a task
/// are the task's own business: the future's output is `()`. A task stops
/// being tracked as soon as it completes.
#[derive(Clone, Debug)]
pub struct OffloadManager {
    inner: Arc<OffloadManagerInner>,
}

impl OffloadManager {
    /// Create a new OffloadManager with the given configuration.
    pub fn new(config: OffloadConfig) -> Self {
        Self {
            inner: Arc::new(OffloadManagerInner {
                config,
                tasks: DashMap::new(),
            }),
        }
    }

    /// Create a new OffloadManager with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(OffloadConfig::default())
    }

    /// Spawn a task with a specific key.
    ///
    /// If a task with the same key is still running and deduplication is
    /// enabled, the new task is dropped without running.
    ///
    /// Returns `true` if the task was spawned, `false` if it was deduplicated.
    pub fn spawn_with_key<K, F>(&self, key: K, task: F) -> bool
    where
        K: Into<OffloadKey>,
        F: Future<Output = ()> + Send + 'static,
    {
        let key = key.into();

        // The shard stays locked until the handle is stored, so a task that
        // completes at once cannot try to untrack itself before it is tracked.
        match self.inner.tasks.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                if self.inner.config.deduplicate && !entry.get().is_finished() {
                    debug!(?key, "Task deduplicated - already in flight");
                    #[cfg(feature = "metrics")]
                    metrics::counter!(*OFFLOAD_TASKS_DEDUPLICATED).increment(1);
                    return false;
                }
                entry.insert(self.spawn_inner(task, key));
            }
            Entry::Vacant(entry) => {
                entry.insert(self.spawn_inner(task, key));
            }
        }

        #[cfg(feature = "metrics")]
        metrics::counter!(*OFFLOAD_TASKS_SPAWNED).increment(1);
        true
    }

    /// Get the number of currently running tasks.
    pub fn active_task_count(&self) -> usize {
        self.inner
            .tasks
            .iter()
            .filter(|entry| !entry.is_finished())
            .count()
    }

    /// Check if a task with the given key is still running.
    pub fn is_in_flight(&self, key: &OffloadKey) -> bool {
        self.inner
            .tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Wait for all currently tracked tasks to complete.
    ///
    /// Yields between checks so the tasks can make progress.
    pub async fn wait_all(&self) {
        loop {
            // A panicked task never untracks itself.
            self.inner.tasks.retain(|_, handle| !handle.is_finished());
            if self.inner.tasks.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
    }

    fn spawn_inner<F>(&self, task: F, key: OffloadKey) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timeout_policy = self.inner.config.timeout_policy();
        let inner = Arc::clone(&self.inner);

        let span = info_span!("offload_task", key = ?key);

        tokio::spawn(
            async move {
                let start = Instant::now();
                task.await;
                let elapsed = start.elapsed();
                if let TimeoutPolicy::Warn(threshold) = timeout_policy
                    && elapsed > threshold
                {
                    warn!(
                        ?key,
                        elapsed_ms = elapsed.as_millis(),
                        threshold_ms = threshold.as_millis(),
                        "Offload task exceeded timeout threshold"
                    );
                }
                // Without deduplication a newer task may own the slot by now.
                let id = tokio::task::id();
                inner.tasks.remove_if(&key, |_, handle| handle.id() == id);
                #[cfg(feature = "metrics")]
                Self::record_completion(elapsed);
            }
            .instrument(span),
        )
    }

    #[cfg(feature = "metrics")]
    fn record_completion(elapsed: std::time::Duration) {
        metrics::counter!(*OFFLOAD_TASKS_COMPLETED).increment(1);
        metrics::histogram!(*crate::metrics::OFFLOAD_TASK_DURATION).record(elapsed.as_secs_f64());
    }
}

impl Default for OffloadManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}
