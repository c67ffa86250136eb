//! Offload task policies and configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Policy for slow background tasks.
///
/// Background refreshes are never cancelled; a hung fetch simply keeps its
/// task alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Tasks run until completion silently.
    #[default]
    None,
    /// Log a warning when a task outlives the duration.
    Warn(Duration),
}

/// Configuration for the [`OffloadManager`](super::OffloadManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffloadConfig {
    /// Skip a refresh when one for the same request is already in flight.
    pub deduplicate: bool,
    /// Warn about refreshes slower than this (e.g., "10s", "500ms").
    #[serde(default, with = "humantime_serde")]
    pub warn_after: Option<Duration>,
}

impl Default for OffloadConfig {
    fn default() -> Self {
        Self {
            deduplicate: true,
            warn_after: None,
        }
    }
}

impl OffloadConfig {
    /// Create a new builder for OffloadConfig.
    pub fn builder() -> OffloadConfigBuilder {
        OffloadConfigBuilder::new()
    }

    /// Timeout policy derived from `warn_after`.
    pub fn timeout_policy(&self) -> TimeoutPolicy {
        self.warn_after.map_or(TimeoutPolicy::None, TimeoutPolicy::Warn)
    }
}

/// Builder for OffloadConfig.
#[derive(Debug, Clone)]
pub struct OffloadConfigBuilder {
    deduplicate: bool,
    warn_after: Option<Duration>,
}

impl Default for OffloadConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OffloadConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            deduplicate: true,
            warn_after: None,
        }
    }

    /// Warn about tasks running longer than `duration`.
    pub fn warn_after(self, duration: Duration) -> Self {
        Self {
            warn_after: Some(duration),
            ..self
        }
    }

    /// Enable or disable task deduplication.
    pub fn deduplicate(self, enabled: bool) -> Self {
        Self {
            deduplicate: enabled,
            ..self
        }
    }

    /// Build the OffloadConfig.
    pub fn build(self) -> OffloadConfig {
        OffloadConfig {
            deduplicate: self.deduplicate,
            warn_after: self.warn_after,
        }
    }
}
