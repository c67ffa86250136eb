//! Worker configuration.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```
//! use swcache::WorkerConfig;
//!
//! let config = WorkerConfig::from_yaml(
//!     r#"
//! caches:
//!   version: v3
//! offline_page: offline.html
//! offload:
//!   warn_after: 5s
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.caches.core(), "morning-news-core-v3");
//! assert_eq!(config.offline_page, "offline.html");
//! assert_eq!(config.precache.len(), 6);
//! ```

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use swcache_backend::CacheNames;

use crate::classifier::DEFAULT_ASSET_EXTENSIONS;
use crate::error::ConfigError;
use crate::notification::NotificationDefaults;
use crate::offload::OffloadConfig;

const DEFAULT_PRECACHE: [&str; 6] = [
    "./",
    "index.html",
    "archive.html",
    "manifest.json",
    "logo.png",
    "sw.js",
];

const DEFAULT_OFFLINE_PAGE: &str = "index.html";

/// Configuration of one worker deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Naming family and version of the cache partitions.
    pub caches: CacheNames,
    /// Paths fetched into CORE on install, relative to the scope.
    pub precache: Vec<String>,
    /// Path extensions served cache-first from CORE.
    pub asset_extensions: Vec<SmolStr>,
    /// Page served from CORE when a navigation can be answered by neither
    /// PAGES nor the network.
    pub offline_page: String,
    /// Defaults applied to push payloads.
    pub notification: NotificationDefaults,
    /// Background refresh settings.
    pub offload: OffloadConfig,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            caches: CacheNames::default(),
            precache: DEFAULT_PRECACHE.iter().map(|path| path.to_string()).collect(),
            asset_extensions: DEFAULT_ASSET_EXTENSIONS
                .into_iter()
                .map(SmolStr::new_static)
                .collect(),
            offline_page: DEFAULT_OFFLINE_PAGE.to_string(),
            notification: NotificationDefaults::default(),
            offload: OffloadConfig::default(),
        }
    }
}

impl WorkerConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(source).map_err(|err| ConfigError::Yaml(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn empty_document_yields_defaults() {
        let config = WorkerConfig::from_yaml("{}").unwrap();
        assert_eq!(config, WorkerConfig::default());
        assert_eq!(config.caches.pages(), "morning-news-pages-v2");
        assert_eq!(config.notification.vibrate, vec![200, 100, 200]);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = WorkerConfig::from_yaml(
            r#"
caches:
  family: "daily-"
precache: ["./", "index.html"]
asset_extensions: [svg]
notification:
  title: Evening News
offload:
  deduplicate: false
  warn_after: 250ms
"#,
        )
        .unwrap();

        assert_eq!(config.caches.core(), "daily-core-v2");
        assert_eq!(config.precache, vec!["./", "index.html"]);
        assert_eq!(config.asset_extensions, vec![SmolStr::new("svg")]);
        assert_eq!(config.notification.title, "Evening News");
        assert_eq!(
            config.notification.body,
            NotificationDefaults::default().body
        );
        assert!(!config.offload.deduplicate);
        assert_eq!(config.offload.warn_after, Some(Duration::from_millis(250)));
        assert_eq!(config.offline_page, "index.html");
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = WorkerConfig::from_yaml("precache: 12").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
