//! Versioned partition naming.
//!
//! Every partition this worker owns is named `{family}{role}-{version}`, for
//! example `morning-news-core-v2`. Bumping `version` on deploy makes the
//! previous deployment's partitions *stale*: they still belong to the family
//! but are no longer current, and activation deletes them.
//!
//! ```
//! use swcache_backend::CacheNames;
//!
//! let names = CacheNames::new("morning-news-", "v3");
//! assert_eq!(names.core(), "morning-news-core-v3");
//! assert_eq!(names.pages(), "morning-news-pages-v3");
//! assert!(names.is_stale("morning-news-core-v2"));
//! assert!(!names.is_stale("morning-news-pages-v3"));
//! assert!(!names.is_stale("someone-elses-cache"));
//! ```

use serde::{Deserialize, Serialize};

const CORE_ROLE: &str = "core";
const PAGES_ROLE: &str = "pages";

/// Naming family and current version of the worker's partitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheNames {
    /// Prefix shared by every partition this worker owns.
    pub family: String,
    /// Version tag of the current deployment.
    pub version: String,
}

impl Default for CacheNames {
    fn default() -> Self {
        Self::new("morning-news-", "v2")
    }
}

impl CacheNames {
    /// Creates a naming scheme.
    pub fn new(family: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            version: version.into(),
        }
    }

    /// Name of the CORE partition (precache manifest and static assets).
    pub fn core(&self) -> String {
        self.name(CORE_ROLE)
    }

    /// Name of the PAGES partition (HTML documents).
    pub fn pages(&self) -> String {
        self.name(PAGES_ROLE)
    }

    /// Both current names.
    pub fn current(&self) -> [String; 2] {
        [self.core(), self.pages()]
    }

    /// Whether `name` belongs to this family, current or not.
    pub fn in_family(&self, name: &str) -> bool {
        name.starts_with(&self.family)
    }

    /// Whether `name` is one of the current partition names.
    pub fn is_current(&self, name: &str) -> bool {
        self.current().iter().any(|current| current == name)
    }

    /// In the family, but not current: deleted on activation.
    pub fn is_stale(&self, name: &str) -> bool {
        self.in_family(name) && !self.is_current(name)
    }

    fn name(&self, role: &str) -> String {
        format!("{}{}-{}", self.family, role, self.version)
    }
}
