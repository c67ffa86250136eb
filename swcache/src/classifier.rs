//! Request classification.
//!
//! Every intercepted request is sorted into exactly one [`Classification`]:
//!
//! | request                                        | classification |
//! |------------------------------------------------|----------------|
//! | method is not `GET`                            | `Ignored`      |
//! | origin differs from the worker's origin        | `Ignored`      |
//! | navigation, or `Accept` mentions `text/html`   | `Page`         |
//! | path ends in an allow-listed extension         | `Asset`        |
//! | anything else (API calls, other resource types)| `Unhandled`    |
//!
//! `Ignored` and `Unhandled` both leave the request to the network, but are
//! kept apart so the reason shows up in logs.

use http::Method;
use swcache_core::Request;
use url::{Origin, Url};

const HTML_MEDIA_TYPE: &str = "text/html";

/// Default extensions served cache-first.
pub const DEFAULT_ASSET_EXTENSIONS: [&str; 5] = ["png", "json", "js", "css", "woff2"];

/// Why a request was not intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Only `GET` requests are cached.
    Method,
    /// Cross-origin requests are never cached.
    CrossOrigin,
}

/// Decision taken for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Not intercepted at all.
    Ignored(IgnoreReason),
    /// An HTML document: stale-while-revalidate against PAGES.
    Page,
    /// A static asset: cache-first against CORE.
    Asset,
    /// Same-origin `GET` of an uncategorized type: left to the network.
    Unhandled,
}

impl Classification {
    /// Whether the worker answers this request itself.
    pub fn intercepts(&self) -> bool {
        matches!(self, Self::Page | Self::Asset)
    }
}

/// Classifies requests relative to the worker's own origin.
#[derive(Debug, Clone)]
pub struct Classifier {
    origin: Origin,
    suffixes: Vec<String>,
}

impl Classifier {
    /// Creates a classifier for a worker registered at `scope`.
    pub fn new<I, E>(scope: &Url, asset_extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        Self {
            origin: scope.origin(),
            suffixes: asset_extensions
                .into_iter()
                .map(|ext| format!(".{}", ext.as_ref().trim_start_matches('.')))
                .collect(),
        }
    }

    /// Creates a classifier with [`DEFAULT_ASSET_EXTENSIONS`].
    pub fn with_default_extensions(scope: &Url) -> Self {
        Self::new(scope, DEFAULT_ASSET_EXTENSIONS)
    }

    /// Sorts `request` into a [`Classification`].
    pub fn classify(&self, request: &Request) -> Classification {
        if *request.method() != Method::GET {
            return Classification::Ignored(IgnoreReason::Method);
        }
        if request.url().origin() != self.origin {
            return Classification::Ignored(IgnoreReason::CrossOrigin);
        }
        if request.is_navigation() || request.accepts(HTML_MEDIA_TYPE) {
            return Classification::Page;
        }
        if self.is_asset_path(request.url().path()) {
            return Classification::Asset;
        }
        Classification::Unhandled
    }

    fn is_asset_path(&self, path: &str) -> bool {
        self.suffixes.iter().any(|suffix| path.ends_with(suffix))
    }
}
