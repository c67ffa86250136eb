//! Request identity inside a cache partition.
//!
//! An entry is addressed by a [`RequestKey`] (method plus URL without its
//! fragment). Responses that carry a `Vary` header additionally pin the
//! values of the named request headers, captured as [`VaryHeaders`]; a probe
//! only matches when it carries the same values.
//!
//! ```
//! use swcache_core::{Request, RequestKey};
//!
//! let a = RequestKey::from_request(&Request::get("https://example.com/a.css#top").unwrap());
//! let b = RequestKey::from_request(&Request::get("https://example.com/a.css").unwrap());
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "GET https://example.com/a.css");
//! ```

use std::fmt;
use std::sync::Arc;

use http::{HeaderName, HeaderValue, Method};
use smol_str::SmolStr;
use url::Url;

use crate::{Request, Response};

#[derive(Debug, PartialEq, Eq, Hash)]
struct RequestKeyInner {
    method: Method,
    url: SmolStr,
}

/// Identity of a cached request.
///
/// Wrapped in [`Arc`] so keys can be cloned into background tasks and
/// storage indexes without copying the URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    inner: Arc<RequestKeyInner>,
}

impl RequestKey {
    /// Builds a key from a method and URL, dropping the URL fragment.
    pub fn new(method: Method, url: &Url) -> Self {
        let mut url = url.clone();
        url.set_fragment(None);
        Self {
            inner: Arc::new(RequestKeyInner {
                method,
                url: SmolStr::new(url.as_str()),
            }),
        }
    }

    /// Builds the key addressing `request`.
    pub fn from_request(request: &Request) -> Self {
        Self::new(request.method().clone(), request.url())
    }

    /// Method component.
    pub fn method(&self) -> &Method {
        &self.inner.method
    }

    /// URL component, fragment stripped.
    pub fn url(&self) -> &str {
        &self.inner.url
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.inner.method, self.inner.url)
    }
}

/// Request header values a stored response varies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VaryHeaders {
    /// The response carried no `Vary` header.
    #[default]
    None,
    /// `Vary: *`: the entry never matches a later probe.
    Any,
    /// Captured `(header, value)` pairs from the storing request.
    Headers(Vec<(HeaderName, Option<HeaderValue>)>),
}

impl VaryHeaders {
    /// Captures the request header values named by the response's `Vary`.
    pub fn capture(request: &Request, response: &Response) -> Self {
        let names = response.vary();
        if names.is_empty() {
            return Self::None;
        }
        if names.iter().any(|name| name == "*") {
            return Self::Any;
        }
        let captured = names
            .iter()
            .filter_map(|name| HeaderName::from_bytes(name.as_bytes()).ok())
            .map(|name| {
                let value = request.headers().get(&name).cloned();
                (name, value)
            })
            .collect();
        Self::Headers(captured)
    }

    /// Whether `request` carries the same values as the storing request.
    pub fn matches(&self, request: &Request) -> bool {
        match self {
            Self::None => true,
            Self::Any => false,
            Self::Headers(headers) => headers
                .iter()
                .all(|(name, value)| request.headers().get(name) == value.as_ref()),
        }
    }
}
