//! Intercepted request types.
//!
//! A [`Request`] is the worker's view of an outgoing page request: method,
//! absolute URL, headers and the [`RequestMode`] the page issued it with.
//! Requests carry no body; only `GET` requests are ever cached.

use http::{HeaderMap, HeaderValue, Method, header};
use url::Url;

use crate::network::FetchError;

/// How the page issued the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    /// A top-level page navigation.
    Navigate,
    /// Same-origin only fetch.
    SameOrigin,
    /// Opaque cross-origin fetch.
    NoCors,
    /// Regular CORS fetch (the default for script-initiated requests).
    #[default]
    Cors,
}

/// An intercepted request.
///
/// # Example
///
/// ```
/// use swcache_core::{Request, RequestMode};
///
/// let request = Request::get("https://example.com/news/index.html")
///     .unwrap()
///     .with_mode(RequestMode::Navigate);
///
/// assert!(request.is_navigation());
/// assert_eq!(request.url().path(), "/news/index.html");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    mode: RequestMode,
}

impl Request {
    /// Creates a request with no headers and the default [`RequestMode::Cors`].
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            mode: RequestMode::default(),
        }
    }

    /// Parses `url` and creates a `GET` request for it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] when `url` is not an absolute URL.
    pub fn get(url: &str) -> Result<Self, FetchError> {
        let url = Url::parse(url)
            .map_err(|err| FetchError::InvalidRequest(format!("{url}: {err}")))?;
        Ok(Self::new(Method::GET, url))
    }

    /// Replaces the request mode.
    pub fn with_mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }

    /// Appends a header.
    pub fn with_header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Absolute request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the request headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Request mode.
    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    /// Whether this request is a top-level page navigation.
    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate
    }

    /// Whether any `Accept` header value mentions `media_type`.
    pub fn accepts(&self, media_type: &str) -> bool {
        self.headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|value| value.contains(media_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_scans_every_accept_header() {
        let request = Request::get("https://example.com/")
            .unwrap()
            .with_header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .with_header(
                header::ACCEPT,
                HeaderValue::from_static("text/html,application/xhtml+xml"),
            );

        assert!(request.accepts("text/html"));
        assert!(!request.accepts("image/png"));
    }

    #[test]
    fn get_rejects_relative_urls() {
        assert!(matches!(
            Request::get("index.html"),
            Err(FetchError::InvalidRequest(_))
        ));
    }
}
