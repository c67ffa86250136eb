//! [`Network`] over a reqwest client.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use swcache_core::{FetchError, Network, Request, Response};
use tracing::debug;

/// Reaches the origin through a reqwest client.
///
/// Accepts either a plain [`reqwest::Client`] or a
/// [`ClientWithMiddleware`], so retries or tracing middleware can be stacked
/// underneath the worker.
#[derive(Clone, Debug)]
pub struct ReqwestNetwork {
    client: ClientWithMiddleware,
}

impl ReqwestNetwork {
    /// Wraps `client`.
    pub fn new(client: impl Into<ClientWithMiddleware>) -> Self {
        Self {
            client: client.into(),
        }
    }

    /// The underlying client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }
}

impl From<reqwest::Client> for ReqwestNetwork {
    fn from(client: reqwest::Client) -> Self {
        Self::new(client)
    }
}

#[async_trait]
impl Network for ReqwestNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let response = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone())
            .send()
            .await
            .map_err(FetchError::network)?;

        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.bytes().await.map_err(FetchError::network)?;
        debug!(%url, %status, bytes = body.len(), "fetched");

        Ok(Response::new(status, body)
            .with_headers(headers)
            .with_url(url))
    }
}
