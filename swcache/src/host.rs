//! The environment the worker runs in.
//!
//! [`Host`] gathers everything the worker asks of its embedding: its
//! registration scope, control over open pages, and the notification surface.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use smol_str::SmolStr;
use url::Url;

use crate::error::HostError;
use crate::notification::Notification;

/// Opaque identifier of a page controlled (or controllable) by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(SmolStr);

impl ClientId {
    /// Wraps a host-specific identifier.
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of client to enumerate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientType {
    /// Top-level browsing contexts only.
    #[default]
    Window,
    /// Every kind of client.
    All,
}

/// Filter for [`Host::match_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientQuery {
    /// Also list pages not (yet) controlled by this worker.
    pub include_uncontrolled: bool,
    /// Kind of client.
    pub client_type: ClientType,
}

impl ClientQuery {
    /// Every open window, controlled or not.
    pub fn all_windows() -> Self {
        Self {
            include_uncontrolled: true,
            client_type: ClientType::Window,
        }
    }
}

/// An open page as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClient {
    /// Host identifier of the page.
    pub id: ClientId,
    /// Current URL of the page.
    pub url: Url,
}

/// Environment accessors used during event handling.
#[async_trait]
pub trait Host: Send + Sync {
    /// Registration scope; relative paths resolve against it.
    fn scope(&self) -> &Url;

    /// Lets a freshly installed worker replace the active one right away.
    async fn skip_waiting(&self) -> Result<(), HostError>;

    /// Takes control of every open page in scope.
    async fn claim(&self) -> Result<(), HostError>;

    /// Lists open clients matching `query`.
    async fn match_all(&self, query: ClientQuery) -> Result<Vec<WindowClient>, HostError>;

    /// Brings `client` to the foreground.
    async fn focus(&self, client: &ClientId) -> Result<(), HostError>;

    /// Opens a new window at `url`.
    ///
    /// Fails with [`HostError::Unsupported`] when the environment cannot open
    /// windows.
    async fn open_window(&self, url: &Url) -> Result<(), HostError>;

    /// Displays `notification`.
    async fn show_notification(&self, notification: &Notification) -> Result<(), HostError>;

    /// Dismisses `notification`.
    async fn close_notification(&self, notification: &Notification) -> Result<(), HostError>;
}

#[async_trait]
impl<H> Host for Arc<H>
where
    H: Host + ?Sized,
{
    fn scope(&self) -> &Url {
        (**self).scope()
    }

    async fn skip_waiting(&self) -> Result<(), HostError> {
        (**self).skip_waiting().await
    }

    async fn claim(&self) -> Result<(), HostError> {
        (**self).claim().await
    }

    async fn match_all(&self, query: ClientQuery) -> Result<Vec<WindowClient>, HostError> {
        (**self).match_all(query).await
    }

    async fn focus(&self, client: &ClientId) -> Result<(), HostError> {
        (**self).focus(client).await
    }

    async fn open_window(&self, url: &Url) -> Result<(), HostError> {
        (**self).open_window(url).await
    }

    async fn show_notification(&self, notification: &Notification) -> Result<(), HostError> {
        (**self).show_notification(notification).await
    }

    async fn close_notification(&self, notification: &Notification) -> Result<(), HostError> {
        (**self).close_notification(notification).await
    }
}
