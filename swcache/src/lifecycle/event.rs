use swcache_core::{PushData, Request, Response};

use super::{ActivateReport, InstallReport};
use crate::notification::{ClickOutcome, Notification};

/// An event delivered to the worker by its host.
#[derive(Debug, Clone)]
pub enum Event {
    /// The worker is being installed.
    Install,
    /// The worker is taking over from its predecessor.
    Activate,
    /// A page issued a request.
    Fetch(Request),
    /// A push message arrived, possibly without data.
    Push(Option<PushData>),
    /// The user activated a notification.
    NotificationClick(Notification),
}

impl Event {
    /// Static name for logs and spans.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Activate => "activate",
            Self::Fetch(_) => "fetch",
            Self::Push(_) => "push",
            Self::NotificationClick(_) => "notificationclick",
        }
    }
}

/// How a fetch was answered.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Not intercepted: the host performs the request as if no worker existed.
    Passthrough,
    /// Answered by the worker.
    Respond(Response),
    /// Neither cache nor network could answer; the page sees a network error.
    NetworkError,
}

impl FetchOutcome {
    /// The response, when the worker produced one.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Respond(response) => Some(response),
            _ => None,
        }
    }
}

/// Result of handling one [`Event`].
#[derive(Debug)]
pub enum EventOutcome {
    /// Install finished.
    Installed(InstallReport),
    /// Activation finished.
    Activated(ActivateReport),
    /// Fetch answered.
    Fetch(FetchOutcome),
    /// Notification shown.
    Push(Notification),
    /// Click resolved.
    NotificationClick(ClickOutcome),
}
