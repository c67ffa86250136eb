//! Push notifications: composing what is displayed and resolving clicks.
//!
//! A push message becomes a [`Notification`] through [`build_notification`],
//! which merges the (possibly partial or malformed) payload with
//! [`NotificationDefaults`]. When the user activates it,
//! [`handle_click`] focuses a page already showing the target or opens one.

mod click;
mod payload;

pub use click::{ClickOutcome, handle_click, resolve_target};
pub use payload::{NotificationContent, PushPayload, apply_defaults, build_notification};

use serde::{Deserialize, Serialize};

/// Defaults for every notification field, in configuration form.
///
/// `icon` and `badge` are paths resolved against the worker's scope when a
/// notification is built; `url` is kept relative and resolved on click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationDefaults {
    /// Title when the payload has none.
    pub title: String,
    /// Body when the payload has none.
    pub body: String,
    /// Icon path, relative to the scope.
    pub icon: String,
    /// Badge path, relative to the scope.
    pub badge: String,
    /// Click target, relative to the scope.
    pub url: String,
    /// Vibration pattern in milliseconds.
    pub vibrate: Vec<u32>,
    /// The single action offered on every notification.
    pub action: NotificationAction,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            title: "모닝 뉴스".to_string(),
            body: "새로운 뉴스가 업데이트되었습니다!".to_string(),
            icon: "logo.png".to_string(),
            badge: "logo.png".to_string(),
            url: "./".to_string(),
            vibrate: vec![200, 100, 200],
            action: NotificationAction::default(),
        }
    }
}

/// An action button on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationAction {
    /// Identifier reported back on click.
    pub action: String,
    /// Button label.
    pub title: String,
}

impl Default for NotificationAction {
    fn default() -> Self {
        Self {
            action: "open".to_string(),
            title: "뉴스 보기".to_string(),
        }
    }
}

/// Opaque data carried by a notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    /// Click target, possibly relative to the scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Display options, in the shape the notification surface expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    /// Body text.
    pub body: String,
    /// Absolute icon URL.
    pub icon: String,
    /// Absolute badge URL.
    pub badge: String,
    /// Vibration pattern in milliseconds.
    pub vibrate: Vec<u32>,
    /// Data handed back on click.
    pub data: NotificationData,
    /// Action buttons.
    pub actions: Vec<NotificationAction>,
    /// Keep the notification until the user acts on it.
    pub require_interaction: bool,
}

/// A displayed (or to be displayed) notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Title line.
    pub title: String,
    /// Everything else.
    pub options: NotificationOptions,
}

impl Notification {
    /// Click target stored with the notification, if any.
    pub fn target(&self) -> Option<&str> {
        self.options.data.url.as_deref()
    }
}
