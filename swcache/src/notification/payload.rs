use serde_json::{Map, Value};
use swcache_core::PushData;
use tracing::debug;
use url::Url;

use super::{Notification, NotificationData, NotificationDefaults, NotificationOptions};

/// A decoded push payload. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushPayload {
    /// Notification title.
    pub title: Option<String>,
    /// Notification body.
    pub body: Option<String>,
    /// Icon URL.
    pub icon: Option<String>,
    /// Badge URL.
    pub badge: Option<String>,
    /// Click target.
    pub url: Option<String>,
    /// Sender-supplied actions; decoded but never displayed.
    pub actions: Option<Value>,
}

impl PushPayload {
    /// Decodes a JSON object payload.
    ///
    /// Returns `None` for anything that is not a JSON object. Inside an
    /// object each field is read on its own: a field that is not a string is
    /// treated as absent without affecting the others.
    pub fn decode(data: &PushData) -> Option<Self> {
        match data.json::<Value>() {
            Ok(Value::Object(map)) => Some(Self::from_map(&map)),
            _ => None,
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let text = |field: &str| map.get(field).and_then(Value::as_str).map(str::to_owned);
        Self {
            title: text("title"),
            body: text("body"),
            icon: text("icon"),
            badge: text("badge"),
            url: text("url"),
            actions: map.get("actions").cloned(),
        }
    }
}

/// Fully resolved notification fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Absolute icon URL.
    pub icon: String,
    /// Absolute badge URL.
    pub badge: String,
    /// Click target, possibly relative to the scope.
    pub url: String,
}

impl NotificationDefaults {
    /// Resolves the defaults against `scope`.
    pub fn content(&self, scope: &Url) -> NotificationContent {
        NotificationContent {
            title: self.title.clone(),
            body: self.body.clone(),
            icon: resolve_asset(scope, &self.icon),
            badge: resolve_asset(scope, &self.badge),
            url: self.url.clone(),
        }
    }
}

fn resolve_asset(scope: &Url, path: &str) -> String {
    scope
        .join(path)
        .map(String::from)
        .unwrap_or_else(|_| path.to_string())
}

/// Fills every field missing from `partial` from `defaults`.
///
/// Title and body fall back only when absent; icon, badge and url also fall
/// back when empty.
pub fn apply_defaults(partial: PushPayload, defaults: &NotificationContent) -> NotificationContent {
    let present = |value: Option<String>| value.filter(|value| !value.is_empty());
    NotificationContent {
        title: partial.title.unwrap_or_else(|| defaults.title.clone()),
        body: partial.body.unwrap_or_else(|| defaults.body.clone()),
        icon: present(partial.icon).unwrap_or_else(|| defaults.icon.clone()),
        badge: present(partial.badge).unwrap_or_else(|| defaults.badge.clone()),
        url: present(partial.url).unwrap_or_else(|| defaults.url.clone()),
    }
}

/// Builds the notification shown for a push message.
///
/// A payload that is not a JSON object is shown with the default fields and
/// its raw text as the body.
pub fn build_notification(
    data: Option<&PushData>,
    scope: &Url,
    defaults: &NotificationDefaults,
) -> Notification {
    let fallback = defaults.content(scope);
    let content = match data {
        None => fallback,
        Some(data) => match PushPayload::decode(data) {
            Some(payload) => apply_defaults(payload, &fallback),
            None => {
                debug!("push payload is not a JSON object, using it as body text");
                NotificationContent {
                    body: data.text(),
                    ..fallback
                }
            }
        },
    };

    Notification {
        title: content.title,
        options: NotificationOptions {
            body: content.body,
            icon: content.icon,
            badge: content.badge,
            vibrate: defaults.vibrate.clone(),
            data: NotificationData {
                url: Some(content.url),
            },
            actions: vec![defaults.action.clone()],
            require_interaction: false,
        },
    }
}
