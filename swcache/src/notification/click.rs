use tracing::{debug, warn};
use url::Url;

use super::Notification;
use crate::error::HostError;
use crate::host::{ClientId, ClientQuery, Host};

/// What a notification click led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An open page already showed the target and was focused.
    Focused(ClientId),
    /// A new window was opened at the target.
    Opened(Url),
    /// The host cannot open windows; nothing happened.
    Unsupported,
}

/// Resolves a stored click target against `scope`.
///
/// Targets that do not parse resolve to the scope itself.
pub fn resolve_target(raw: Option<&str>, scope: &Url) -> Url {
    raw.filter(|raw| !raw.is_empty())
        .and_then(|raw| scope.join(raw).ok())
        .unwrap_or_else(|| scope.clone())
}

/// Handles activation of `notification`.
///
/// The notification is closed, then a page already at the resolved target is
/// focused; otherwise a new window is opened there.
pub async fn handle_click<H>(host: &H, notification: &Notification) -> Result<ClickOutcome, HostError>
where
    H: Host + ?Sized,
{
    if let Err(err) = host.close_notification(notification).await {
        warn!(error = %err, "failed to close notification");
    }

    let target = resolve_target(notification.target(), host.scope());
    let clients = host.match_all(ClientQuery::all_windows()).await?;
    if let Some(client) = clients.into_iter().find(|client| client.url == target) {
        debug!(client = %client.id, %target, "focusing existing window");
        host.focus(&client.id).await?;
        return Ok(ClickOutcome::Focused(client.id));
    }

    match host.open_window(&target).await {
        Ok(()) => {
            debug!(%target, "opened window");
            Ok(ClickOutcome::Opened(target))
        }
        Err(HostError::Unsupported(capability)) => {
            debug!(capability, "host cannot open windows");
            Ok(ClickOutcome::Unsupported)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_resolve_against_the_scope() {
        let scope = Url::parse("https://news.example/morningnews/").unwrap();
        assert_eq!(
            resolve_target(Some("archive.html"), &scope).as_str(),
            "https://news.example/morningnews/archive.html"
        );
        assert_eq!(resolve_target(Some("./"), &scope), scope);
        assert_eq!(resolve_target(None, &scope), scope);
        assert_eq!(
            resolve_target(Some("https://other.example/x"), &scope).as_str(),
            "https://other.example/x"
        );
    }

    #[test]
    fn unparseable_targets_fall_back_to_the_scope() {
        let scope = Url::parse("https://news.example/morningnews/").unwrap();
        assert_eq!(resolve_target(Some("http://[::1"), &scope), scope);
    }
}
