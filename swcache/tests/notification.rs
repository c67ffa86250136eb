//! Push display and notification click handling.

mod common;

use common::{Harness, HostCall, TestHost, TestNetwork, at};
use pretty_assertions::assert_eq;
use swcache::notification::build_notification;
use swcache::{
    ClickOutcome, ClientId, ClientQuery, HostError, Notification, NotificationDefaults, PushData,
    WorkerConfig, WorkerError,
};
use url::Url;

fn harness(host: TestHost) -> Harness {
    Harness::new(TestNetwork::new(), host, WorkerConfig::default())
}

fn notification(data: &str) -> Notification {
    build_notification(
        Some(&PushData::from(data.to_string())),
        &common::scope(),
        &NotificationDefaults::default(),
    )
}

#[tokio::test]
async fn push_shows_the_composed_notification() {
    let harness = harness(TestHost::new());

    let shown = harness
        .worker
        .push(Some(&PushData::from(r#"{"title":"A","body":"B"}"#)))
        .await
        .unwrap();

    assert_eq!(shown.title, "A");
    assert_eq!(shown.options.body, "B");
    assert_eq!(shown.options.icon, at("logo.png"));
    assert_eq!(shown.target(), Some("./"));
    assert_eq!(harness.host.calls(), vec![HostCall::Show("A".to_string())]);
}

#[tokio::test]
async fn push_without_data_uses_defaults() {
    let harness = harness(TestHost::new());

    let shown = harness.worker.push(None).await.unwrap();

    assert_eq!(shown.title, "모닝 뉴스");
    assert_eq!(shown.options.vibrate, vec![200, 100, 200]);
    assert!(!shown.options.require_interaction);
}

#[tokio::test]
async fn click_without_matching_window_opens_the_target() {
    let harness = harness(TestHost::new().with_client("home", "./"));

    let outcome = harness
        .worker
        .notification_click(&notification(r#"{"url":"archive.html"}"#))
        .await
        .unwrap();

    let target = Url::parse(&at("archive.html")).unwrap();
    assert_eq!(outcome, ClickOutcome::Opened(target.clone()));
    assert_eq!(
        harness.host.calls(),
        vec![
            HostCall::Close("모닝 뉴스".to_string()),
            HostCall::MatchAll(ClientQuery::all_windows()),
            HostCall::OpenWindow(target),
        ]
    );
}

#[tokio::test]
async fn click_focuses_a_window_already_at_the_target() {
    let harness = harness(
        TestHost::new()
            .with_client("home", "./")
            .with_client("archive", "archive.html"),
    );

    let outcome = harness
        .worker
        .notification_click(&notification(r#"{"url":"archive.html"}"#))
        .await
        .unwrap();

    assert_eq!(outcome, ClickOutcome::Focused(ClientId::new("archive")));
    assert!(harness
        .host
        .calls()
        .contains(&HostCall::Focus(ClientId::new("archive"))));
}

#[tokio::test]
async fn default_target_is_the_scope_root() {
    let harness = harness(TestHost::new().with_client("home", "./"));

    let outcome = harness
        .worker
        .notification_click(&notification("plain text"))
        .await
        .unwrap();

    assert_eq!(outcome, ClickOutcome::Focused(ClientId::new("home")));
}

#[tokio::test]
async fn unsupported_window_opening_is_silent() {
    let harness = harness(TestHost::new().without_windows());

    let outcome = harness
        .worker
        .notification_click(&notification(r#"{"url":"archive.html"}"#))
        .await
        .unwrap();

    assert_eq!(outcome, ClickOutcome::Unsupported);
}

#[test]
fn host_failures_are_worker_errors() {
    let err: WorkerError = HostError::Failed("display denied".to_string()).into();
    assert!(matches!(err, WorkerError::Host(HostError::Failed(_))));
}
