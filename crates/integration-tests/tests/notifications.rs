//! Optimistic notification edits and background polling.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ybs_admin::api::ApiError;
use ybs_core::NotificationId;
use ybs_integration_tests::{fail, live_console, ok};

fn feed(unread: &[&str]) -> Value {
    let notifications: Vec<Value> = unread
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "type": "system",
                "title": "Heads up",
                "message": "Something happened",
                "isRead": false,
                "createdAt": "2024-06-01T08:00:00Z"
            })
        })
        .collect();
    json!({"notifications": notifications, "unreadCount": unread.len()})
}

async fn mount_feed(server: &MockServer, unread: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/admin/notifications"))
        .respond_with(ok(feed(unread)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_mark_read_survives_backend_failure() {
    let server = MockServer::start().await;
    mount_feed(&server, &["ntf_1", "ntf_2"]).await;
    Mock::given(method("PATCH"))
        .and(path("/admin/notifications/ntf_1/read"))
        .respond_with(fail(500, "Write failed"))
        .expect(1)
        .mount(&server)
        .await;

    let console = live_console(&server);
    let center = console.notifications();
    center.refresh().await;

    let handle = center.mark_read(&NotificationId::new("ntf_1"));
    // Applied before the request settles.
    assert_eq!(center.snapshot().data.unread_count, 1);

    let result = handle.await.unwrap();
    assert!(matches!(result, Err(ApiError::Server { status: 500, .. })));

    let data = center.snapshot().data;
    assert_eq!(data.unread_count, 1);
    assert!(data.notifications.iter().any(|n| n.id.as_str() == "ntf_1" && n.is_read));
}

#[tokio::test]
async fn test_mark_all_read_and_delete() {
    let server = MockServer::start().await;
    mount_feed(&server, &["ntf_1", "ntf_2", "ntf_3"]).await;
    Mock::given(method("PATCH"))
        .and(path("/admin/notifications/read-all"))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/notifications/ntf_2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let console = live_console(&server);
    let center = console.notifications();
    center.refresh().await;

    center.mark_all_read().await.unwrap().unwrap();
    assert_eq!(center.snapshot().data.unread_count, 0);

    center
        .delete(&NotificationId::new("ntf_2"))
        .await
        .unwrap()
        .unwrap();
    let data = center.snapshot().data;
    assert_eq!(data.notifications.len(), 2);
    assert!(data.notifications.iter().all(|n| n.id.as_str() != "ntf_2"));
}

#[tokio::test]
async fn test_polling_picks_up_new_notifications() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/notifications"))
        .respond_with(ok(feed(&["ntf_1"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_feed(&server, &["ntf_1", "ntf_2"]).await;

    // Poll interval is 50ms in the test console.
    let console = live_console(&server);
    let center = console.notifications();
    assert_eq!(center.refresh().await.data.unread_count, 1);

    center.start_polling();
    assert!(center.is_polling());
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(center.snapshot().data.unread_count, 2);

    center.stop_polling();
    assert!(!center.is_polling());
}

#[tokio::test]
async fn test_restarting_polling_keeps_one_poller() {
    let server = MockServer::start().await;
    mount_feed(&server, &[]).await;

    let console = live_console(&server);
    let center = console.notifications();
    center.start_polling();
    center.start_polling();
    assert!(center.is_polling());
    center.stop_polling();
    assert!(!center.is_polling());

    // Nothing fires once stopped.
    tokio::time::sleep(Duration::from_millis(20)).await;
    let before = server.received_requests().await.unwrap().len();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(server.received_requests().await.unwrap().len(), before);
}
