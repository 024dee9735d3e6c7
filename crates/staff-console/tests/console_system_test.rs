mod common;

use actor_framework::ActorClient;
use common::{Backend, TOKEN};
use serde_json::json;
use staff_console::config::ConsoleConfig;
use staff_console::kitchen_board::{KitchenError, KitchenTab};
use staff_console::lifecycle::ConsoleSystem;
use staff_console::model::{OrderId, OrderStatus};
use staff_console::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;

async fn start(backend: &common::Shared) -> ConsoleSystem {
    let config = ConsoleConfig {
        base_url: common::serve(backend.clone()).await,
        ready_poll_interval: Duration::from_millis(50),
        kitchen_poll_interval: Duration::from_millis(50),
        request_timeout: Duration::from_secs(2),
        ..ConsoleConfig::default()
    };
    let session = SessionStore::in_memory();
    session.set_auth_token(TOKEN).unwrap();
    ConsoleSystem::new(&config, Arc::new(session)).unwrap()
}

#[tokio::test]
async fn test_ready_screen_polls_while_active() {
    let backend = Backend::shared();
    backend.lock().unwrap().ready = (1..=3).map(|id| common::ready_order(id, json!(id))).collect();
    let mut system = start(&backend).await;

    assert!(system.display.snapshot().await.unwrap().loading);
    system.activate_ready();
    assert!(system.is_ready_active());

    let display = system.display.clone();
    common::eventually(|| {
        let display = display.clone();
        async move { !display.snapshot().await.unwrap().loading }
    })
    .await;
    let snap = system.display.snapshot().await.unwrap();
    assert_eq!(snap.displayed_ids(), vec![OrderId(1), OrderId(2)]);
    assert_eq!(snap.queued_count, 1);

    // A failing backend flags the screen but leaves the orders up.
    backend.lock().unwrap().ready_failure = Some("Database unavailable".into());
    common::eventually(|| {
        let display = display.clone();
        async move { display.snapshot().await.unwrap().error.is_some() }
    })
    .await;
    let snap = system.display.snapshot().await.unwrap();
    assert_eq!(snap.error.as_deref(), Some("503: Database unavailable"));
    assert_eq!(snap.displayed_ids(), vec![OrderId(1), OrderId(2)]);

    backend.lock().unwrap().ready_failure = None;
    common::eventually(|| {
        let display = display.clone();
        async move { display.snapshot().await.unwrap().error.is_none() }
    })
    .await;

    system.deactivate_ready();
    assert!(!system.is_ready_active());
    let polls = common::requests_to(&backend, "GET", "/api/orders/ready").len();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(common::requests_to(&backend, "GET", "/api/orders/ready").len(), polls);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_refresh_without_activation() {
    let backend = Backend::shared();
    backend.lock().unwrap().ready = vec![common::ready_order(8, json!("2"))];
    let system = start(&backend).await;

    system.refresh_ready().await;

    let snap = system.display.snapshot().await.unwrap();
    assert_eq!(snap.displayed_ids(), vec![OrderId(8)]);
    assert!(!system.is_ready_active());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_kitchen_status_round_trip() {
    let backend = Backend::shared();
    backend.lock().unwrap().kds = vec![
        common::kds_order(2, "2024-05-08 12:10:00", "pending"),
        common::kds_order(1, "2024-05-08 12:00:00", "pending"),
        common::kds_order(3, "2024-05-08 11:00:00", "completed"),
        common::kds_order(4, "2024-05-08 11:30:00", "canceled"),
    ];
    let mut system = start(&backend).await;
    system.activate_kitchen();

    let kitchen = system.kitchen.clone();
    common::eventually(|| {
        let kitchen = kitchen.clone();
        async move { !kitchen.view(KitchenTab::InProgress).await.unwrap().loading }
    })
    .await;
    system.deactivate_kitchen();

    let view = system.kitchen.view(KitchenTab::InProgress).await.unwrap();
    let ids: Vec<OrderId> = view.orders.iter().map(|o| o.order_id).collect();
    assert_eq!(ids, vec![OrderId(1), OrderId(2)]);
    assert_eq!(view.counts.pending, 2);
    assert_eq!(view.counts.completed, 1);
    assert!(view.last_refreshed.is_some());

    system
        .kitchen
        .set_status(&system.api, OrderId(1), OrderStatus::Processing)
        .await
        .unwrap();
    let patches = common::requests_to(&backend, "PATCH", "/api/orders/1/status");
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].body, Some(json!({ "order_status": "processing" })));
    let view = system.kitchen.view(KitchenTab::InProgress).await.unwrap();
    assert_eq!(view.counts.processing, 1);

    // Pending cannot jump straight to completed; nothing reaches the backend.
    let rejected = system
        .kitchen
        .set_status(&system.api, OrderId(2), OrderStatus::Completed)
        .await;
    assert!(matches!(rejected, Err(KitchenError::InvalidTransition { .. })));
    assert!(common::requests_to(&backend, "PATCH", "/api/orders/2/status").is_empty());

    let completed = system.kitchen.view(KitchenTab::Completed).await.unwrap();
    assert_eq!(completed.orders.len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_disposes_both_screens() {
    let backend = Backend::shared();
    let mut system = start(&backend).await;
    system.activate_ready();
    system.activate_kitchen();

    let display = system.display.clone();
    let kitchen = system.kitchen.clone();
    system.shutdown().await.unwrap();

    assert!(!display.is_running());
    assert!(!kitchen.is_running());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let config = ConsoleConfig {
        display_slots: 0,
        ..ConsoleConfig::default()
    };
    let result = ConsoleSystem::new(&config, Arc::new(SessionStore::in_memory()));
    assert!(matches!(result, Err(staff_console::ConsoleError::Config(_))));
}
