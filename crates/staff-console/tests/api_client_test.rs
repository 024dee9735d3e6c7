mod common;

use common::{Backend, PASSWORD, TOKEN};
use serde_json::json;
use staff_console::api::{ApiClient, ApiError, CatalogKind};
use staff_console::model::{OrderId, OrderStatus};
use staff_console::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;

fn client(base_url: &str, session: Arc<SessionStore>) -> ApiClient {
    ApiClient::new(base_url, Duration::from_secs(5), session).unwrap()
}

fn signed_in() -> Arc<SessionStore> {
    let session = SessionStore::in_memory();
    session.set_auth_token(TOKEN).unwrap();
    Arc::new(session)
}

#[tokio::test]
async fn test_ready_orders_sends_token_and_accept() {
    let backend = Backend::shared();
    backend.lock().unwrap().ready = vec![
        common::ready_order(3, json!("12")),
        common::ready_order(4, json!(7)),
        common::ready_order(5, json!(null)),
    ];
    let api = client(&common::serve(backend.clone()).await, signed_in());

    let orders = api.ready_orders().await.unwrap();

    let tables: Vec<Option<&str>> = orders.iter().map(|o| o.table_number.as_deref()).collect();
    assert_eq!(tables, vec![Some("12"), Some("7"), None]);
    assert_eq!(orders[0].order_id, OrderId(3));
    assert_eq!(orders[0].extra["total_price"], "12.50");

    let seen = common::requests_to(&backend, "GET", "/api/orders/ready");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].bearer.as_deref(), Some(TOKEN));
    assert_eq!(seen[0].accept.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_error_message_comes_from_body() {
    let backend = Backend::shared();
    backend.lock().unwrap().ready_failure = Some("Kitchen offline".into());
    let api = client(&common::serve(backend).await, signed_in());

    match api.ready_orders().await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Kitchen offline");
        }
        other => panic!("Expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let backend = Backend::shared();
    let api = client(
        &common::serve(backend.clone()).await,
        Arc::new(SessionStore::in_memory()),
    );

    let result = api.profile().await;

    assert!(matches!(result, Err(ApiError::Unauthenticated)));
    assert_eq!(result.unwrap_err().status(), Some(401));
    let seen = common::requests_to(&backend, "GET", "/api/user/profile");
    assert_eq!(seen[0].bearer, None);
}

#[tokio::test]
async fn test_login_and_logout_update_the_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let session = Arc::new(SessionStore::open(&path).unwrap());
    let api = client(&common::serve(Backend::shared()).await, session.clone());

    match api.login("sam@example.com", "wrong").await {
        Err(ApiError::Status { status: 422, message }) => assert_eq!(message, "Invalid credentials"),
        other => panic!("Expected 422, got {other:?}"),
    }
    assert!(!session.is_authenticated());

    api.login("sam@example.com", PASSWORD).await.unwrap();
    assert!(session.is_authenticated());
    assert_eq!(SessionStore::open(&path).unwrap().auth_token().as_deref(), Some(TOKEN));

    let profile = api.profile().await.unwrap();
    assert_eq!(profile.id, 7);
    assert_eq!(profile.name, "Sam");

    api.logout().await.unwrap();
    assert!(!session.is_authenticated());
    assert_eq!(SessionStore::open(&path).unwrap().auth_token(), None);
}

#[tokio::test]
async fn test_failed_logout_still_clears_the_token() {
    let session = SessionStore::in_memory();
    session.set_auth_token("expired").unwrap();
    let session = Arc::new(session);
    let api = client(&common::serve(Backend::shared()).await, session.clone());

    assert!(matches!(api.logout().await, Err(ApiError::Unauthenticated)));
    assert_eq!(session.auth_token(), None);
}

#[tokio::test]
async fn test_unwritable_session_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let session = Arc::new(SessionStore::open(dir.path().join("sess").join("session.json")).unwrap());
    std::fs::write(dir.path().join("sess"), b"").unwrap();
    let backend = Backend::shared();
    let api = client(&common::serve(backend.clone()).await, session.clone());

    let login = api.login("sam@example.com", PASSWORD).await;
    assert!(matches!(login, Err(ApiError::Session(_))));
    assert_eq!(session.auth_token().as_deref(), Some(TOKEN));

    let logout = api.logout().await;
    assert!(matches!(logout, Err(ApiError::Session(_))));
    assert_eq!(session.auth_token(), None);
    assert!(!session.is_authenticated());
    assert_eq!(common::requests_to(&backend, "POST", "/api/logout")[0].bearer.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_update_order_status_sends_patch_body() {
    let backend = Backend::shared();
    backend.lock().unwrap().kds = vec![common::kds_order(9, "2024-05-08 12:00:00", "pending")];
    let api = client(&common::serve(backend.clone()).await, signed_in());

    let ack = api
        .update_order_status(OrderId(9), OrderStatus::Processing)
        .await
        .unwrap();
    assert_eq!(ack.message.as_deref(), Some("Order status updated"));

    let seen = common::requests_to(&backend, "PATCH", "/api/orders/9/status");
    assert_eq!(seen[0].body, Some(json!({ "order_status": "processing" })));

    let orders = api.kds_orders().await.unwrap();
    assert_eq!(orders[0].order_status, OrderStatus::Processing);
    assert_eq!(orders[0].items[0].excluded_ingredients, vec![3]);

    let missing = api.update_order_status(OrderId(10), OrderStatus::Ready).await;
    assert!(matches!(missing, Err(ApiError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_empty_acknowledgement_is_accepted() {
    let api = client(&common::serve(Backend::shared()).await, signed_in());

    let ack = api.mark_paid(OrderId(2)).await.unwrap();
    assert_eq!(ack.message, None);
}

#[tokio::test]
async fn test_catalog_lists_bare_and_wrapped() {
    let api = client(&common::serve(Backend::shared()).await, signed_in());

    let tags = api.catalog(CatalogKind::Tags).await.unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Vegan", "Spicy"]);

    let categories = api.catalog(CatalogKind::Categories).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].extra["sort"], 1);
}

#[tokio::test]
async fn test_password_reset_uses_remembered_email() {
    let backend = Backend::shared();
    let session = Arc::new(SessionStore::in_memory());
    let api = client(&common::serve(backend.clone()).await, session.clone());

    api.forgot_password("sam@example.com").await.unwrap();
    assert_eq!(session.email_to_reset().as_deref(), Some("sam@example.com"));

    api.reset_password("481516", "n3w-pass", "n3w-pass").await.unwrap();

    let seen = common::requests_to(&backend, "POST", "/api/reset-password");
    assert_eq!(
        seen[0].body,
        Some(json!({
            "email": "sam@example.com",
            "token": "481516",
            "password": "n3w-pass",
            "password_confirmation": "n3w-pass",
        }))
    );
    assert_eq!(session.email_to_reset(), None);
}

#[test]
fn test_rejects_non_http_base_url() {
    let result = ApiClient::new(
        "ftp://example.com",
        Duration::from_secs(1),
        Arc::new(SessionStore::in_memory()),
    );
    assert!(matches!(result, Err(ApiError::BaseUrl(_))));
}

#[test]
fn test_trailing_slash_is_dropped_from_base_url() {
    let api = ApiClient::new(
        "http://127.0.0.1:8000/",
        Duration::from_secs(1),
        Arc::new(SessionStore::in_memory()),
    )
    .unwrap();
    assert!(format!("{api:?}").contains("\"http://127.0.0.1:8000\""));
}
