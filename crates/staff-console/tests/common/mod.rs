//! In-process fake of the restaurant backend, served by axum on an ephemeral port.
#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN: &str = "tok-123";
pub const PASSWORD: &str = "secret";

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub bearer: Option<String>,
    pub accept: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Backend {
    pub ready: Vec<Value>,
    pub kds: Vec<Value>,
    /// When set, `GET /api/orders/ready` answers 503 with this message.
    pub ready_failure: Option<String>,
    pub requests: Vec<Recorded>,
}

pub type Shared = Arc<Mutex<Backend>>;

impl Backend {
    pub fn shared() -> Shared {
        Arc::new(Mutex::new(Backend::default()))
    }
}

pub fn ready_order(id: u64, table: Value) -> Value {
    json!({ "order_id": id, "table_number": table, "total_price": "12.50" })
}

pub fn kds_order(id: u64, placed: &str, status: &str) -> Value {
    json!({
        "order_id": id,
        "table_number": 4,
        "order_type": "dine-in",
        "order_date_time": placed,
        "order_status": status,
        "items": [{ "menu_item_name": "Shiro", "quantity": 2, "excluded_ingredients": [3] }],
    })
}

pub fn requests_to(backend: &Shared, method: &str, path: &str) -> Vec<Recorded> {
    backend
        .lock()
        .unwrap()
        .requests
        .iter()
        .filter(|r| r.method == method && r.path == path)
        .cloned()
        .collect()
}

/// Starts the fake backend and returns its base URL.
pub async fn serve(backend: Shared) -> String {
    let app = Router::new()
        .route("/api/orders/ready", get(ready_orders))
        .route("/api/orders/kds", get(kds_orders))
        .route("/api/orders/{id}/status", patch(update_status))
        .route("/api/orders/{id}/payment-status", put(mark_paid))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/forgot-password", post(forgot_password))
        .route("/api/reset-password", post(reset_password))
        .route("/api/user/profile", get(profile))
        .route("/api/tags", get(tags))
        .route("/api/categories", get(categories))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Polls `check` every 20 ms until it returns true, for at most two seconds.
pub async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not met within two seconds");
}

fn record(backend: &Shared, method: &'static str, path: String, headers: &HeaderMap, body: Option<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let bearer = header("authorization").and_then(|v| v.strip_prefix("Bearer ").map(str::to_string));
    backend.lock().unwrap().requests.push(Recorded {
        method,
        path,
        bearer,
        accept: header("accept"),
        body,
    });
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthenticated." }))).into_response()
}

async fn ready_orders(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    record(&backend, "GET", "/api/orders/ready".into(), &headers, None);
    let state = backend.lock().unwrap();
    match &state.ready_failure {
        Some(message) => {
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "message": message }))).into_response()
        }
        None => Json(json!({ "ready_orders": state.ready })).into_response(),
    }
}

async fn kds_orders(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    record(&backend, "GET", "/api/orders/kds".into(), &headers, None);
    let state = backend.lock().unwrap();
    Json(json!({ "orders": state.kds })).into_response()
}

async fn update_status(
    State(backend): State<Shared>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&backend, "PATCH", format!("/api/orders/{id}/status"), &headers, Some(body.clone()));
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = backend.lock().unwrap();
    match state.kds.iter_mut().find(|o| o["order_id"] == id) {
        Some(order) => {
            order["order_status"] = body["order_status"].clone();
            Json(json!({ "message": "Order status updated" })).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Order not found" }))).into_response(),
    }
}

async fn mark_paid(State(backend): State<Shared>, Path(id): Path<u64>, headers: HeaderMap) -> Response {
    record(&backend, "PUT", format!("/api/orders/{id}/payment-status"), &headers, None);
    StatusCode::NO_CONTENT.into_response()
}

async fn login(State(backend): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    record(&backend, "POST", "/api/login".into(), &headers, Some(body.clone()));
    if body["password"] == PASSWORD {
        Json(json!({ "token": TOKEN, "user": { "id": 7 } })).into_response()
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn logout(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    record(&backend, "POST", "/api/logout".into(), &headers, None);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "message": "Logged out" })).into_response()
}

async fn forgot_password(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&backend, "POST", "/api/forgot-password".into(), &headers, Some(body));
    Json(json!({ "message": "Reset code sent" })).into_response()
}

async fn reset_password(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&backend, "POST", "/api/reset-password".into(), &headers, Some(body));
    Json(json!({ "message": "Password reset" })).into_response()
}

async fn profile(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    record(&backend, "GET", "/api/user/profile".into(), &headers, None);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "id": 7, "name": "Sam", "email": "sam@example.com", "role": "staff" })).into_response()
}

async fn tags(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    record(&backend, "GET", "/api/tags".into(), &headers, None);
    Json(json!([{ "id": 1, "name": "Vegan" }, { "id": 2, "name": "Spicy" }])).into_response()
}

async fn categories(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    record(&backend, "GET", "/api/categories".into(), &headers, None);
    Json(json!({ "categories": [{ "id": 3, "name": "Mains", "sort": 1 }] })).into_response()
}
