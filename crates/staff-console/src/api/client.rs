//! # Backend API Client
//!
//! Typed calls against the restaurant backend. Every request carries
//! `Accept: application/json` and, when the session holds one, `Authorization: Bearer <token>`.
//!
//! The token is read from the [`SessionStore`] on every request, so a login performed
//! through the same client is picked up immediately by the pollers.

use super::error::ApiError;
use super::types::*;
use crate::config::parse_base_url;
use crate::model::{
    AttendanceRecord, KitchenOrder, OrderId, OrderStatus, ReadyOrder, Shift, StaffProfile,
};
use crate::session::SessionStore;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<SessionStore>,
    ) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)
            .map_err(|reason| ApiError::BaseUrl(format!("{base_url}: {reason}")))?
            .as_str()
            .trim_end_matches('/')
            .to_string();
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    // =========================================================================
    // PLUMBING
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .header(ACCEPT, "application/json");
        match self.session.auth_token() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Sends the request and returns the raw body of a 2xx answer.
    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(body.to_vec());
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthenticated);
        }
        let message = serde_json::from_slice::<Ack>(&body)
            .ok()
            .and_then(|ack| ack.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(self.request(Method::GET, path)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        let body = self.send(self.request(method, path).json(payload)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// For calls whose answer is only an acknowledgement. An empty body is accepted.
    async fn send_ack(&self, builder: RequestBuilder) -> Result<Ack, ApiError> {
        let body = self.send(builder).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Ack::default());
        }
        Ok(serde_json::from_slice(&body)?)
    }

    // =========================================================================
    // DISPLAY SCREENS
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn ready_orders(&self) -> Result<Vec<ReadyOrder>, ApiError> {
        let envelope: ReadyOrdersEnvelope = self.get_json("/api/orders/ready").await?;
        debug!(count = envelope.ready_orders.len(), "Fetched ready orders");
        Ok(envelope.ready_orders)
    }

    #[instrument(skip(self))]
    pub async fn kds_orders(&self) -> Result<Vec<KitchenOrder>, ApiError> {
        let envelope: KitchenOrdersEnvelope = self.get_json("/api/orders/kds").await?;
        debug!(count = envelope.orders.len(), "Fetched kitchen orders");
        Ok(envelope.orders)
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Ack, ApiError> {
        let builder = self
            .request(Method::PATCH, &format!("/api/orders/{order_id}/status"))
            .json(&StatusUpdate {
                order_status: status,
            });
        self.send_ack(builder).await
    }

    // =========================================================================
    // ORDERS
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<OrderSummary>, ApiError> {
        let envelope: OrdersEnvelope = self.get_json("/api/orders").await?;
        Ok(envelope.orders)
    }

    #[instrument(skip(self))]
    pub async fn order(&self, order_id: OrderId) -> Result<serde_json::Value, ApiError> {
        self.get_json(&format!("/api/orders/{order_id}")).await
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<Ack, ApiError> {
        self.send_ack(self.request(Method::POST, "/api/orders").json(draft))
            .await
    }

    /// Places an order without a staff session (walk-in kiosk flow).
    #[instrument(skip(self))]
    pub async fn create_guest_order(&self, draft: &OrderDraft) -> Result<Ack, ApiError> {
        self.send_ack(self.request(Method::POST, "/api/orders/guest").json(draft))
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, order_id: OrderId, draft: &OrderDraft) -> Result<Ack, ApiError> {
        let path = format!("/api/orders/{order_id}");
        self.send_ack(self.request(Method::PUT, &path).json(draft))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId) -> Result<Ack, ApiError> {
        let path = format!("/api/orders/{order_id}");
        self.send_ack(self.request(Method::DELETE, &path)).await
    }

    #[instrument(skip(self))]
    pub async fn mark_paid(&self, order_id: OrderId) -> Result<Ack, ApiError> {
        let path = format!("/api/orders/{order_id}/payment-status");
        self.send_ack(self.request(Method::PUT, &path)).await
    }

    // =========================================================================
    // CATALOG
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn catalog(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, ApiError> {
        let list: CatalogList = self.get_json(&format!("/api/{kind}")).await?;
        Ok(list.into_items(kind)?)
    }

    #[instrument(skip(self))]
    pub async fn catalog_item(&self, kind: CatalogKind, id: u64) -> Result<CatalogItem, ApiError> {
        self.get_json(&format!("/api/{kind}/{id}")).await
    }

    #[instrument(skip(self, payload))]
    pub async fn create_catalog_item(
        &self,
        kind: CatalogKind,
        payload: &serde_json::Value,
    ) -> Result<Ack, ApiError> {
        let path = format!("/api/{kind}");
        self.send_ack(self.request(Method::POST, &path).json(payload))
            .await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_catalog_item(
        &self,
        kind: CatalogKind,
        id: u64,
        payload: &serde_json::Value,
    ) -> Result<Ack, ApiError> {
        let path = format!("/api/{kind}/{id}");
        self.send_ack(self.request(Method::PUT, &path).json(payload))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_catalog_item(&self, kind: CatalogKind, id: u64) -> Result<Ack, ApiError> {
        let path = format!("/api/{kind}/{id}");
        self.send_ack(self.request(Method::DELETE, &path)).await
    }

    // =========================================================================
    // STAFF
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<StaffProfile, ApiError> {
        self.get_json("/api/user/profile").await
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, name: &str) -> Result<Ack, ApiError> {
        self.send_json(Method::PUT, "/api/staff/update", &ProfileUpdate { name: name.trim() })
            .await
    }

    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> Result<Ack, ApiError> {
        let body = PasswordChange {
            current_password: current,
            new_password: new,
            new_password_confirmation: confirmation,
        };
        self.send_json(Method::POST, "/api/staff/change-password", &body)
            .await
    }

    #[instrument(skip(self))]
    pub async fn staff_shifts(&self, staff_id: u64) -> Result<Vec<Shift>, ApiError> {
        self.get_json(&format!("/api/staff-shifts/{staff_id}")).await
    }

    #[instrument(skip(self))]
    pub async fn attendance(&self, staff_id: u64) -> Result<Vec<AttendanceRecord>, ApiError> {
        let envelope: AttendanceEnvelope =
            self.get_json(&format!("/api/attendance/{staff_id}")).await?;
        Ok(envelope.attendance)
    }

    /// Asks the backend to record absences for shifts that were never clocked into.
    #[instrument(skip(self))]
    pub async fn mark_absent(&self) -> Result<Ack, ApiError> {
        self.send_ack(self.request(Method::POST, "/api/mark-absent"))
            .await
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// Logs in and stores the returned token in the session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response: LoginResponse = self
            .send_json(Method::POST, "/api/login", &Credentials { email, password })
            .await?;
        self.session.set_auth_token(response.token)?;
        Ok(())
    }

    /// Logs out. The in-memory token is cleared whatever the backend answers; a failure
    /// to rewrite the session file is reported ahead of a failed request.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.send_ack(self.request(Method::POST, "/api/logout")).await;
        self.session.clear_auth_token()?;
        if let Err(e) = &result {
            warn!(error = %e, "Logout request failed, local session cleared anyway");
        }
        result.map(|_| ())
    }

    /// Requests a reset code and remembers `email` for [`reset_password`](Self::reset_password).
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<Ack, ApiError> {
        let ack = self
            .send_json(Method::POST, "/api/forgot-password", &ForgotPassword { email })
            .await?;
        if let Err(e) = self.session.set_email_to_reset(email) {
            warn!(error = %e, "Failed to remember the reset email");
        }
        Ok(ack)
    }

    /// Completes a reset for the email remembered by [`forgot_password`](Self::forgot_password).
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        code: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<Ack, ApiError> {
        let email = self.session.email_to_reset().unwrap_or_default();
        let body = ResetPassword {
            email: &email,
            token: code,
            password,
            password_confirmation: confirmation,
        };
        let ack = self
            .send_json(Method::POST, "/api/reset-password", &body)
            .await?;
        if let Err(e) = self.session.clear_email_to_reset() {
            warn!(error = %e, "Failed to forget the reset email");
        }
        Ok(ack)
    }
}
