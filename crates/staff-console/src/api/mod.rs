//! # Backend API
//!
//! - [`client`] - [`ApiClient`], one method per backend endpoint
//! - [`types`] - request and response bodies
//! - [`error`] - [`ApiError`]

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{Ack, CatalogItem, CatalogKind, OrderDraft, OrderLine, OrderSummary, TableRef};
