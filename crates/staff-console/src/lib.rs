//! # Staff Console
//!
//! The client side of a restaurant's staff screens, built on `actor_framework`.
//!
//! - [`ready_display`]: the "Order Ready" pickup screen and its rotation controller
//! - [`kitchen_board`]: the kitchen display (KDS) with its tabs and status buttons
//! - [`clients`]: typed wrappers around both actors' handles
//! - [`polling`]: fixed-interval fetchers that feed the screens
//! - [`api`]: the backend REST client
//! - [`session`]: persisted token and UI state
//! - [`shifts`]: dashboard summaries of shifts and attendance
//! - [`lifecycle`]: [`ConsoleSystem`](lifecycle::ConsoleSystem), which starts and stops it all
//!
//! ## Testing
//!
//! See [`actor_framework::mock`] for testing clients without spawning actors, and the
//! `tests/` directory for runs against an in-process fake backend.

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod kitchen_board;
pub mod lifecycle;
pub mod model;
pub mod polling;
pub mod ready_display;
pub mod session;
pub mod shifts;

pub use error::ConsoleError;
