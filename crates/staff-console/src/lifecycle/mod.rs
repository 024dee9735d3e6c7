//! # System Lifecycle & Orchestration
//!
//! [`ConsoleSystem`] owns everything with a lifetime: the two screen actors, their
//! pollers, and the API client they share.
//!
//! ## Startup
//!
//! 1. Build the [`ApiClient`](crate::api::ApiClient) from the config and the session.
//! 2. Spawn the ready-display and kitchen-board actors (both `Context = ()`).
//! 3. Create one poller per screen, inactive. A screen starts polling when the caller
//!    activates it, the way a page starts fetching when it is opened.
//!
//! ## Shutdown
//!
//! Pollers are stopped first, so no fetch result can arrive mid-teardown. Then each actor
//! is sent an explicit `Stop` (which cancels its dwell timers) and its task is awaited.
//! Pollers hold client clones, so waiting for the channels to close would never finish.

pub mod console_system;

pub use console_system::*;
