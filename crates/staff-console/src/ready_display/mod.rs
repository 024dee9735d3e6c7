//! # Ready Display
//!
//! The "Order Ready" pickup screen. Up to two orders are shown at a time, each for a
//! fixed dwell (two minutes). When an order's dwell elapses it leaves the screen for
//! good and the oldest waiting order takes its slot.
//!
//! ## Structure
//!
//! - [`rotation`] - [`Rotation`], the pure queue/display/history state
//! - [`behavior`] - [`ReadyRotation`], the actor behaviour: sequence guard, error flag, dwell timers
//! - [`error`] - [`DisplayError`]
//! - [`new()`] - Factory function that creates the actor and its handle
//!
//! ## Usage
//!
//! ```rust
//! use actor_framework::ActorClient;
//! use staff_console::clients::DisplayClient;
//! use staff_console::model::ReadyOrder;
//! use staff_console::ready_display;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, handle) = ready_display::new(2, Duration::from_secs(120));
//!     tokio::spawn(actor.run(()));
//!     let display = DisplayClient::new(handle);
//!
//!     let orders = vec![
//!         ReadyOrder::new(1, Some("4")),
//!         ReadyOrder::new(2, None),
//!         ReadyOrder::new(3, Some("9")),
//!     ];
//!     display.on_poll(1, orders).await?;
//!
//!     let snapshot = display.snapshot().await?;
//!     assert_eq!(snapshot.displayed.len(), 2);
//!     assert_eq!(snapshot.queued_count, 1);
//!
//!     display.dispose().await?;
//!     Ok(())
//! }
//! ```

pub mod behavior;
pub mod error;
pub mod rotation;

pub use behavior::*;
pub use error::*;
pub use rotation::{format_remaining, DisplayEntry, Rotation};

use actor_framework::{Actor, ActorHandle};
use std::time::Duration;

/// Creates a new ready-display actor and its handle.
pub fn new(slots: usize, dwell: Duration) -> (Actor<ReadyRotation>, ActorHandle<ReadyRotation>) {
    Actor::new(ReadyRotation::new(slots, dwell), 32)
}
