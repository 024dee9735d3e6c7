//! # Kitchen Board
//!
//! State behind the kitchen display (KDS): the last polled order list, split into an
//! "in progress" and a "completed" tab, and the status buttons each order offers.
//!
//! - [`board`] - [`Board`], tabs, counts, allowed transitions, `time_since`
//! - [`behavior`] - [`KitchenBoard`], the actor behaviour
//! - [`error`] - [`KitchenError`]

pub mod behavior;
pub mod board;
pub mod error;

pub use behavior::*;
pub use board::*;
pub use error::*;

use actor_framework::{Actor, ActorHandle};

/// Creates a new kitchen-board actor and its handle.
pub fn new() -> (Actor<KitchenBoard>, ActorHandle<KitchenBoard>) {
    Actor::new(KitchenBoard::default(), 32)
}
