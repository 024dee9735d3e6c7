//! Typed wrappers around the actor handles of the two screens.

pub mod display_client;
pub mod kitchen_client;

pub use display_client::*;
pub use kitchen_client::*;
