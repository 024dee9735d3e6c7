//! Data shapes shared by the API client and the actors.
//!
//! Everything here is plain data with `serde` derives; rules live in the actors
//! and in [`shifts`](crate::shifts).

pub mod kitchen;
pub mod ready;
pub mod staff;

pub use kitchen::*;
pub use ready::*;
pub use staff::*;
