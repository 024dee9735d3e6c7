//! # ActorBehavior Trait
//!
//! The `ActorBehavior` trait is the contract every stateful unit (the ready-display
//! rotation, the kitchen board, ...) implements to be driven by the generic [`Actor`](crate::Actor).
//!
//! # Architecture Note
//! The behaviour owns the *state* and the *rules*; the actor owns the *plumbing*
//! (mailbox, reply channels, timers, shutdown). Writing the loop once means every
//! behaviour gets the same sequential, lock-free processing for free.
//!
//! Associated types keep each actor strongly typed: a rotation handle only accepts
//! rotation requests and only hands back rotation replies.
//!
//! # Provided Methods (Hooks)
//! - [`ActorBehavior::on_start`]
//! - [`ActorBehavior::on_timer`]
//! - [`ActorBehavior::on_stop`]
//!
//! The defaults do nothing.

use crate::timers::Timers;
use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any actor state machine must implement to be run by [`Actor`](crate::Actor).
///
/// # Async & Context
/// Hooks are `#[async_trait]` so a behaviour may await other actors or I/O. The `Context`
/// is injected into `run()` rather than `new()` ("late binding"), which lets the host wire
/// dependencies created after the actor itself.
#[async_trait]
pub trait ActorBehavior: Send + 'static {
    /// Messages accepted by the actor.
    type Request: Send + Debug;

    /// Value returned for every handled request.
    type Reply: Send + Debug;

    /// Identity of a timer scheduled by this behaviour (e.g. an order id).
    type TimerKey: Eq + Hash + Clone + Send + Sync + Debug + Display + 'static;

    /// Runtime dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// The error type for this behaviour.
    ///
    /// One enum per actor rather than one per request: clients match on a single type,
    /// at the cost of each request technically being able to return any variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once before the first message is processed.
    async fn on_start(
        &mut self,
        _ctx: &Self::Context,
        _timers: &mut Timers<Self::TimerKey>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle one request. Requests are processed strictly one at a time.
    async fn handle(
        &mut self,
        request: Self::Request,
        ctx: &Self::Context,
        timers: &mut Timers<Self::TimerKey>,
    ) -> Result<Self::Reply, Self::Error>;

    /// Called when a timer scheduled through `timers` elapses. The timer has already
    /// been removed from the registry, so the same key may be rescheduled here.
    async fn on_timer(
        &mut self,
        _key: Self::TimerKey,
        _ctx: &Self::Context,
        _timers: &mut Timers<Self::TimerKey>,
    ) {
    }

    /// Called once when the actor stops, after all of its timers were cancelled.
    async fn on_stop(&mut self, _ctx: &Self::Context) {}
}
