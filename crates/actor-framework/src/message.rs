//! # Generic Messages
//!
//! This module defines the envelope exchanged between an [`ActorHandle`](crate::ActorHandle)
//! and its [`Actor`](crate::Actor).

use crate::behavior::ActorBehavior;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Call**: a behaviour request, answered through `respond_to`.
/// - **Stop**: cancels every timer, runs `on_stop` and ends the loop. Messages queued
///   behind a `Stop` are never handled; their senders observe
///   [`FrameworkError::ActorDropped`].
#[derive(Debug)]
pub enum ActorRequest<B: ActorBehavior> {
    Call {
        request: B::Request,
        respond_to: Response<B::Reply>,
    },
    Stop {
        respond_to: Response<()>,
    },
}
