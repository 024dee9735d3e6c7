//! # Framework Errors
//!
//! This module defines the common error types used throughout the actor framework.
//! Behaviour-specific failures are boxed into [`FrameworkError::BehaviorError`] so that
//! every handle returns the same error type regardless of the actor behind it.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Timer already scheduled: {0}")]
    DuplicateTimer(String),
    #[error("Behavior error: {0}")]
    BehaviorError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// True when the actor is gone, either because it was stopped or because
    /// it dropped the reply. Callers treat this as "nothing left to update".
    pub fn is_closed(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }

    /// Recover the concrete behaviour error, if this is one.
    pub fn downcast_behavior<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::BehaviorError(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }
}
