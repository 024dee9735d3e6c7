//! # Generic Handle
//!
//! This module defines the generic handle used to talk to a running actor.

use crate::behavior::ActorBehavior;
use crate::error::FrameworkError;
use crate::message::ActorRequest;
use tokio::sync::{mpsc, oneshot};

/// ## ActorHandle
///
/// The `ActorHandle<B>` is the *client* half of an actor. It forwards requests over a Tokio
/// mpsc channel and waits for the reply on a oneshot channel.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Shutdown by drop** – when the last handle is dropped the actor's mailbox closes
///   and the actor stops as if it had received [`stop`](ActorHandle::stop).
pub struct ActorHandle<B: ActorBehavior> {
    sender: mpsc::Sender<ActorRequest<B>>,
}

impl<B: ActorBehavior> Clone for ActorHandle<B> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<B: ActorBehavior> ActorHandle<B> {
    pub fn new(sender: mpsc::Sender<ActorRequest<B>>) -> Self {
        Self { sender }
    }

    pub async fn call(&self, request: B::Request) -> Result<B::Reply, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ActorRequest::Call {
                request,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Asks the actor to stop and waits until it has.
    pub async fn stop(&self) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ActorRequest::Stop { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// True once the actor's mailbox is gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
