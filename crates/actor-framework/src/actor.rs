//! # Generic Actor Server
//!
//! This module defines the `Actor`, the component that drives an [`ActorBehavior`]. It
//! implements the "Server" side of the Actor Model: one task, one mailbox, one timer
//! registry, and exclusive access to the behaviour's state.

use crate::behavior::ActorBehavior;
use crate::client::ActorHandle;
use crate::error::FrameworkError;
use crate::message::ActorRequest;
use crate::timers::Timers;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that runs a behaviour.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the behaviour, its timers and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Requests and timer expiries are two sources of work, but they are consumed by a single
/// loop, one at a time. A timer firing can never interleave with a request half-way through
/// its read-modify-write, so the behaviour needs no `Mutex`.
///
/// When a request and a timer are both ready, the timer is handled first. A reader asking
/// for a snapshot right after a deadline therefore always sees the expiry applied.
///
/// # Usage Pattern
///
/// 1.  **Create**: `Actor::new(behavior, buffer)` returns the `actor` (server) and a `handle`.
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust
/// use actor_framework::{Actor, ActorBehavior, Timers};
/// use async_trait::async_trait;
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Reminder { rang: Vec<String> }
///
/// #[derive(Debug)]
/// enum ReminderRequest { Set(String), Rang }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("reminder error")]
/// struct ReminderError;
///
/// #[async_trait]
/// impl ActorBehavior for Reminder {
///     type Request = ReminderRequest;
///     type Reply = Vec<String>;
///     type TimerKey = String;
///     type Context = ();
///     type Error = ReminderError;
///
///     async fn handle(
///         &mut self,
///         request: ReminderRequest,
///         _: &(),
///         timers: &mut Timers<String>,
///     ) -> Result<Vec<String>, ReminderError> {
///         if let ReminderRequest::Set(name) = request {
///             timers.schedule(name, Duration::from_secs(30)).map_err(|_| ReminderError)?;
///         }
///         Ok(self.rang.clone())
///     }
///
///     async fn on_timer(&mut self, key: String, _: &(), _: &mut Timers<String>) {
///         self.rang.push(key);
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, handle) = Actor::new(Reminder::default(), 10);
///     tokio::spawn(actor.run(()));
///
///     let rang = handle.call(ReminderRequest::Set("tea".into())).await.unwrap();
///     assert!(rang.is_empty());
///     handle.stop().await.unwrap();
/// }
/// ```
pub struct Actor<B: ActorBehavior> {
    receiver: mpsc::Receiver<ActorRequest<B>>,
    behavior: B,
    timers: Timers<B::TimerKey>,
}

impl<B: ActorBehavior> Actor<B> {
    /// Creates a new `Actor` and its associated `ActorHandle`.
    ///
    /// # Arguments
    ///
    /// * `behavior` - The initial state.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls on the handle wait until there is space.
    pub fn new(behavior: B, buffer_size: usize) -> (Self, ActorHandle<B>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            behavior,
            timers: Timers::new(),
        };
        (actor, ActorHandle::new(sender))
    }

    /// Runs the actor's event loop until it is stopped or every handle is dropped.
    ///
    /// # Context Injection
    /// The `context` argument is passed to every behaviour hook. This lets behaviours use
    /// dependencies created *after* the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: B::Context) {
        // Extract just the type name (e.g., "Rotation" instead of "staff_console::ready_display::Rotation")
        let actor_type = std::any::type_name::<B>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(actor_type, "Actor started");

        if let Err(e) = self.behavior.on_start(&context, &mut self.timers).await {
            warn!(actor_type, error = %e, "on_start failed");
        }

        loop {
            tokio::select! {
                biased;

                key = self.timers.next_fired() => {
                    debug!(actor_type, %key, "Timer fired");
                    self.behavior.on_timer(key, &context, &mut self.timers).await;
                }
                msg = self.receiver.recv() => match msg {
                    Some(ActorRequest::Call { request, respond_to }) => {
                        debug!(actor_type, ?request, "Call");
                        let result = self
                            .behavior
                            .handle(request, &context, &mut self.timers)
                            .await
                            .map_err(|e| FrameworkError::BehaviorError(Box::new(e)));
                        if let Err(e) = &result {
                            warn!(actor_type, error = %e, "Call failed");
                        }
                        let _ = respond_to.send(result);
                    }
                    Some(ActorRequest::Stop { respond_to }) => {
                        self.shutdown(actor_type, &context).await;
                        let _ = respond_to.send(Ok(()));
                        break;
                    }
                    None => {
                        self.shutdown(actor_type, &context).await;
                        break;
                    }
                },
            }
        }

        info!(actor_type, "Shutdown");
    }

    async fn shutdown(&mut self, actor_type: &str, context: &B::Context) {
        let cancelled = self.timers.cancel_all();
        self.behavior.on_stop(context).await;
        // Nothing queued behind the stop is handled; closing makes late senders fail fast.
        self.receiver.close();
        info!(actor_type, cancelled_timers = cancelled, "Stopping");
    }
}
