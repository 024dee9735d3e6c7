//! # Actor Framework
//!
//! This crate provides the building blocks for small, type-safe actor systems on Tokio.
//! Each actor owns its state, processes one message at a time, and owns a set of
//! **deadline timers** that it services on the same loop as its mailbox.
//!
//! ## Why Actors?
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing within each actor eliminates race conditions
//!
//! Timers are where this matters most. A state machine that rotates items on a deadline
//! and also accepts external updates has two writers. Running both on one loop means a
//! timer expiry and an update can never interleave, and stopping the actor cancels every
//! pending deadline in one step.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Behaviour Layer** ([`ActorBehavior`]) - Your state and rules
//! 2. **Runtime Layer** ([`Actor`]) - Mailbox, timers, shutdown
//! 3. **Interface Layer** ([`ActorHandle`], [`ActorClient`]) - Type-safe communication
//!
//! ## Core Abstractions
//!
//! ```rust
//! use actor_framework::{Actor, ActorBehavior, Timers};
//! use async_trait::async_trait;
//! use std::time::Duration;
//!
//! // 1. Define the behaviour
//! #[derive(Default)]
//! struct Doorbell { rings: u32, quiet: bool }
//!
//! #[derive(Debug)]
//! enum DoorbellRequest { Ring, Rings }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("doorbell is quiet")]
//! struct Quiet;
//!
//! #[async_trait]
//! impl ActorBehavior for Doorbell {
//!     type Request = DoorbellRequest;
//!     type Reply = u32;
//!     type TimerKey = &'static str;
//!     type Context = ();
//!     type Error = Quiet;
//!
//!     async fn handle(
//!         &mut self,
//!         request: DoorbellRequest,
//!         _ctx: &(),
//!         timers: &mut Timers<&'static str>,
//!     ) -> Result<u32, Quiet> {
//!         match request {
//!             DoorbellRequest::Ring if self.quiet => Err(Quiet),
//!             DoorbellRequest::Ring => {
//!                 self.rings += 1;
//!                 self.quiet = true;
//!                 timers.schedule("quiet", Duration::from_secs(5)).map_err(|_| Quiet)?;
//!                 Ok(self.rings)
//!             }
//!             DoorbellRequest::Rings => Ok(self.rings),
//!         }
//!     }
//!
//!     async fn on_timer(&mut self, _key: &'static str, _ctx: &(), _timers: &mut Timers<&'static str>) {
//!         self.quiet = false;
//!     }
//! }
//!
//! // 2. Use the actor
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = Actor::new(Doorbell::default(), 10);
//!     tokio::spawn(actor.run(()));
//!
//!     assert_eq!(handle.call(DoorbellRequest::Ring).await.unwrap(), 1);
//!     assert!(handle.call(DoorbellRequest::Ring).await.is_err());
//!     assert_eq!(handle.call(DoorbellRequest::Rings).await.unwrap(), 1);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction time.
//! A poller can therefore be handed the handle of an actor whose own context needs the
//! poller, without either being constructed twice.
//!
//! ## Shutdown
//!
//! - [`ActorHandle::stop`] (or [`ActorClient::dispose`]) cancels all timers, runs
//!   `on_stop` and waits for the loop to end.
//! - Dropping the last handle has the same effect.
//! - After shutdown every call returns [`FrameworkError::ActorClosed`].
//!
//! ## Testing
//!
//! Drive real actors with `#[tokio::test(start_paused = true)]` and `tokio::time::advance`,
//! or script replies with [`mock::MockHandle`]. See the [`mock`] module.

pub mod actor;
pub mod behavior;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod telemetry;
pub mod timers;

// Re-export core types for convenience
pub use actor::Actor;
pub use behavior::ActorBehavior;
pub use client::ActorHandle;
pub use client_trait::ActorClient;
pub use error::FrameworkError;
pub use message::{ActorRequest, Response};
pub use telemetry::setup_tracing;
pub use timers::Timers;
