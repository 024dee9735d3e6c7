//! # ActorClient Trait
//!
//! Provides a common interface for domain clients, adding default `dispose` and
//! `is_running` methods built on top of a generic [`ActorHandle`].
use crate::{ActorBehavior, ActorHandle, FrameworkError};
use async_trait::async_trait;

/// Trait for domain-specific clients to inherit the standard lifecycle operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorBehavior, ActorClient, ActorHandle, FrameworkError, Timers};
/// use async_trait::async_trait;
///
/// struct Counter { hits: u32 }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct CounterError(String);
///
/// #[async_trait]
/// impl ActorBehavior for Counter {
///     type Request = ();
///     type Reply = u32;
///     type TimerKey = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     async fn handle(&mut self, _: (), _: &(), _: &mut Timers<u32>) -> Result<u32, CounterError> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// struct CounterClient { inner: ActorHandle<Counter> }
///
/// #[async_trait]
/// impl ActorClient<Counter> for CounterClient {
///     type Error = CounterError;
///
///     fn inner(&self) -> &ActorHandle<Counter> { &self.inner }
///
///     fn map_error(e: FrameworkError) -> Self::Error { CounterError(e.to_string()) }
/// }
///
/// async fn usage(client: CounterClient) {
///     // dispose() and is_running() are provided automatically!
///     if client.is_running() {
///         let _ = client.dispose().await;
///     }
/// }
/// ```
#[async_trait]
pub trait ActorClient<B: ActorBehavior>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic handle.
    fn inner(&self) -> &ActorHandle<B>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Stops the actor, cancelling all of its timers.
    ///
    /// Idempotent: disposing an actor that is already gone succeeds.
    #[tracing::instrument(skip(self))]
    async fn dispose(&self) -> Result<(), Self::Error> {
        tracing::debug!("Sending stop");
        match self.inner().stop().await {
            Ok(()) => Ok(()),
            Err(e) if e.is_closed() => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// True while the actor still accepts messages.
    fn is_running(&self) -> bool {
        !self.inner().is_closed()
    }
}
