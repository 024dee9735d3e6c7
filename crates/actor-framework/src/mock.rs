//! # Mock Framework & Testing Guide
//!
//! [`MockHandle<B>`] hands out a real [`ActorHandle<B>`], but no behaviour runs behind it.
//! Every request is answered from a queue of scripted responses, which makes it easy to
//! unit test code that *talks to* an actor (a poller, a client wrapper, a CLI command)
//! without spawning the actor itself.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockHandle | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Timers** | None | Real deadlines, drive them with a paused clock |
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 0: Client Logic Test (Pure Mock)</b></summary>
//!
//! ```rust
//! use actor_framework::mock::MockHandle;
//! use actor_framework::{ActorBehavior, FrameworkError, Timers};
//! use async_trait::async_trait;
//!
//! struct Board;
//! #[derive(Debug, PartialEq)] enum BoardRequest { Count }
//! #[derive(Debug, thiserror::Error)] #[error("board")] struct BoardError;
//!
//! #[async_trait]
//! impl ActorBehavior for Board {
//!     type Request = BoardRequest; type Reply = usize; type TimerKey = u32;
//!     type Context = (); type Error = BoardError;
//!     async fn handle(&mut self, _: BoardRequest, _: &(), _: &mut Timers<u32>) -> Result<usize, BoardError> {
//!         Ok(0)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockHandle::<Board>::new();
//!     mock.expect_call().matching(|r| *r == BoardRequest::Count).return_ok(3);
//!     mock.expect_call().return_err(FrameworkError::ActorClosed);
//!
//!     let handle = mock.handle();
//!     assert_eq!(handle.call(BoardRequest::Count).await.unwrap(), 3);
//!     assert!(handle.call(BoardRequest::Count).await.is_err());
//!     mock.verify();
//! }
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 1: Single Actor Test with a paused clock</b></summary>
//!
//! Spawn the real [`Actor`](crate::Actor) inside `#[tokio::test(start_paused = true)]` and
//! move time with `tokio::time::advance`. Deadlines are held by the actor, so after an
//! advance the next request observes every expiry that became due.
//! </details>
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_handle`] to get a handle and the raw receiver when a test needs to
//! hold a request in flight, or the fluent [`MockHandle`] API otherwise.

use crate::behavior::ActorBehavior;
use crate::client::ActorHandle;
use crate::error::FrameworkError;
use crate::message::{ActorRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

type Matcher<B> = Box<dyn Fn(&<B as ActorBehavior>::Request) -> bool + Send>;

enum Expectation<B: ActorBehavior> {
    Call {
        matcher: Option<Matcher<B>>,
        response: Result<B::Reply, FrameworkError>,
    },
    Stop,
}

struct Script<B: ActorBehavior> {
    expectations: VecDeque<Expectation<B>>,
    mismatches: Vec<String>,
}

type Shared<B> = Arc<Mutex<Script<B>>>;

fn lock<B: ActorBehavior>(script: &Shared<B>) -> MutexGuard<'_, Script<B>> {
    script.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A scripted stand-in for a running actor.
///
/// Requests are matched against expectations in the order they were registered.
/// Anything unexpected is answered with [`FrameworkError::ActorDropped`] and reported
/// by [`verify`](MockHandle::verify).
pub struct MockHandle<B: ActorBehavior> {
    handle: ActorHandle<B>,
    script: Shared<B>,
    _task: tokio::task::JoinHandle<()>,
}

impl<B: ActorBehavior> Default for MockHandle<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ActorBehavior> MockHandle<B> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ActorRequest<B>>(100);
        let script: Shared<B> = Arc::new(Mutex::new(Script {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let background = script.clone();

        let task = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&background).expectations.pop_front();

                match (request, next) {
                    (
                        ActorRequest::Call {
                            request,
                            respond_to,
                        },
                        Some(Expectation::Call { matcher, response }),
                    ) => {
                        if matcher.map_or(true, |m| m(&request)) {
                            let _ = respond_to.send(response);
                        } else {
                            lock(&background)
                                .mismatches
                                .push(format!("request did not match: {request:?}"));
                        }
                    }
                    (ActorRequest::Stop { respond_to }, Some(Expectation::Stop)) => {
                        let _ = respond_to.send(Ok(()));
                        break;
                    }
                    (ActorRequest::Call { request, .. }, _) => {
                        lock(&background)
                            .mismatches
                            .push(format!("unexpected call: {request:?}"));
                    }
                    (ActorRequest::Stop { .. }, _) => {
                        lock(&background)
                            .mismatches
                            .push("unexpected stop".to_string());
                    }
                }
            }
        });

        Self {
            handle: ActorHandle::new(sender),
            script,
            _task: task,
        }
    }

    /// Returns a handle wired to this mock.
    pub fn handle(&self) -> ActorHandle<B> {
        self.handle.clone()
    }

    /// Expects the next message to be a `call`.
    pub fn expect_call(&self) -> CallExpectationBuilder<B> {
        CallExpectationBuilder {
            matcher: None,
            script: self.script.clone(),
        }
    }

    /// Expects the next message to be a `stop`. The mock closes after answering it.
    pub fn expect_stop(&self) {
        lock(&self.script).expectations.push_back(Expectation::Stop);
    }

    /// Panics unless every expectation was consumed and nothing unexpected arrived.
    pub fn verify(&self) {
        let script = lock(&self.script);
        if !script.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", script.mismatches);
        }
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
    }
}

/// Builder for `call` expectations.
pub struct CallExpectationBuilder<B: ActorBehavior> {
    matcher: Option<Matcher<B>>,
    script: Shared<B>,
}

impl<B: ActorBehavior> CallExpectationBuilder<B> {
    /// Only accept requests for which `predicate` holds.
    pub fn matching(mut self, predicate: impl Fn(&B::Request) -> bool + Send + 'static) -> Self {
        self.matcher = Some(Box::new(predicate));
        self
    }

    /// Answers the call with `reply`.
    pub fn return_ok(self, reply: B::Reply) {
        self.push(Ok(reply));
    }

    /// Answers the call with `error`.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<B::Reply, FrameworkError>) {
        lock(&self.script).expectations.push_back(Expectation::Call {
            matcher: self.matcher,
            response,
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a handle and the receiver its requests arrive on.
///
/// # Testing Strategy
/// The test plays the actor: it pulls requests off `receiver`, asserts on them, and
/// decides when (and whether) to answer. This is the way to test what a caller does
/// while a reply is still outstanding.
pub fn create_mock_handle<B: ActorBehavior>(
    buffer_size: usize,
) -> (ActorHandle<B>, mpsc::Receiver<ActorRequest<B>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ActorHandle::new(sender), receiver)
}

/// Helper to verify that the next message is a Call request.
pub async fn expect_call<B: ActorBehavior>(
    receiver: &mut mpsc::Receiver<ActorRequest<B>>,
) -> Option<(B::Request, Response<B::Reply>)> {
    match receiver.recv().await {
        Some(ActorRequest::Call {
            request,
            respond_to,
        }) => Some((request, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Stop request.
pub async fn expect_stop<B: ActorBehavior>(
    receiver: &mut mpsc::Receiver<ActorRequest<B>>,
) -> Option<Response<()>> {
    match receiver.recv().await {
        Some(ActorRequest::Stop { respond_to }) => Some(respond_to),
        _ => None,
    }
}
