//! # Keyed Timers
//!
//! Every actor owns a [`Timers`] registry. A behaviour schedules a timer under a key
//! (for example an order id) and receives that key back through
//! [`ActorBehavior::on_timer`](crate::ActorBehavior::on_timer) once the delay has elapsed.
//!
//! Timers are plain deadlines held inside the actor, not spawned tasks. The actor loop
//! sleeps until the earliest deadline alongside its mailbox, so:
//!
//! - a timer can only fire while the actor is running, and never after it stopped;
//! - cancelling a timer is removing its entry, there is no task to abort;
//! - a key has at most one live timer at any time.
//!
//! Timers sharing the same deadline fire in the order they were scheduled.

use crate::error::FrameworkError;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    seq: u64,
}

/// Registry of cancelable, keyed one-shot timers owned by a single actor.
#[derive(Debug)]
pub struct Timers<K> {
    pending: HashMap<K, Deadline>,
    next_seq: u64,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K> Timers<K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a timer for `key` firing `after` from now.
    ///
    /// # Errors
    /// [`FrameworkError::DuplicateTimer`] if `key` already has a live timer. The existing
    /// timer is left untouched.
    pub fn schedule(&mut self, key: K, after: Duration) -> Result<Instant, FrameworkError> {
        if self.pending.contains_key(&key) {
            return Err(FrameworkError::DuplicateTimer(format!("{key:?}")));
        }
        let at = Instant::now() + after;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(key, Deadline { at, seq });
        Ok(at)
    }

    /// Cancels the timer for `key`. Returns whether one was live.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.pending.remove(key).is_some()
    }

    /// Cancels every live timer and returns how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn contains(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// Deadline of the live timer for `key`.
    pub fn deadline(&self, key: &K) -> Option<Instant> {
        self.pending.get(key).map(|d| d.at)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn earliest(&self) -> Option<(K, Instant)> {
        self.pending
            .iter()
            .min_by_key(|(_, d)| (d.at, d.seq))
            .map(|(k, d)| (k.clone(), d.at))
    }

    /// Waits for the earliest live timer and removes it, returning its key.
    ///
    /// Pending forever while no timer is live. Cancel safe: dropping the future before
    /// it completes leaves the registry unchanged.
    pub(crate) async fn next_fired(&mut self) -> K {
        let Some((key, at)) = self.earliest() else {
            return std::future::pending().await;
        };
        tokio::time::sleep_until(at).await;
        self.pending.remove(&key);
        key
    }
}
