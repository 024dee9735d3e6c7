//! # Polling Fetcher
//!
//! A [`Poller`] fetches from a [`PollSource`] on a fixed interval while a screen is active
//! and hands every result to a [`PollSink`]:
//!
//! - `activate()` fetches immediately, then every `interval`.
//! - `deactivate()` stops the loop. An in-flight fetch is dropped and never delivered.
//! - `refresh_now()` performs one extra fetch, the "Retry" button of a failed screen.
//!
//! Every fetch gets a sequence number when it is *issued*. Results can land out of order
//! (a slow scheduled fetch racing a manual refresh); sinks drop anything not newer than
//! what they already applied.

use crate::api::{ApiClient, ApiError};
use crate::model::{KitchenOrder, ReadyOrder};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, Instrument};

/// Whether a sink applied a poll result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Applied,
    /// An equal or newer poll was already applied; nothing changed.
    Stale,
}

/// Where polled data comes from.
#[async_trait]
pub trait PollSource: Send + Sync + 'static {
    type Item: Send + 'static;

    async fn fetch(&self) -> Result<Self::Item, ApiError>;
}

/// Where polled data goes.
#[async_trait]
pub trait PollSink<T>: Send + Sync + 'static {
    async fn apply(&self, seq: u64, item: T);

    async fn fail(&self, seq: u64, message: String);
}

/// `GET /api/orders/ready`.
#[derive(Debug, Clone)]
pub struct ReadyOrdersSource(pub ApiClient);

#[async_trait]
impl PollSource for ReadyOrdersSource {
    type Item = Vec<ReadyOrder>;

    async fn fetch(&self) -> Result<Vec<ReadyOrder>, ApiError> {
        self.0.ready_orders().await
    }
}

/// `GET /api/orders/kds`.
#[derive(Debug, Clone)]
pub struct KitchenOrdersSource(pub ApiClient);

#[async_trait]
impl PollSource for KitchenOrdersSource {
    type Item = Vec<KitchenOrder>;

    async fn fetch(&self) -> Result<Vec<KitchenOrder>, ApiError> {
        self.0.kds_orders().await
    }
}

pub struct Poller<S: PollSource, K> {
    name: &'static str,
    source: Arc<S>,
    sink: Arc<K>,
    interval: Duration,
    seq: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl<S, K> Poller<S, K>
where
    S: PollSource,
    K: PollSink<S::Item>,
{
    pub fn new(name: &'static str, source: S, sink: K, interval: Duration) -> Self {
        Self {
            name,
            source: Arc::new(source),
            sink: Arc::new(sink),
            interval,
            seq: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Starts polling. Does nothing if already active.
    pub fn activate(&mut self) {
        if self.is_active() {
            return;
        }
        info!(poller = self.name, interval_ms = self.interval.as_millis() as u64, "Polling started");

        let source = self.source.clone();
        let sink = self.sink.clone();
        let seq = self.seq.clone();
        let interval = self.interval;
        let span = tracing::info_span!("poll", poller = self.name);

        self.task = Some(tokio::spawn(
            async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    poll_once(&*source, &*sink, &seq).await;
                }
            }
            .instrument(span),
        ));
    }

    /// Stops polling. Does nothing if not active.
    pub fn deactivate(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!(poller = self.name, "Polling stopped");
        }
    }

    /// One out-of-band fetch, delivered like a scheduled one.
    pub async fn refresh_now(&self) {
        poll_once(&*self.source, &*self.sink, &self.seq).await;
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }
}

impl<S: PollSource, K> Drop for Poller<S, K> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn poll_once<S, K>(source: &S, sink: &K, seq: &AtomicU64)
where
    S: PollSource,
    K: PollSink<S::Item>,
{
    let seq = seq.fetch_add(1, Ordering::SeqCst) + 1;
    match source.fetch().await {
        Ok(item) => sink.apply(seq, item).await,
        Err(e) => {
            debug!(seq, error = %e, "Fetch failed");
            sink.fail(seq, e.to_string()).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Counts fetches; every third one fails.
    #[derive(Default)]
    struct Counter {
        calls: AtomicU64,
    }

    #[async_trait]
    impl PollSource for Counter {
        type Item = u64;

        async fn fetch(&self) -> Result<u64, ApiError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n % 3 == 0 {
                return Err(ApiError::Status {
                    status: 503,
                    message: "busy".into(),
                });
            }
            Ok(n)
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(u64, Result<u64, String>)>>,
    }

    #[async_trait]
    impl PollSink<u64> for Recorder {
        async fn apply(&self, seq: u64, item: u64) {
            self.events.lock().unwrap().push((seq, Ok(item)));
        }

        async fn fail(&self, seq: u64, message: String) {
            self.events.lock().unwrap().push((seq, Err(message)));
        }
    }

    /// Takes two seconds to answer.
    struct Slow;

    #[async_trait]
    impl PollSource for Slow {
        type Item = u64;

        async fn fetch(&self) -> Result<u64, ApiError> {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok(42)
        }
    }

    fn events<S: PollSource<Item = u64>>(poller: &Poller<S, Recorder>) -> Vec<(u64, Result<u64, String>)> {
        poller.sink().events.lock().unwrap().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_immediately_then_on_interval() {
        let mut poller = Poller::new("test", Counter::default(), Recorder::default(), Duration::from_secs(5));
        poller.activate();
        poller.activate();
        assert!(poller.is_active());

        tokio::task::yield_now().await;
        assert_eq!(events(&poller), vec![(1, Ok(1))]);

        tokio::time::sleep(Duration::from_millis(10_001)).await;
        assert_eq!(
            events(&poller),
            vec![(1, Ok(1)), (2, Ok(2)), (3, Err("503: busy".to_string()))]
        );

        poller.deactivate();
        assert!(!poller.is_active());
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(events(&poller).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_now_shares_the_sequence() {
        let mut poller = Poller::new("test", Counter::default(), Recorder::default(), Duration::from_secs(5));
        poller.refresh_now().await;
        assert!(!poller.is_active());

        poller.activate();
        tokio::task::yield_now().await;
        poller.refresh_now().await;

        let seqs: Vec<u64> = events(&poller).iter().map(|(seq, _)| *seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deactivate_drops_in_flight_fetch() {
        let mut poller = Poller::new("test", Slow, Recorder::default(), Duration::from_secs(5));
        poller.activate();
        tokio::task::yield_now().await;
        assert_eq!(poller.seq.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(1)).await;
        poller.deactivate();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(events(&poller).is_empty());
        assert_eq!(poller.seq.load(Ordering::SeqCst), 1);
    }
}
