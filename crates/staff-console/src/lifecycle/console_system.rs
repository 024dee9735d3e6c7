use crate::api::ApiClient;
use crate::clients::{DisplayClient, KitchenClient};
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::polling::{KitchenOrdersSource, Poller, ReadyOrdersSource};
use crate::session::SessionStore;
use actor_framework::ActorClient;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running console: both screens and the backend client.
///
/// # Example
///
/// ```ignore
/// let session = Arc::new(SessionStore::open(&config.session_file)?);
/// let mut system = ConsoleSystem::new(&config, session)?;
///
/// system.activate_ready();
/// let snapshot = system.display.snapshot().await?;
///
/// system.shutdown().await?;
/// ```
pub struct ConsoleSystem {
    /// Backend client, shared with the pollers.
    pub api: ApiClient,

    /// Client for the ready-display actor.
    pub display: DisplayClient,

    /// Client for the kitchen-board actor.
    pub kitchen: KitchenClient,

    ready_poller: Poller<ReadyOrdersSource, DisplayClient>,
    kitchen_poller: Poller<KitchenOrdersSource, KitchenClient>,

    /// Actor tasks, awaited on shutdown.
    handles: Vec<JoinHandle<()>>,
}

impl ConsoleSystem {
    /// Builds the API client and starts both actors. Must be called inside a Tokio runtime.
    pub fn new(config: &ConsoleConfig, session: Arc<SessionStore>) -> Result<Self, ConsoleError> {
        config.validate()?;
        let api = ApiClient::new(&config.base_url, config.request_timeout, session)?;

        let (display_actor, display_handle) =
            crate::ready_display::new(config.display_slots, config.dwell);
        let (kitchen_actor, kitchen_handle) = crate::kitchen_board::new();

        let handles = vec![
            tokio::spawn(display_actor.run(())),
            tokio::spawn(kitchen_actor.run(())),
        ];

        let display = DisplayClient::new(display_handle);
        let kitchen = KitchenClient::new(kitchen_handle);

        let ready_poller = Poller::new(
            "ready",
            ReadyOrdersSource(api.clone()),
            display.clone(),
            config.ready_poll_interval,
        );
        let kitchen_poller = Poller::new(
            "kitchen",
            KitchenOrdersSource(api.clone()),
            kitchen.clone(),
            config.kitchen_poll_interval,
        );

        info!(base_url = %config.base_url, slots = config.display_slots, "Console started");
        Ok(Self {
            api,
            display,
            kitchen,
            ready_poller,
            kitchen_poller,
            handles,
        })
    }

    pub fn activate_ready(&mut self) {
        self.ready_poller.activate();
    }

    /// Stops polling the ready screen. What is on display stays, and dwell timers keep running.
    pub fn deactivate_ready(&mut self) {
        self.ready_poller.deactivate();
    }

    pub fn is_ready_active(&self) -> bool {
        self.ready_poller.is_active()
    }

    /// Fetches ready orders once, outside the schedule.
    pub async fn refresh_ready(&self) {
        self.ready_poller.refresh_now().await;
    }

    pub fn activate_kitchen(&mut self) {
        self.kitchen_poller.activate();
    }

    pub fn deactivate_kitchen(&mut self) {
        self.kitchen_poller.deactivate();
    }

    pub fn is_kitchen_active(&self) -> bool {
        self.kitchen_poller.is_active()
    }

    /// Fetches kitchen orders once, outside the schedule.
    pub async fn refresh_kitchen(&self) {
        self.kitchen_poller.refresh_now().await;
    }

    /// Stops both pollers, disposes both actors and waits for their tasks.
    pub async fn shutdown(mut self) -> Result<(), ConsoleError> {
        info!("Shutting down console...");

        self.ready_poller.deactivate();
        self.kitchen_poller.deactivate();

        self.display.dispose().await?;
        self.kitchen.dispose().await?;

        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Console shut down cleanly");
        Ok(())
    }
}
