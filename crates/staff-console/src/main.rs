//! Command-line front end for the staff console.
//!
//! ```text
//! staff-console login --email me@example.com --password secret
//! staff-console ready --ticks 30
//! staff-console kds --tab completed
//! staff-console set-status 42 ready
//! staff-console            # reopens the last screen
//! ```

use actor_framework::setup_tracing;
use chrono::Local;
use clap::{Parser, Subcommand};
use staff_console::api::ApiError;
use staff_console::config::ConsoleConfig;
use staff_console::kitchen_board::{time_since, KitchenTab};
use staff_console::lifecycle::ConsoleSystem;
use staff_console::model::{OrderId, OrderStatus};
use staff_console::session::{Screen, SessionStore};
use staff_console::shifts;
use staff_console::ConsoleError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "staff-console", about = "Restaurant staff screens: ready display and kitchen board")]
struct Cli {
    /// Backend base URL. Overrides CONSOLE_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Session file. Overrides CONSOLE_SESSION_FILE.
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Without a command, the screen opened last is shown again.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Signs in and stores the token in the session file.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Signs out. The stored token is removed even if the backend call fails.
    Logout,
    /// Runs the "Order Ready" display.
    Ready {
        /// Stop after this many one-second frames.
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Runs the kitchen display.
    Kds {
        #[arg(long, value_enum, default_value_t = KitchenTab::InProgress)]
        tab: KitchenTab,
        /// Stop after this many one-second frames.
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Moves an order to a new status.
    SetStatus { order_id: u64, status: OrderStatus },
    /// Prints shift statistics and the next shift.
    Shifts,
}

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    setup_tracing();
    let cli = Cli::parse();

    let mut config = ConsoleConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = session_file;
    }
    let session = Arc::new(SessionStore::open(&config.session_file)?);

    let mut system = ConsoleSystem::new(&config, session.clone())?;
    let command = cli.command.unwrap_or_else(|| match session.selected_screen() {
        Screen::Ready => Command::Ready { ticks: None },
        Screen::Kitchen => Command::Kds {
            tab: KitchenTab::InProgress,
            ticks: None,
        },
        Screen::Shifts => Command::Shifts,
    });
    let result = run(command, &mut system, &session).await;
    system.shutdown().await?;
    result
}

async fn run(
    command: Command,
    system: &mut ConsoleSystem,
    session: &SessionStore,
) -> Result<(), ConsoleError> {
    match command {
        Command::Login { email, password } => {
            system.api.login(&email, &password).await?;
            info!(%email, "Signed in");
        }
        Command::Logout => {
            match system.api.logout().await {
                Err(e @ ApiError::Session(_)) => return Err(e.into()),
                Err(e) => warn!(error = %e, "Backend logout failed; local session cleared anyway"),
                Ok(()) => {}
            }
            info!("Signed out");
        }
        Command::Ready { ticks } => {
            require_login(session);
            session.select_screen(Screen::Ready)?;
            system.activate_ready();
            let screen: &ConsoleSystem = system;
            render_frames(ticks, || render_ready(screen)).await?;
            system.deactivate_ready();
        }
        Command::Kds { tab, ticks } => {
            require_login(session);
            session.select_screen(Screen::Kitchen)?;
            system.activate_kitchen();
            let screen: &ConsoleSystem = system;
            render_frames(ticks, || render_kitchen(screen, tab)).await?;
            system.deactivate_kitchen();
        }
        Command::SetStatus { order_id, status } => {
            system.refresh_kitchen().await;
            system
                .kitchen
                .set_status(&system.api, OrderId(order_id), status)
                .await?;
            info!(order_id, %status, "Status changed");
        }
        Command::Shifts => {
            session.select_screen(Screen::Shifts)?;
            render_shifts(system).await?
        }
    }
    Ok(())
}

fn require_login(session: &SessionStore) {
    if !session.is_authenticated() {
        warn!("No stored token; run `staff-console login` first if the backend requires it");
    }
}

/// Calls `frame` once per second until Ctrl-C or `ticks` frames.
async fn render_frames<F, Fut>(ticks: Option<u64>, mut frame: F) -> Result<(), ConsoleError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<(), ConsoleError>>,
{
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let mut rendered = 0;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                return Ok(());
            }
            _ = interval.tick() => {
                frame().await?;
                rendered += 1;
                if ticks.is_some_and(|limit| rendered >= limit) {
                    return Ok(());
                }
            }
        }
    }
}

async fn render_ready(system: &ConsoleSystem) -> Result<(), ConsoleError> {
    let snapshot = system.display.snapshot().await?;
    if snapshot.loading {
        info!("Loading ready orders...");
        return Ok(());
    }
    let displayed: Vec<String> = snapshot
        .displayed
        .iter()
        .map(|d| {
            let table = d.order.table_number.as_deref().unwrap_or("-");
            format!("#{} (table {table}) {}", d.order.order_id, d.countdown())
        })
        .collect();
    info!(
        displayed = ?displayed,
        queued = snapshot.queued_count,
        shown = snapshot.shown.len(),
        error = snapshot.error.as_deref().unwrap_or(""),
        "Ready"
    );
    Ok(())
}

async fn render_kitchen(system: &ConsoleSystem, tab: KitchenTab) -> Result<(), ConsoleError> {
    let view = system.kitchen.view(tab).await?;
    if view.loading {
        info!("Loading kitchen orders...");
        return Ok(());
    }
    let now = Local::now().naive_local();
    for order in &view.orders {
        info!(
            order_id = %order.order_id,
            status = %order.order_status,
            items = order.items.len(),
            placed = %time_since(&order.order_date_time, now),
            "Ticket"
        );
    }
    info!(
        ?tab,
        pending = view.counts.pending,
        processing = view.counts.processing,
        ready = view.counts.ready,
        completed = view.counts.completed,
        error = view.error.as_deref().unwrap_or(""),
        "Kitchen"
    );
    Ok(())
}

async fn render_shifts(system: &ConsoleSystem) -> Result<(), ConsoleError> {
    let profile = system.api.profile().await?;
    let shift_list = system.api.staff_shifts(profile.id).await?;
    let attendance = system.api.attendance(profile.id).await?;
    let now = Local::now().naive_local();

    for shift in shifts::sorted_by_start(&shift_list) {
        let summary = shifts::attendance_status(shift.id, &attendance);
        info!(
            date = %shift.date,
            hours = %shifts::shift_duration(shift.start_time, shift.end_time),
            label = %shifts::shift_label(&shift, &summary, now),
            late_minutes = summary.late_minutes,
            early_minutes = summary.early_minutes,
            "Shift"
        );
    }

    let stats = shifts::shift_stats(&shift_list, &attendance, now);
    info!(
        name = %profile.name,
        this_week = stats.this_week,
        this_month = stats.this_month,
        completed = stats.completed,
        present = stats.present,
        absent = stats.absent,
        total = stats.total,
        "Shift stats"
    );
    match shifts::nearest_shift(&shift_list, now) {
        Some(next) => info!(date = %next.date, starts_in = %shifts::time_until(next, now), "Next shift"),
        None => info!("No upcoming shifts"),
    }
    Ok(())
}
