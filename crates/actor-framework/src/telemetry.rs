//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber used by binaries built on
//! this framework.
//!
//! ## Configuration
//!
//! Log lines use the compact format without the module prefix (`with_target(false)`);
//! actors identify themselves through the structured `actor_type` field instead.
//! The level comes from `RUST_LOG` and defaults to `info`.
//!
//! ```bash
//! # Actor lifecycle, poll results, status changes
//! RUST_LOG=info staff-console ready
//!
//! # Every request, reply and timer expiry
//! RUST_LOG=debug staff-console ready
//!
//! # Only the framework internals
//! RUST_LOG=actor_framework=debug staff-console kds
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started`, `Stopping` (with the number of cancelled timers), `Shutdown`
//! - **Requests**: one `debug` line per call with the request's `Debug` form
//! - **Timers**: `Timer fired key=...` at `debug`
//! - **Errors**: `Call failed error=...` at `warn`
//!
//! With `RUST_LOG=debug` a rotation looks like:
//!
//! ```text
//! DEBUG Call actor_type="ReadyRotation" request=ApplyPoll { seq: 1, orders: [..] }
//! INFO Promoted actor_type="ReadyRotation" order_id=41
//! DEBUG Timer fired actor_type="ReadyRotation" key=41
//! INFO Exhausted order_id=41 shown_for_secs=120
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the compact `fmt` subscriber. Call once, at program start.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
