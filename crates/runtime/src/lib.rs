//! Real-time runtime for blockfall sessions.
//!
//! Bridges the pure session in `blockfall-core` with the tokio clock:
//!
//! - [`TokioScheduler`]: the session's timer slots with `tokio::time::Instant` deadlines
//! - [`SessionDriver`]: a task that owns a session, applies commands and publishes
//!   snapshots
//! - [`init_tracing`]: installs a `tracing-subscriber` formatter for hosts

pub mod driver;
pub mod scheduler;

pub use blockfall_types as types;

pub use driver::{new_session, DriverConfig, SessionCommand, SessionDriver, TokioSession};
pub use scheduler::TokioScheduler;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Fails if a global subscriber is already set.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
