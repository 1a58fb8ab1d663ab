//! Tracing initialization.

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter, prelude::*};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,spyfall=info,tower_http=info,axum=info";

/// Install the global subscriber: compact fmt output filtered by `RUST_LOG`,
/// e.g. `RUST_LOG=spyfall=debug,tower_http=debug`.
///
/// Fails if a global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(true))
        .try_init()
        .context("installing tracing subscriber")
}
