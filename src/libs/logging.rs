//! Tracing subscriber setup.
//!
//! Only installed in debug mode (see
//! [`is_debug_mode`](crate::libs::messages::macros::is_debug_mode)); otherwise
//! messages go straight to the console and no subscriber is needed.
//! `RUST_LOG` wins over the default `daylog=debug` filter.

use crate::libs::messages::macros::is_debug_mode;
use anyhow::{anyhow, Result};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

pub fn enable_logging() -> Result<()> {
    if !is_debug_mode() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME").replace('-', "_"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e.to_string()))
}
