use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Installs the global fmt subscriber. `RUST_LOG` wins when set as a directive;
/// otherwise the crate logs at `config.rust_log`.
///
/// Errors if a global subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
