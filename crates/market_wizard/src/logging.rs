use std::sync::OnceLock;

use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: OnceLock<()> = OnceLock::new();

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over `default_level` (usually `wizard.log_level` from the
/// config). `log` records are bridged through `tracing-log`.
pub fn init(default_level: &str) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .try_init()?;

    let _ = INIT.set(());
    Ok(())
}
