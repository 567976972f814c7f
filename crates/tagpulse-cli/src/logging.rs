//! Tracing setup: console output plus a plain-text log file.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber with a console layer and a file layer
/// appending to `log_path`. `RUST_LOG` overrides the default `info` filter.
pub(crate) fn init(log_path: &Path) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_file = File::options()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
        .init();

    Ok(())
}
