//! File-based tracing setup.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "client.log";

/// Installs a global subscriber writing to `<log_dir>/client.log`.
///
/// `RUST_LOG` directives are honoured on top of an INFO baseline. Returns the
/// log file path. Fails if a global subscriber is already installed.
pub fn setup_logging(log_dir: &Path, series_id: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("global tracing subscriber already installed")?;

    // Writer must outlive the process
    std::mem::forget(guard);

    let log_file = log_dir.join(LOG_FILE);
    tracing::info!(series_id, "logging initialized");
    tracing::info!("log file: {}", log_file.display());

    Ok(log_file)
}
