//! Logging setup
//!
//! Tracing output goes to a rolling file under `logs/` so stdout stays
//! clean for the interactive chat surface. Filtering follows `RUST_LOG`
//! when set.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "toolchat.log";

/// Initialize the logging system
///
/// Returns a guard that must be held for the life of the process; dropping
/// it stops the background writer and loses buffered log lines.
pub fn init_logging() -> Result<WorkerGuard> {
    std::fs::create_dir_all(LOG_DIR)
        .with_context(|| format!("Failed to create log directory '{LOG_DIR}'"))?;

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("toolchat=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
