//! Tracing setup for the yizi CLI
//!
//! Usage:
//!   yizi --debug search 永          # Debug logging to stderr
//!   RUST_LOG=yizi_search=debug yizi  # Fine-grained log control
//!
//! One-shot commands log to stderr. The TUI owns the terminal, so it logs to
//! a daily file under ~/.yizi/logs instead.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log file name prefix inside the log directory
const LOG_FILE: &str = "yizi.log";

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let default = if self.debug { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    }
}

/// Initialize tracing with compact stderr output
pub fn init_console(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Initialize tracing into a daily-rolling file in `log_dir`
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init_file(config: &TracingConfig, log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(config.filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|err| anyhow!(err))?;

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");
    Ok(guard)
}
