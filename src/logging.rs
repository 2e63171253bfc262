//! Optional logging setup for applications built on this crate.
//!
//! The library only emits `tracing` events and spans. Applications that have
//! no subscriber of their own can call [`init`] to get:
//! - File-based output with daily rotation
//! - Log level configuration through `RUST_LOG`

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "backlog=info,warn";

/// File name prefix of the rotated log files.
const LOG_FILE_PREFIX: &str = "backlog.log";

/// Initialize logging into the platform's local data directory.
///
/// # Log Directory
///
/// - Linux: `~/.local/share/backlog/logs/`
/// - macOS: `~/Library/Application Support/backlog/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\backlog\logs\`
///
/// # Log Levels
///
/// - `RUST_LOG=backlog=debug` - Every request and response size
/// - `RUST_LOG=backlog=trace` - Everything
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be determined or created
/// - A global subscriber is already set
///
/// # Example
///
/// ```no_run
/// use backlog::logging;
///
/// logging::init().expect("Failed to initialize logging");
/// ```
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    init_in(&log_dir)
}

/// Initialize logging into `log_dir`.
pub fn init_in(log_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(env_filter());

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Backlog client logging started");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Returns the platform-specific local data directory with `backlog/logs` appended.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("backlog").join("logs"))
}

/// Get the path where [`init`] writes logs.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}
