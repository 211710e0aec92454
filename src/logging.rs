//! Logging setup for the `scour` binary.
//!
//! Logs go to stderr and to a daily rotating file in the platform data directory.
//! The library itself only emits `tracing` events; nothing is recorded unless a
//! subscriber like this one is installed.
//!
//! ```no_run
//! scour::logging::init()?;
//! tracing::info!("ready");
//! # Ok::<(), scour::error::ScourError>(())
//! ```

use crate::error::{Result, ResultExt as _, ScourError};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/scour/logs`
/// - macOS: `~/Library/Application Support/scour/logs`
/// - Linux: `~/.local/share/scour/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir()
        .ok_or_else(|| ScourError::Config("Failed to determine data directory".to_owned()))?;

    let log_dir = base_dir.join("scour").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initializes stderr and file logging.
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the file appender fails
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("scour")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| ScourError::Config(format!("Failed to create log file appender: {e}")))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| ScourError::Config(format!("Failed to create env filter: {e}")))?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Logging initialized, log directory: {}", log_dir.display());

    Ok(())
}
