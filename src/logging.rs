//! File logging. The terminal belongs to the UI, so tracing output goes to a
//! log file through a non-blocking writer.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{OverlayError, Result};

const LOG_FILE_NAME: &str = "cmdline-overlay.log";

/// Default log location under the platform data directory.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cmdline-overlay").map(|dirs| dirs.data_dir().join(LOG_FILE_NAME))
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("cmdline_overlay={}", level)))
        .unwrap_or_else(|_| EnvFilter::new("cmdline_overlay=info"))
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init(level: &str, path: &Path) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| OverlayError::Logging(format!("Not a file path: {}", path.display())))?;

    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| OverlayError::Logging(e.to_string()))?;

    tracing::info!("Logging to {}", path.display());
    Ok(guard)
}
