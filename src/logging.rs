//! File-backed tracing setup.
//!
//! The terminal is owned by the UI, so log output goes to a file instead of
//! stdout or stderr.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Default log file location: `<data_local_dir>/tasklist/logs/tasklist.log`.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tasklist")
        .join("logs")
        .join("tasklist.log")
}

/// Build the event filter. A valid `RUST_LOG` replaces `level` entirely.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref(), level)
}

/// `level` is validated even when `rust_log` wins, so a bad flag is always reported.
fn filter_from(rust_log: Option<&str>, level: &str) -> Result<EnvFilter> {
    let fallback = EnvFilter::try_new(level).map_err(|_| Error::LogFilter(level.to_string()))?;
    match rust_log.filter(|s| !s.trim().is_empty()).map(EnvFilter::try_new) {
        Some(Ok(filter)) => Ok(filter),
        _ => Ok(fallback),
    }
}

/// Install the global subscriber writing to `path`.
pub fn setup_logging(level: &str, path: &Path) -> Result<()> {
    let filter = build_filter(level)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let file = fs::File::create(path).map_err(|source| Error::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}
