//! File-backed `tracing` setup. The terminal belongs to the UI, so log
//! lines go to `leasetrack.log` in the data directory.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "leasetrack.log";

/// Errors that can occur while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("could not open log file: {0}")]
    Io(#[from] std::io::Error),

    /// The filter directive did not parse.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber was already installed.
    #[error("logging already initialised")]
    AlreadyInitialised,
}

/// Returns the log file path inside `data_dir`.
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}

/// Installs the global subscriber, appending to the log file in `data_dir`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(data_dir: &Path, filter: &str) -> Result<PathBuf, LoggingError> {
    fs::create_dir_all(data_dir)?;
    let path = log_path(data_dir);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter = EnvFilter::try_new(filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialised)?;
    Ok(path)
}
