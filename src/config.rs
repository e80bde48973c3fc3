//! Runtime configuration: where data lives and how much to log.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_VAR: &str = "LEASETRACK_DATA_DIR";
/// Environment variable holding the log filter directive.
pub const LOG_VAR: &str = "LEASETRACK_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform does not provide a data directory and none was configured.
    #[error("could not determine XDG data directory; set {DATA_DIR_VAR}")]
    NoDataDir,
}

/// Resolved settings for one run of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the vehicle store, the log file, and the widget stamp.
    pub data_dir: PathBuf,
    /// `tracing-subscriber` filter directive, e.g. `info` or `leasetrack=debug`.
    pub log_filter: String,
}

impl Config {
    /// Reads overrides from the process environment.
    #[mutants::skip]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var_os(DATA_DIR_VAR),
            std::env::var(LOG_VAR).ok(),
        )
    }

    /// Builds a config from explicit overrides, falling back to platform defaults.
    ///
    /// Empty overrides are treated as unset.
    pub fn resolve(
        data_dir: Option<OsString>,
        log_filter: Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = match data_dir.filter(|d| !d.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join("leasetrack"),
        };
        let log_filter = log_filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Self {
            data_dir,
            log_filter,
        })
    }
}
