use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use super::traits::WidgetRefresher;

/// File the widget process watches for changes.
const STAMP_FILE: &str = "widget-refresh";

/// Signals the widget by rewriting a timestamp file in the data directory.
#[derive(Debug, Clone)]
pub struct StampFileRefresher {
    path: PathBuf,
}

impl StampFileRefresher {
    /// Creates a refresher writing into `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STAMP_FILE),
        }
    }

    /// Returns the path of the stamp file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WidgetRefresher for StampFileRefresher {
    fn reload_all(&self) {
        match fs::write(&self.path, Utc::now().to_rfc3339()) {
            Ok(()) => debug!(path = %self.path.display(), "widget refresh requested"),
            Err(e) => warn!(error = %e, path = %self.path.display(), "widget refresh failed"),
        }
    }
}
