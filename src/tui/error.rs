use crate::storage::StorageError;

/// Errors that end the TUI event loop.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The vehicle store could not be read at startup.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
