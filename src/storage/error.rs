use std::path::PathBuf;

use uuid::Uuid;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No stored vehicle has the requested ID.
    #[error("no vehicle with id {0}")]
    VehicleNotFound(Uuid),

    /// The selected photo file holds no bytes.
    #[error("photo file is empty: {0}")]
    EmptyAvatar(PathBuf),

    /// The selected photo file exceeds the size limit.
    #[error("photo is {size} bytes, the limit is {max} bytes")]
    AvatarTooLarge {
        /// Size of the rejected file in bytes.
        size: u64,
        /// Largest accepted size in bytes.
        max: u64,
    },

    /// The selected photo file is not a PNG or JPEG image that decodes.
    #[error("photo must be a PNG or JPEG image: {0}")]
    UnsupportedImage(PathBuf),

    /// The resized photo could not be encoded.
    #[error("photo could not be encoded: {0}")]
    Image(#[from] image::ImageError),
}
