use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};
use tracing::debug;

use super::error::StorageError;
use crate::model::Avatar;

/// Largest photo file accepted for a vehicle, in bytes.
pub const MAX_AVATAR_BYTES: u64 = 1024 * 1024;

/// Longest edge of a stored photo, in pixels.
pub const AVATAR_EDGE: u32 = 200;

/// Reads a vehicle photo from disk and prepares it for storage.
///
/// The file must be a non-empty PNG or JPEG no larger than [`MAX_AVATAR_BYTES`]
/// that decodes cleanly. The image is scaled to fit [`AVATAR_EDGE`] pixels and
/// re-encoded as PNG.
pub fn load_avatar(path: &Path) -> Result<Avatar, StorageError> {
    let size = fs::metadata(path)?.len();
    if size == 0 {
        return Err(StorageError::EmptyAvatar(path.to_path_buf()));
    }
    if size > MAX_AVATAR_BYTES {
        return Err(StorageError::AvatarTooLarge {
            size,
            max: MAX_AVATAR_BYTES,
        });
    }

    let unsupported = || StorageError::UnsupportedImage(path.to_path_buf());
    let reader = ImageReader::new(Cursor::new(fs::read(path)?)).with_guessed_format()?;
    if !matches!(reader.format(), Some(ImageFormat::Png | ImageFormat::Jpeg)) {
        return Err(unsupported());
    }
    let decoded = reader.decode().map_err(|_| unsupported())?;

    let scaled = decoded.thumbnail(AVATAR_EDGE, AVATAR_EDGE);
    let mut png = Cursor::new(Vec::new());
    scaled.write_to(&mut png, ImageFormat::Png)?;

    debug!(
        path = %path.display(),
        width = scaled.width(),
        height = scaled.height(),
        "photo loaded"
    );
    Ok(Avatar::new(png.into_inner()))
}
