use crate::upload::{ImageFile, UploadError};
use std::path::Path;

/// Maximum size of a single product image (5MB)
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum number of photos on one listing
pub const MAX_PHOTOS: usize = 10;

/// MIME types accepted by the image storage endpoint
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Guess an image MIME type from a file extension
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Validate type and size of one image before any network call
pub fn validate_image(file: &ImageFile) -> Result<(), UploadError> {
    let mime_type = file.mime_type.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&mime_type.as_str()) {
        return Err(UploadError::InvalidType {
            file_name: file.file_name.clone(),
            mime_type: file.mime_type.clone(),
        });
    }

    let size = file.size();
    if size > MAX_IMAGE_SIZE {
        return Err(UploadError::TooLarge {
            file_name: file.file_name.clone(),
            size,
            max: MAX_IMAGE_SIZE,
        });
    }

    Ok(())
}

/// Validate that a selection fits in the remaining photo slots
pub fn validate_batch(batch_len: usize, existing: usize) -> Result<(), UploadError> {
    if batch_len + existing > MAX_PHOTOS {
        return Err(UploadError::TooMany {
            requested: batch_len,
            existing,
            max: MAX_PHOTOS,
        });
    }
    Ok(())
}
