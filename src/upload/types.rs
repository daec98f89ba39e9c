//! Type definitions for image uploads.
//!
//! Defines ImageFile, PhotoId, UploadOutcome and the upload error taxonomy.

use crate::error::ArtisanError;
use crate::validation::mime_type_for_path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier of a photo slot, generated when the file is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An image selected by the user. Raw bytes never leave the process except
/// through the image store.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Read an image from disk, taking the MIME type from the extension.
    /// Unknown extensions get `application/octet-stream` and fail validation later.
    pub async fn read(path: &Path) -> Result<Self, ArtisanError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ArtisanError::Validation(format!("Invalid file name: {}", path.display()))
            })?
            .to_string();
        let mime_type = mime_type_for_path(path).unwrap_or("application/octet-stream");

        Ok(Self::new(file_name, mime_type, bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("{file_name}: unsupported image type '{mime_type}' (use JPEG, PNG or WebP)")]
    InvalidType { file_name: String, mime_type: String },

    #[error("{file_name}: image is {size} bytes, the limit is {max} bytes")]
    TooLarge { file_name: String, size: u64, max: u64 },

    #[error("cannot add {requested} photos to {existing}, a listing holds at most {max}")]
    TooMany { requested: usize, existing: usize, max: usize },

    #[error("upload failed: {0}")]
    UploadFailed(String),

    #[error("photo {0} is not in the listing")]
    UnknownPhoto(PhotoId),

    #[error("photo {0} has not failed, nothing to retry")]
    NotRetryable(PhotoId),

    #[error("photo {0} has no local file to upload; remove it and add the image again")]
    NoLocalFile(PhotoId),

    #[error("uploads need a running tokio runtime")]
    NoRuntime,
}

/// Completion of one background upload, correlated by photo id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub photo_id: PhotoId,
    pub result: Result<String, UploadError>,
}
