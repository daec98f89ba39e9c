//! Image Upload Client.
//!
//! Validates images locally, then hands them to an [`ImageStore`]. Uploads run
//! as independent tokio tasks and report back over a channel keyed by
//! [`PhotoId`]; the caller owns every photo state transition.

mod http;
mod types;

pub use http::{HttpImageStore, UPLOAD_IMAGES_PATH};
pub use types::*;

use crate::validation::{validate_batch, validate_image};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// External object storage that turns an image into a durable URL
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, file: &ImageFile) -> Result<String, UploadError>;
}

#[derive(Clone)]
pub struct ImageUploadClient {
    store: Arc<dyn ImageStore>,
}

impl std::fmt::Debug for ImageUploadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUploadClient")
            .field("store", &"<image store>")
            .finish()
    }
}

impl ImageUploadClient {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self { store }
    }

    pub fn validate(&self, file: &ImageFile) -> Result<(), UploadError> {
        validate_image(file)
    }

    pub fn validate_batch(&self, files: &[ImageFile], existing: usize) -> Result<(), UploadError> {
        validate_batch(files.len(), existing)
    }

    /// Transfer one image. Never retries on its own.
    pub async fn upload(&self, file: &ImageFile) -> Result<String, UploadError> {
        self.validate(file)?;

        debug!(file = %file.file_name, size = file.size(), "Uploading image");
        match self.store.store(file).await {
            Ok(url) if url.trim().is_empty() => Err(UploadError::UploadFailed(
                "storage returned an empty URL".to_string(),
            )),
            Ok(url) => Ok(url),
            Err(UploadError::UploadFailed(reason)) => Err(UploadError::UploadFailed(reason)),
            Err(other) => Err(UploadError::UploadFailed(other.to_string())),
        }
    }

    /// Background uploads are tokio tasks; fail early when there is no
    /// runtime to spawn them on.
    pub fn ensure_runtime() -> Result<(), UploadError> {
        tokio::runtime::Handle::try_current()
            .map(|_| ())
            .map_err(|_| UploadError::NoRuntime)
    }

    /// Run `upload` in the background and send the outcome on `outcomes`.
    /// Must be called from inside a tokio runtime.
    pub fn spawn_upload(
        &self,
        photo_id: PhotoId,
        file: Arc<ImageFile>,
        outcomes: mpsc::UnboundedSender<UploadOutcome>,
    ) -> JoinHandle<()> {
        let client = self.clone();

        tokio::spawn(async move {
            let result = client.upload(&file).await;
            if let Err(e) = &result {
                warn!(photo_id = %photo_id, file = %file.file_name, "Image upload failed: {}", e);
            }

            // The receiver is gone only when the wizard was dropped
            if outcomes.send(UploadOutcome { photo_id, result }).is_err() {
                debug!(photo_id = %photo_id, "Upload finished after the wizard closed");
            }
        })
    }
}
