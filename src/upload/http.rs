//! Image store backed by the ArtisanConnect upload endpoint.
//!
//! Sends one multipart request per image and expects one URL back per file.

use super::{ImageFile, ImageStore, UploadError};
use crate::client::{server_error_message, ApiClient};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

pub const UPLOAD_IMAGES_PATH: &str = "api/upload/images";

#[derive(Debug, Clone)]
pub struct HttpImageStore {
    client: ApiClient,
}

impl HttpImageStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    urls: Vec<String>,
}

fn parse_upload_response(body: &str) -> Result<String, UploadError> {
    let response: UploadResponse = serde_json::from_str(body)
        .map_err(|e| UploadError::UploadFailed(format!("Failed to parse upload response: {}", e)))?;

    response
        .urls
        .into_iter()
        .find(|url| !url.trim().is_empty())
        .ok_or_else(|| UploadError::UploadFailed("upload response contained no URL".to_string()))
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn store(&self, file: &ImageFile) -> Result<String, UploadError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| UploadError::UploadFailed(format!("Invalid MIME type: {}", e)))?;
        let form = Form::new().part("images", part);

        let request = self
            .client
            .post(UPLOAD_IMAGES_PATH)
            .map_err(|e| UploadError::UploadFailed(e.to_string()))?;

        let response = request
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::UploadFailed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::UploadFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(UploadError::UploadFailed(server_error_message(status, &body)));
        }

        let url = parse_upload_response(&body)?;
        info!(file = %file.file_name, url = %url, "✓ Image stored");
        Ok(url)
    }
}
