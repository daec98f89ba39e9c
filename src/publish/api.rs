//! Product-creation endpoint contract and its HTTP implementation.

use crate::client::{server_error_message, ApiClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const PRODUCTS_PATH: &str = "api/products";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadDimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// JSON body accepted by `POST api/products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub currency: String,
    pub stock_quantity: u32,
    pub materials: Vec<String>,
    pub tags: Vec<String>,
    pub dimensions: PayloadDimensions,
    pub image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    /// Server rejected specific fields
    #[error("validation failed ({} field errors)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Serde(String),
}

#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn create_product(&self, payload: &ProductPayload) -> Result<ProductId, ApiError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProductResponse {
    id: Option<String>,
    product_id: Option<String>,
    product: Option<CreatedProduct>,
}

#[derive(Debug, Deserialize)]
struct CreatedProduct {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct ValidationErrorBody {
    #[serde(default)]
    errors: Vec<FieldError>,
}

/// Normalize a success body into the created product id
fn parse_created_product(body: &str) -> Result<ProductId, ApiError> {
    let response: CreateProductResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Serde(e.to_string()))?;

    response
        .id
        .or(response.product_id)
        .or(response.product.map(|product| product.id))
        .filter(|id| !id.trim().is_empty())
        .map(ProductId)
        .ok_or_else(|| ApiError::Serde("response did not include a product id".to_string()))
}

/// Normalize an error body: field errors when the server listed any
fn parse_error_response(status: reqwest::StatusCode, body: &str) -> ApiError {
    let parsed: ValidationErrorBody = serde_json::from_str(body).unwrap_or_default();
    if !parsed.errors.is_empty() {
        return ApiError::Validation(parsed.errors);
    }
    ApiError::Http {
        status: status.as_u16(),
        message: server_error_message(status, body),
    }
}

#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: ApiClient,
}

impl HttpProductApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn create_product(&self, payload: &ProductPayload) -> Result<ProductId, ApiError> {
        let request = self
            .client
            .post(PRODUCTS_PATH)
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = request
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(parse_error_response(status, &body));
        }

        let product_id = parse_created_product(&body)?;
        info!(product_id = %product_id, "✓ Product created");
        Ok(product_id)
    }
}
