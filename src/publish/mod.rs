//! Publish Submitter.
//!
//! Turns a finished [`WizardSession`] into a product-creation request and
//! translates the endpoint's answer into something the wizard can show.

mod api;

pub use api::{
    ApiError, FieldError, HttpProductApi, PayloadDimensions, ProductApi, ProductId,
    ProductPayload, PRODUCTS_PATH,
};

use crate::wizard::steps::{
    parse_price, parse_quantity, validate_step, FIELD_CATEGORY, FIELD_PHOTOS, FIELD_PRICE,
    FIELD_QUANTITY, FIELD_SEO_META_DESCRIPTION, FIELD_SEO_TITLE,
};
use crate::wizard::{Category, FieldErrors, WizardSession, WizardStep};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

pub const GENERIC_PUBLISH_FAILURE: &str = "Could not publish the listing. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PublishError {
    #[error("photos are still uploading")]
    NotReady,

    #[error("the listing has {} problem(s) to fix", .0.len())]
    Validation(FieldErrors),

    #[error("at least one uploaded photo is required")]
    NoUploadedPhotos,

    #[error("the server rejected {} field(s)", .0.len())]
    Rejected(FieldErrors),

    #[error("{0}")]
    Failed(String),
}

/// Session error key for a field name reported by the product endpoint
pub fn session_field_for(server_field: &str) -> &str {
    match server_field {
        "stockQuantity" => FIELD_QUANTITY,
        "seoTitle" => FIELD_SEO_TITLE,
        "metaDescription" => FIELD_SEO_META_DESCRIPTION,
        "imageUrls" => FIELD_PHOTOS,
        other => other,
    }
}

fn parse_dimension(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Build the creation payload. Only uploaded photos are included, in listing
/// order, so the first uploaded photo is the cover.
pub fn build_payload(
    session: &WizardSession,
    currency: &str,
) -> Result<ProductPayload, PublishError> {
    let basic = &session.basic_info;

    let mut errors = FieldErrors::new();
    let category = basic.category.parse::<Category>();
    if category.is_err() {
        errors.insert(FIELD_CATEGORY.to_string(), "category is required".to_string());
    }
    let price = parse_price(&basic.price);
    if price.is_none() {
        errors.insert(FIELD_PRICE.to_string(), "price must be a number greater than 0".to_string());
    }
    let stock_quantity = parse_quantity(&basic.quantity);
    if stock_quantity.is_none() {
        errors.insert(
            FIELD_QUANTITY.to_string(),
            "quantity must be a whole number greater than 0".to_string(),
        );
    }

    let (Ok(category), Some(price), Some(stock_quantity)) = (category, price, stock_quantity) else {
        return Err(PublishError::Validation(errors));
    };

    let image_urls = session.uploaded_image_urls();
    if image_urls.is_empty() {
        return Err(PublishError::NoUploadedPhotos);
    }

    let tags = session
        .seo
        .keywords
        .iter()
        .filter_map(|keyword| non_empty(keyword))
        .collect();

    Ok(ProductPayload {
        name: basic.name.trim().to_string(),
        description: session.description.trim().to_string(),
        category: category.as_str().to_string(),
        price,
        currency: currency.to_string(),
        stock_quantity,
        materials: basic.material_list(),
        tags,
        dimensions: PayloadDimensions {
            length: parse_dimension(&basic.dimensions.length),
            width: parse_dimension(&basic.dimensions.width),
            height: parse_dimension(&basic.dimensions.height),
            weight: parse_dimension(&basic.weight),
        },
        image_urls,
        seo_title: non_empty(&session.seo.title),
        meta_description: non_empty(&session.seo.meta_description),
    })
}

#[derive(Clone)]
pub struct PublishSubmitter {
    api: Arc<dyn ProductApi>,
    currency: String,
}

impl std::fmt::Debug for PublishSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishSubmitter")
            .field("api", &"<product api>")
            .field("currency", &self.currency)
            .finish()
    }
}

impl PublishSubmitter {
    pub fn new(api: Arc<dyn ProductApi>, currency: impl Into<String>) -> Self {
        Self {
            api,
            currency: currency.into(),
        }
    }

    /// Check readiness, validate, build the payload and create the product.
    /// Does not touch the session; the wizard applies the outcome.
    pub async fn submit(&self, session: &WizardSession) -> Result<ProductId, PublishError> {
        if session.has_uploading() {
            return Err(PublishError::NotReady);
        }

        let errors = validate_step(WizardStep::Preview, session);
        if !errors.is_empty() {
            return Err(PublishError::Validation(errors));
        }

        let payload = build_payload(session, &self.currency)?;
        info!(
            name = %payload.name,
            images = payload.image_urls.len(),
            "Publishing listing"
        );

        self.api
            .create_product(&payload)
            .await
            .map_err(map_api_error)
    }
}

fn map_api_error(err: ApiError) -> PublishError {
    match err {
        ApiError::Validation(field_errors) => {
            warn!("Listing rejected with {} field error(s)", field_errors.len());
            let mut errors = FieldErrors::new();
            for FieldError { field, message } in field_errors {
                errors.insert(session_field_for(&field).to_string(), message);
            }
            PublishError::Rejected(errors)
        }
        other => {
            error!("Publish failed: {}", other);
            PublishError::Failed(GENERIC_PUBLISH_FAILURE.to_string())
        }
    }
}
