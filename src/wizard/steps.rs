//! Per-step validators.
//!
//! Pure functions of the session: each returns the field errors that block
//! leaving a step, and an empty map when the step passes.

use super::session::{
    BasicInfo, Category, FieldErrors, PhotoItem, PhotoStatus, SeoData, WizardSession, WizardStep,
};

pub const FIELD_NAME: &str = "name";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_PHOTOS: &str = "photos";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_SEO_TITLE: &str = "seo.title";
pub const FIELD_SEO_META_DESCRIPTION: &str = "seo.metaDescription";
/// Errors that belong to the whole form rather than one field
pub const FIELD_FORM: &str = "form";

pub const MSG_PHOTOS_REQUIRED: &str = "at least one photo is required";
pub const MSG_UPLOADS_PENDING: &str = "please wait for uploads to finish";
pub const MSG_UPLOADS_FAILED: &str = "remove or retry failed uploads";

pub fn validate_step(step: WizardStep, session: &WizardSession) -> FieldErrors {
    match step {
        WizardStep::BasicInfo => validate_basic_info(&session.basic_info, &session.photos),
        WizardStep::Description => validate_description(&session.description),
        WizardStep::Seo => validate_seo(&session.seo),
        WizardStep::Preview => validate_all(session),
    }
}

/// Everything the preview step checks before publishing
pub fn validate_all(session: &WizardSession) -> FieldErrors {
    let mut errors = validate_basic_info(&session.basic_info, &session.photos);
    errors.extend(validate_description(&session.description));
    errors.extend(validate_seo(&session.seo));
    errors
}

pub fn validate_basic_info(basic_info: &BasicInfo, photos: &[PhotoItem]) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if basic_info.name.trim().is_empty() {
        errors.insert(FIELD_NAME.to_string(), "product name is required".to_string());
    }

    if basic_info.category.trim().is_empty() {
        errors.insert(FIELD_CATEGORY.to_string(), "category is required".to_string());
    } else if basic_info.category.parse::<Category>().is_err() {
        let choices: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        errors.insert(
            FIELD_CATEGORY.to_string(),
            format!("choose one of: {}", choices.join(", ")),
        );
    }

    if basic_info.price.trim().is_empty() {
        errors.insert(FIELD_PRICE.to_string(), "price is required".to_string());
    } else if parse_price(&basic_info.price).is_none() {
        errors.insert(
            FIELD_PRICE.to_string(),
            "price must be a number greater than 0".to_string(),
        );
    }

    if basic_info.quantity.trim().is_empty() {
        errors.insert(FIELD_QUANTITY.to_string(), "quantity is required".to_string());
    } else if parse_quantity(&basic_info.quantity).is_none() {
        errors.insert(
            FIELD_QUANTITY.to_string(),
            "quantity must be a whole number greater than 0".to_string(),
        );
    }

    if let Some(message) = photos_error(photos) {
        errors.insert(FIELD_PHOTOS.to_string(), message.to_string());
    }

    errors
}

fn photos_error(photos: &[PhotoItem]) -> Option<&'static str> {
    if photos.is_empty() {
        return Some(MSG_PHOTOS_REQUIRED);
    }
    if photos.iter().any(|p| p.status == PhotoStatus::Uploading) {
        return Some(MSG_UPLOADS_PENDING);
    }
    if photos.iter().any(|p| p.status == PhotoStatus::Failed) {
        return Some(MSG_UPLOADS_FAILED);
    }
    None
}

pub fn validate_description(description: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if description.trim().is_empty() {
        errors.insert(
            FIELD_DESCRIPTION.to_string(),
            "description is required".to_string(),
        );
    }
    errors
}

pub fn validate_seo(seo: &SeoData) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if seo.title.trim().is_empty() {
        errors.insert(FIELD_SEO_TITLE.to_string(), "SEO title is required".to_string());
    }
    if seo.meta_description.trim().is_empty() {
        errors.insert(
            FIELD_SEO_META_DESCRIPTION.to_string(),
            "meta description is required".to_string(),
        );
    }
    errors
}

/// Positive, finite price
pub fn parse_price(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price > 0.0)
}

/// Positive whole quantity
pub fn parse_quantity(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|quantity| *quantity > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::ImageFile;
    use std::sync::Arc;

    fn valid_basic_info() -> BasicInfo {
        BasicInfo {
            name: "Clay Pot".to_string(),
            category: "pottery".to_string(),
            price: "500".to_string(),
            quantity: "2".to_string(),
            ..BasicInfo::default()
        }
    }

    fn photo(status: PhotoStatus) -> PhotoItem {
        let file = ImageFile::new("a.jpg", "image/jpeg", vec![1]);
        let mut photo = PhotoItem::uploading(Arc::new(file));
        match status {
            PhotoStatus::Uploading => {}
            PhotoStatus::Uploaded => photo.mark_uploaded("https://cdn.example/a.jpg".to_string()),
            PhotoStatus::Failed => photo.mark_failed("status 500"),
        }
        photo
    }

    #[test]
    fn test_basic_info_passes() {
        let errors = validate_basic_info(&valid_basic_info(), &[photo(PhotoStatus::Uploaded)]);
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_empty_basic_info_reports_every_field() {
        let errors = validate_basic_info(&BasicInfo::default(), &[]);
        let keys: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "category", "price", "quantity", "photos"]);
        assert_eq!(errors[FIELD_PHOTOS], MSG_PHOTOS_REQUIRED);
    }

    #[test]
    fn test_numeric_rules() {
        let mut info = valid_basic_info();
        for bad in ["0", "-5", "abc", "NaN", "inf"] {
            info.price = bad.to_string();
            let errors = validate_basic_info(&info, &[photo(PhotoStatus::Uploaded)]);
            assert!(errors.contains_key(FIELD_PRICE), "price {:?} accepted", bad);
        }
        info.price = "499.50".to_string();
        for bad in ["0", "1.5", "-1", "two"] {
            info.quantity = bad.to_string();
            let errors = validate_basic_info(&info, &[photo(PhotoStatus::Uploaded)]);
            assert!(errors.contains_key(FIELD_QUANTITY), "quantity {:?} accepted", bad);
        }
    }

    #[test]
    fn test_unknown_category() {
        let mut info = valid_basic_info();
        info.category = "gadgets".to_string();
        let errors = validate_basic_info(&info, &[photo(PhotoStatus::Uploaded)]);
        assert!(errors[FIELD_CATEGORY].starts_with("choose one of: pottery"));
    }

    #[test]
    fn test_pending_and_failed_uploads_block_step() {
        let info = valid_basic_info();

        let photos = [photo(PhotoStatus::Uploaded), photo(PhotoStatus::Uploading)];
        let errors = validate_basic_info(&info, &photos);
        assert_eq!(errors[FIELD_PHOTOS], MSG_UPLOADS_PENDING);

        let photos = [photo(PhotoStatus::Failed), photo(PhotoStatus::Uploaded)];
        let errors = validate_basic_info(&info, &photos);
        assert_eq!(errors[FIELD_PHOTOS], MSG_UPLOADS_FAILED);

        let photos = [photo(PhotoStatus::Failed), photo(PhotoStatus::Uploading)];
        let errors = validate_basic_info(&info, &photos);
        assert_eq!(errors[FIELD_PHOTOS], MSG_UPLOADS_PENDING);
    }

    #[test]
    fn test_description_and_seo_steps() {
        let mut session = WizardSession::new();
        assert!(validate_step(WizardStep::Description, &session).contains_key(FIELD_DESCRIPTION));

        session.description = "Hand-thrown terracotta".to_string();
        assert!(validate_step(WizardStep::Description, &session).is_empty());

        let errors = validate_step(WizardStep::Seo, &session);
        assert!(errors.contains_key(FIELD_SEO_TITLE));
        assert!(errors.contains_key(FIELD_SEO_META_DESCRIPTION));

        session.seo.title = "Clay Pot".to_string();
        session.seo.meta_description = "Terracotta pot".to_string();
        assert!(validate_step(WizardStep::Seo, &session).is_empty());
    }

    #[test]
    fn test_preview_revalidates_everything() {
        let mut session = WizardSession::new();
        session.description = "Hand-thrown".to_string();
        let errors = validate_step(WizardStep::Preview, &session);
        assert!(errors.contains_key(FIELD_NAME));
        assert!(errors.contains_key(FIELD_SEO_TITLE));
        assert!(!errors.contains_key(FIELD_DESCRIPTION));

        session.basic_info = valid_basic_info();
        session.photos.push(photo(PhotoStatus::Uploaded));
        session.seo.title = "Clay Pot".to_string();
        session.seo.meta_description = "Terracotta pot".to_string();
        assert!(validate_step(WizardStep::Preview, &session).is_empty());
    }
}
