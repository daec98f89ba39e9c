//! Data model of an in-progress listing.
//!
//! Form fields are kept as the raw text the artisan typed; the step
//! validators and the publish payload builder do the parsing.

use crate::upload::{ImageFile, PhotoId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Field name -> message, in the order the problems were found
pub type FieldErrors = IndexMap<String, String>;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    #[default]
    BasicInfo = 1,
    Description = 2,
    Seo = 3,
    Preview = 4,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::BasicInfo,
        WizardStep::Description,
        WizardStep::Seo,
        WizardStep::Preview,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic info & photos",
            WizardStep::Description => "Description",
            WizardStep::Seo => "SEO",
            WizardStep::Preview => "Preview",
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> u8 {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or_else(|| format!("wizard step {} does not exist", number))
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

/// Product categories offered on the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Pottery,
    Textiles,
    Jewelry,
    Woodwork,
    Metalwork,
    Paintings,
    Handicrafts,
    HomeDecor,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Pottery,
        Category::Textiles,
        Category::Jewelry,
        Category::Woodwork,
        Category::Metalwork,
        Category::Paintings,
        Category::Handicrafts,
        Category::HomeDecor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Pottery => "pottery",
            Category::Textiles => "textiles",
            Category::Jewelry => "jewelry",
            Category::Woodwork => "woodwork",
            Category::Metalwork => "metalwork",
            Category::Paintings => "paintings",
            Category::Handicrafts => "handicrafts",
            Category::HomeDecor => "home-decor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Pottery => "Pottery",
            Category::Textiles => "Textiles",
            Category::Jewelry => "Jewelry",
            Category::Woodwork => "Woodwork",
            Category::Metalwork => "Metalwork",
            Category::Paintings => "Paintings",
            Category::Handicrafts => "Handicrafts",
            Category::HomeDecor => "Home Decor",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| format!("unknown category '{}'", s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dimensions {
    pub length: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub sku: String,
    pub dimensions: Dimensions,
    pub weight: String,
    /// Comma separated, e.g. "terracotta, natural dyes"
    pub materials: String,
    pub short_description: String,
}

impl BasicInfo {
    /// Names of the fields whose value differs from `other`
    pub fn changed_fields(&self, other: &BasicInfo) -> Vec<&'static str> {
        let pairs = [
            ("name", self.name != other.name),
            ("category", self.category != other.category),
            ("price", self.price != other.price),
            ("quantity", self.quantity != other.quantity),
            ("sku", self.sku != other.sku),
            ("dimensions", self.dimensions != other.dimensions),
            ("weight", self.weight != other.weight),
            ("materials", self.materials != other.materials),
            ("shortDescription", self.short_description != other.short_description),
        ];
        pairs
            .into_iter()
            .filter_map(|(field, changed)| changed.then_some(field))
            .collect()
    }

    pub fn material_list(&self) -> Vec<String> {
        split_list(&self.materials)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoData {
    pub title: String,
    pub meta_description: String,
    pub slug: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoStatus {
    Uploading,
    Uploaded,
    Failed,
}

/// One image slot. Position 0 in the session's list is the cover image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoItem {
    pub id: PhotoId,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Selected bytes, held until the upload succeeds; never persisted or sent
    /// anywhere but the image store.
    #[serde(skip)]
    local_file: Option<Arc<ImageFile>>,
    pub remote_url: Option<String>,
    pub status: PhotoStatus,
    pub error: Option<String>,
}

// Equality ignores the local bytes, which do not survive a draft round-trip.
impl PartialEq for PhotoItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.file_name == other.file_name
            && self.mime_type == other.mime_type
            && self.size_bytes == other.size_bytes
            && self.remote_url == other.remote_url
            && self.status == other.status
            && self.error == other.error
    }
}

impl PhotoItem {
    /// New slot for a freshly selected file, already in `uploading`
    pub fn uploading(file: Arc<ImageFile>) -> Self {
        Self {
            id: PhotoId::new(),
            file_name: file.file_name.clone(),
            mime_type: file.mime_type.clone(),
            size_bytes: file.size(),
            local_file: Some(file),
            remote_url: None,
            status: PhotoStatus::Uploading,
            error: None,
        }
    }

    pub fn local_file(&self) -> Option<&Arc<ImageFile>> {
        self.local_file.as_ref()
    }

    pub(crate) fn mark_uploaded(&mut self, remote_url: String) {
        self.status = PhotoStatus::Uploaded;
        self.remote_url = Some(remote_url);
        self.error = None;
        self.local_file = None;
    }

    pub(crate) fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = PhotoStatus::Failed;
        self.remote_url = None;
        self.error = Some(reason.into());
    }

    pub(crate) fn mark_uploading(&mut self) {
        self.status = PhotoStatus::Uploading;
        self.error = None;
    }

    /// Only uploaded photos with a URL may go into a publish payload
    pub fn is_publishable(&self) -> bool {
        self.status == PhotoStatus::Uploaded
            && self
                .remote_url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardSession {
    pub current_step: WizardStep,
    pub basic_info: BasicInfo,
    pub photos: Vec<PhotoItem>,
    pub description: String,
    pub seo: SeoData,
    pub errors: FieldErrors,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photo(&self, id: PhotoId) -> Option<&PhotoItem> {
        self.photos.iter().find(|photo| photo.id == id)
    }

    pub(crate) fn photo_mut(&mut self, id: PhotoId) -> Option<&mut PhotoItem> {
        self.photos.iter_mut().find(|photo| photo.id == id)
    }

    pub fn has_uploading(&self) -> bool {
        self.photos
            .iter()
            .any(|photo| photo.status == PhotoStatus::Uploading)
    }

    /// Remote URLs of publishable photos, in listing order
    pub fn uploaded_image_urls(&self) -> Vec<String> {
        self.photos
            .iter()
            .filter(|photo| photo.is_publishable())
            .filter_map(|photo| photo.remote_url.clone())
            .collect()
    }
}

/// Split a comma separated input into trimmed, non-empty entries
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
