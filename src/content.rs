//! Marketing copy for a listing.
//!
//! Descriptions come from a generative-content endpoint when one is
//! configured; any failure falls back to static text built from the product's
//! name and category, so the wizard never blocks on it.

use crate::config::{AppConfig, DEFAULT_GEMINI_MODEL};
use crate::wizard::{BasicInfo, Category, SeoData, WizardSession};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const SEO_TITLE_MAX: usize = 60;
pub const META_DESCRIPTION_MAX: usize = 160;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Storytelling,
    Luxury,
}

impl Tone {
    fn guidance(self) -> &'static str {
        match self {
            Tone::Professional => "clear, confident and informative",
            Tone::Casual => "warm, friendly and conversational",
            Tone::Storytelling => "narrative, focused on the artisan and the craft tradition",
            Tone::Luxury => "refined and exclusive, emphasising rarity and finish",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    #[default]
    Website,
    Whatsapp,
}

impl Platform {
    fn guidance(self) -> &'static str {
        match self {
            Platform::Instagram => "under 150 words with 5 to 8 relevant hashtags at the end",
            Platform::Facebook => "two short paragraphs with 2 or 3 hashtags",
            Platform::Website => "a product description of 120 to 200 words with 3 hashtags at the end",
            Platform::Whatsapp => "a short message under 80 words with at most 2 hashtags",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Storytelling => "storytelling",
            Tone::Luxury => "luxury",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Website => "website",
            Platform::Whatsapp => "whatsapp",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub name: String,
    pub category: String,
    pub materials: Vec<String>,
    pub description: String,
    pub tone: Tone,
    pub platform: Platform,
}

impl ContentRequest {
    /// Descriptors taken from what the artisan has entered so far
    pub fn from_session(session: &WizardSession, tone: Tone, platform: Platform) -> Self {
        let basic = &session.basic_info;
        Self {
            name: basic.name.trim().to_string(),
            category: basic.category.trim().to_string(),
            materials: basic.material_list(),
            description: basic.short_description.trim().to_string(),
            tone,
            platform,
        }
    }

    fn prompt(&self) -> String {
        let mut prompt = format!(
            "Write marketing copy for a handmade product sold by an Indian artisan.\n\
             Product name: {}\nCategory: {}\n",
            self.name, self.category
        );
        if !self.materials.is_empty() {
            prompt.push_str(&format!("Materials: {}\n", self.materials.join(", ")));
        }
        if !self.description.is_empty() {
            prompt.push_str(&format!("Notes from the artisan: {}\n", self.description));
        }
        prompt.push_str(&format!(
            "Tone: {}.\nFormat for {}: {}.\nReturn only the copy.",
            self.tone.guidance(),
            self.platform,
            self.platform.guidance()
        ));
        prompt
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no API key configured for content generation")]
    MissingApiKey,

    #[error("network error: {0}")]
    Transport(String),

    #[error("content service returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("content service returned no text")]
    EmptyResponse,

    #[error("unexpected response: {0}")]
    Serde(String),
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &ContentRequest) -> Result<String, ContentError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// First text part of the first candidate
fn parse_generated_text(body: &str) -> Result<String, ContentError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ContentError::Serde(e.to_string()))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(ContentError::EmptyResponse)
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ContentError> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ContentError::MissingApiKey)?;

        let model = if config.gemini_model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL
        } else {
            config.gemini_model.trim()
        };

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ContentError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            ..Self::new(api_key, model)
        })
    }

    /// Point the client at another host (local proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, request: &ContentRequest) -> Result<String, ContentError> {
        let prompt = request.prompt();
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        debug!(model = %self.model, platform = %request.platform, "Requesting marketing copy");

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ContentError::Http {
                status: status.as_u16(),
                message: crate::client::server_error_message(status, &text),
            });
        }

        parse_generated_text(&text)
    }
}

/// `#word` tokens in order of first appearance, without case-insensitive repeats
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut hashtags = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '#' {
            continue;
        }
        let mut word = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                word.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !word.is_empty() && seen.insert(word.to_lowercase()) {
            hashtags.push(format!("#{}", word));
        }
    }

    hashtags
}

fn category_phrase(category: &str) -> String {
    match category.parse::<Category>() {
        Ok(category) => category.label().to_lowercase(),
        Err(_) if category.trim().is_empty() => "handicraft".to_string(),
        Err(_) => category.trim().to_lowercase(),
    }
}

/// Static description used whenever generated copy is unavailable
pub fn fallback_description(name: &str, category: &str) -> String {
    let name = match name.trim() {
        "" => "This piece",
        name => name,
    };
    format!(
        "{} is a handcrafted {} piece made by skilled Indian artisans using traditional techniques. \
         Every item is shaped by hand, so small variations make each one unique. \
         Bring home a piece of living heritage and support the craftspeople who keep it alive.",
        name,
        category_phrase(category)
    )
}

fn fallback_hashtags(category: &str) -> Vec<String> {
    let mut hashtags = vec!["#handmade".to_string()];
    let tag: String = category
        .parse::<Category>()
        .map(|c| c.as_str().to_string())
        .unwrap_or_else(|_| category.trim().to_lowercase())
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    if !tag.is_empty() {
        hashtags.push(format!("#{}", tag));
    }
    hashtags.push("#artisanconnect".to_string());
    hashtags
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketingContent {
    pub text: String,
    pub hashtags: Vec<String>,
    /// False when the static fallback was used
    pub generated: bool,
}

pub async fn generate_marketing_content(
    generator: &dyn ContentGenerator,
    request: &ContentRequest,
) -> MarketingContent {
    match generator.generate(request).await {
        Ok(text) => {
            info!(
                platform = %request.platform,
                tone = %request.tone,
                "✓ Marketing copy generated"
            );
            MarketingContent {
                hashtags: extract_hashtags(&text),
                text,
                generated: true,
            }
        }
        Err(e) => {
            warn!("Content generation unavailable, using fallback: {}", e);
            MarketingContent {
                text: fallback_description(&request.name, &request.category),
                hashtags: fallback_hashtags(&request.category),
                generated: false,
            }
        }
    }
}

/// Lower-case ASCII alphanumerics joined by single dashes
pub fn slugify(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Cut at a word boundary so the result is at most `max` characters
fn truncate_words(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    match cut.rfind(' ') {
        Some(space) if space > 0 => cut[..space].trim_end().to_string(),
        _ => cut,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn suggest_seo(basic_info: &BasicInfo, description: &str) -> SeoData {
    let name = basic_info.name.trim();
    let category = basic_info.category.parse::<Category>().ok();

    let title = match category {
        Some(category) if !name.is_empty() => {
            let full = format!("{} | Handmade {}", name, category.label());
            if full.chars().count() <= SEO_TITLE_MAX {
                full
            } else {
                truncate_words(name, SEO_TITLE_MAX)
            }
        }
        _ => truncate_words(name, SEO_TITLE_MAX),
    };

    let source = [description, basic_info.short_description.as_str()]
        .into_iter()
        .map(collapse_whitespace)
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| fallback_description(name, &basic_info.category));
    let meta_description = truncate_words(&source, META_DESCRIPTION_MAX);

    let mut seen = HashSet::new();
    let keywords = category
        .map(|c| c.as_str().to_string())
        .into_iter()
        .chain(basic_info.material_list())
        .filter(|keyword| seen.insert(keyword.to_lowercase()))
        .collect();

    SeoData {
        title,
        meta_description,
        slug: slugify(name),
        keywords,
    }
}
