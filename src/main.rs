//! `artisan-listing [listing.json] [image ...]`
//!
//! Resumes the saved listing draft, merges fields from an optional JSON file,
//! uploads the given images and publishes once every step passes. Without
//! arguments it prints what the current draft holds.

use anyhow::{bail, Context};
use artisan_listing::client::ApiClient;
use artisan_listing::config::{self, AppConfig};
use artisan_listing::content::{GeminiClient, Platform, Tone};
use artisan_listing::database::SqliteStore;
use artisan_listing::draft::DraftStore;
use artisan_listing::events::EventBus;
use artisan_listing::logging;
use artisan_listing::publish::{HttpProductApi, PublishError, PublishSubmitter};
use artisan_listing::upload::{HttpImageStore, ImageFile, ImageUploadClient};
use artisan_listing::wizard::{
    BasicInfo, PhotoStatus, SeoData, WizardController, WizardSession, WizardStep,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Fields a listing file may provide; anything absent keeps the draft's value
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ListingFile {
    basic_info: Option<BasicInfo>,
    description: Option<String>,
    seo: Option<SeoData>,
    tone: Tone,
    platform: Platform,
}

fn read_listing_file(path: &Path) -> anyhow::Result<ListingFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read listing file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid listing file {}", path.display()))
}

fn print_summary(session: &WizardSession) {
    let step = session.current_step;
    println!("Step {} of {}: {}", step.number(), WizardStep::ALL.len(), step.title());
    println!("Name:     {}", session.basic_info.name);
    println!("Category: {}", session.basic_info.category);
    println!("Price:    {}", session.basic_info.price);
    println!("Quantity: {}", session.basic_info.quantity);
    println!("Photos:   {}", session.photos.len());
    for (index, photo) in session.photos.iter().enumerate() {
        let detail = match photo.status {
            PhotoStatus::Uploaded => photo.remote_url.clone().unwrap_or_default(),
            _ => photo.error.clone().unwrap_or_default(),
        };
        let cover = if index == 0 { " (cover)" } else { "" };
        println!(
            "  {}. {}{} [{:?}] {}",
            index + 1,
            photo.file_name,
            cover,
            photo.status,
            detail
        );
    }
    if !session.errors.is_empty() {
        println!("Problems:");
        for (field, message) in &session.errors {
            println!("  {}: {}", field, message);
        }
    }
}

fn open_drafts(config: &AppConfig) -> anyhow::Result<DraftStore> {
    let db_path = config::get_draft_db_path(config)?;
    let store = SqliteStore::open(&db_path)?;
    Ok(DraftStore::new(Arc::new(store)))
}

async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let config = config::load_config().context("Failed to load configuration")?;
    let drafts = open_drafts(&config)?;

    let (listing_path, image_paths): (Option<PathBuf>, Vec<PathBuf>) = match args.split_first() {
        Some((first, rest)) if first.ends_with(".json") => {
            (Some(PathBuf::from(first)), rest.iter().map(PathBuf::from).collect())
        }
        _ => (None, args.iter().map(PathBuf::from).collect()),
    };

    if listing_path.is_none() && image_paths.is_empty() {
        if !drafts.has_draft() {
            println!("No listing draft saved");
            return Ok(());
        }
        print_summary(&drafts.load_draft());
        return Ok(());
    }

    let api = ApiClient::from_config(&config)?;
    if !api.is_authenticated() {
        warn!("No auth token configured, requests will be anonymous");
    }
    let uploader = ImageUploadClient::new(Arc::new(HttpImageStore::new(api.clone())));
    let products = Arc::new(HttpProductApi::new(api));
    let submitter = PublishSubmitter::new(products, config.currency.clone());
    let mut wizard = WizardController::resume(uploader, drafts, EventBus::default());

    let listing = match &listing_path {
        Some(path) => read_listing_file(path)?,
        None => ListingFile::default(),
    };
    if let Some(basic_info) = listing.basic_info {
        wizard.edit_basic_info(|info| *info = basic_info);
    }
    if let Some(description) = listing.description {
        wizard.set_description(description);
    }
    if let Some(seo) = listing.seo {
        wizard.edit_seo(|current| *current = seo);
    }

    let mut files = Vec::with_capacity(image_paths.len());
    for path in &image_paths {
        files.push(ImageFile::read(path).await?);
    }
    if !files.is_empty() {
        let report = wizard.add_photos(files)?;
        for rejection in &report.rejected {
            warn!("Skipped image: {}", rejection);
        }
        info!("Uploading {} image(s)", report.accepted.len());
        wizard.wait_for_uploads().await;
    }

    if wizard.session().description.trim().is_empty() {
        match GeminiClient::from_config(&config) {
            Ok(generator) => {
                let content = wizard
                    .generate_description(&generator, listing.tone, listing.platform)
                    .await;
                info!("Suggested hashtags: {}", content.hashtags.join(" "));
            }
            Err(e) => warn!("Skipping description generation: {}", e),
        }
    }
    wizard.suggest_seo();

    while wizard.current_step() != WizardStep::Preview {
        if !wizard.next() {
            print_summary(wizard.session());
            bail!("Listing is not complete yet; the draft has been saved");
        }
    }

    match wizard.publish(&submitter).await {
        Ok(product_id) => {
            println!("Published product {}", product_id);
            Ok(())
        }
        Err(PublishError::Rejected(errors)) => {
            for (field, message) in &errors {
                error!("{}: {}", field, message);
            }
            bail!("The server rejected the listing; the draft has been kept")
        }
        Err(e) => bail!("Publish failed: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logs_dir = config::get_logs_dir()?;
    if let Err(e) = logging::init_logging(&logs_dir) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    run(args).await
}
