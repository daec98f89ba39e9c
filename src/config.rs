use crate::error::{ArtisanError, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CURRENCY: &str = "INR";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub api_base_url: Option<String>,
    pub auth_token: Option<String>,
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Unset means the HTTP client's own default applies.
    pub request_timeout_secs: Option<u64>,
    pub draft_db_path: Option<PathBuf>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            auth_token: None,
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            currency: default_currency(),
            request_timeout_secs: None,
            draft_db_path: None,
        }
    }
}

pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(home_dir) = dirs::home_dir() {
        Ok(home_dir.join(".artisanconnect"))
    } else {
        Err(ArtisanError::Config("Could not find home directory".to_string()))
    }
}

pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.json"))
}

pub fn get_logs_dir() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("logs"))
}

/// Draft database location, honouring `draftDbPath` when set
pub fn get_draft_db_path(config: &AppConfig) -> Result<PathBuf> {
    match &config.draft_db_path {
        Some(path) => Ok(path.clone()),
        None => Ok(get_config_dir()?.join("drafts.db")),
    }
}

/// Create a directory readable only by the owner
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;

        // Set permissions to 700 (read/write/execute for owner only) on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = fs::metadata(dir)?;
            let mut permissions = metadata.permissions();
            permissions.set_mode(0o700);
            fs::set_permissions(dir, permissions)?;
        }
    }
    Ok(())
}

pub fn ensure_config_dir() -> Result<()> {
    ensure_private_dir(&get_config_dir()?)
}

pub fn load_config() -> Result<AppConfig> {
    ensure_config_dir()?;
    load_config_from(&get_config_file_path()?)
}

pub fn load_config_from(config_file: &Path) -> Result<AppConfig> {
    if config_file.exists() {
        let content = fs::read_to_string(config_file)?;
        serde_json::from_str(&content)
            .map_err(|e| ArtisanError::Config(e.to_string()))
            .context(&format!("Invalid config file {}", config_file.display()))
    } else {
        Ok(AppConfig::default())
    }
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    ensure_config_dir()?;
    save_config_to(&get_config_file_path()?, config)
}

pub fn save_config_to(config_file: &Path, config: &AppConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;

    fs::write(config_file, content)?;

    // Set permissions to 600 (read/write for owner only) on Unix systems
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = fs::metadata(config_file)?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(0o600);
        fs::set_permissions(config_file, permissions)?;
    }

    Ok(())
}

pub fn clear_config() -> Result<()> {
    save_config(&AppConfig::default())
}
