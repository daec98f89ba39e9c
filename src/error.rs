use thiserror::Error;

/// ArtisanConnect listing errors
#[derive(Debug, Error)]
pub enum ArtisanError {
    /// Draft database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (file type, size, listing fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Mutex poison error
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type Result<T> = std::result::Result<T, ArtisanError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<ArtisanError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err: ArtisanError = e.into();
            match err {
                ArtisanError::Config(s) => ArtisanError::Config(format!("{}: {}", msg, s)),
                ArtisanError::Validation(s) => {
                    ArtisanError::Validation(format!("{}: {}", msg, s))
                }
                ArtisanError::LockPoisoned(s) => {
                    ArtisanError::LockPoisoned(format!("{}: {}", msg, s))
                }
                other => other,
            }
        })
    }
}
