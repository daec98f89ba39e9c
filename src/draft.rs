//! Draft persistence for the listing wizard.
//!
//! A draft is the whole [`WizardSession`] as JSON under one fixed key. Reads
//! never fail the caller: a missing or unreadable draft is an empty session.

use crate::error::{ArtisanError, Result};
use crate::wizard::WizardSession;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub const DRAFT_KEY: &str = "artisanconnect.productDraft";

/// Durable local key-value storage. No schema: callers validate what they read.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| ArtisanError::LockPoisoned(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ArtisanError::LockPoisoned(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ArtisanError::LockPoisoned(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore")
            .field("store", &"<key-value store>")
            .field("key", &self.key)
            .finish()
    }
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: DRAFT_KEY.to_string(),
        }
    }

    /// Overwrite the saved draft with `session` (last write wins)
    pub fn save_draft(&self, session: &WizardSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.store.set(&self.key, &json)?;
        debug!(
            step = session.current_step.number(),
            photos = session.photos.len(),
            "Draft saved"
        );
        Ok(())
    }

    /// Saved draft, or an empty session when there is none or it cannot be read
    pub fn load_draft(&self) -> WizardSession {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return WizardSession::default(),
            Err(e) => {
                warn!("Failed to read draft, starting empty: {}", e);
                return WizardSession::default();
            }
        };

        match serde_json::from_str::<WizardSession>(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!("Discarding malformed draft: {}", e);
                WizardSession::default()
            }
        }
    }

    pub fn has_draft(&self) -> bool {
        matches!(self.store.get(&self.key), Ok(Some(_)))
    }

    pub fn clear_draft(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}
