use crate::upload::PhotoId;
use crate::wizard::WizardStep;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequence number for ordering events
pub type EventSequence = u64;

/// Notification emitted by the listing wizard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardEvent {
    pub sequence: EventSequence,
    pub timestamp: DateTime<Utc>,
    pub payload: WizardEventPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEventPayload {
    /// Photo accepted and its upload started
    PhotoAdded { photo_id: PhotoId, file_name: String },

    PhotoUploaded { photo_id: PhotoId, remote_url: String },

    PhotoFailed { photo_id: PhotoId, reason: String },

    PhotoRemoved { photo_id: PhotoId },

    StepChanged { from: WizardStep, to: WizardStep },

    DraftSaved,

    /// Listing created; the caller should navigate away
    Published { product_id: String },
}

impl WizardEvent {
    pub fn photo_id(&self) -> Option<PhotoId> {
        match &self.payload {
            WizardEventPayload::PhotoAdded { photo_id, .. }
            | WizardEventPayload::PhotoUploaded { photo_id, .. }
            | WizardEventPayload::PhotoFailed { photo_id, .. }
            | WizardEventPayload::PhotoRemoved { photo_id } => Some(*photo_id),
            _ => None,
        }
    }

    pub fn payload_type(&self) -> &str {
        match &self.payload {
            WizardEventPayload::PhotoAdded { .. } => "photo_added",
            WizardEventPayload::PhotoUploaded { .. } => "photo_uploaded",
            WizardEventPayload::PhotoFailed { .. } => "photo_failed",
            WizardEventPayload::PhotoRemoved { .. } => "photo_removed",
            WizardEventPayload::StepChanged { .. } => "step_changed",
            WizardEventPayload::DraftSaved => "draft_saved",
            WizardEventPayload::Published { .. } => "published",
        }
    }
}
