use super::session::{
    BasicInfo, FieldErrors, PhotoItem, PhotoStatus, SeoData, WizardSession, WizardStep,
};
use super::steps::{
    validate_step, FIELD_DESCRIPTION, FIELD_FORM, FIELD_PHOTOS, FIELD_SEO_META_DESCRIPTION,
    FIELD_SEO_TITLE, MSG_PHOTOS_REQUIRED, MSG_UPLOADS_PENDING,
};
use crate::content::{self, ContentGenerator, ContentRequest, MarketingContent, Platform, Tone};
use crate::draft::DraftStore;
use crate::error::Result;
use crate::events::{EventBus, WizardEventPayload};
use crate::publish::{ProductId, PublishError, PublishSubmitter};
use crate::upload::{ImageFile, ImageUploadClient, PhotoId, UploadError, UploadOutcome};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub const MSG_UPLOAD_INTERRUPTED: &str = "upload interrupted";

/// Files accepted into the listing and files turned away by per-file checks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddPhotosReport {
    pub accepted: Vec<PhotoId>,
    pub rejected: Vec<UploadError>,
}

/// Owns the [`WizardSession`] and is the only thing that mutates it.
///
/// Background uploads report through a channel; their outcomes are applied
/// when the owner calls [`poll_uploads`](Self::poll_uploads),
/// [`next_upload_outcome`](Self::next_upload_outcome) or
/// [`wait_for_uploads`](Self::wait_for_uploads). Outcomes for photos that were
/// removed in the meantime are dropped.
///
/// Adding or retrying photos spawns tokio tasks, so those calls must run
/// inside a tokio runtime; outside one they fail with
/// [`UploadError::NoRuntime`] and leave the session untouched.
pub struct WizardController {
    session: WizardSession,
    uploader: ImageUploadClient,
    drafts: Option<DraftStore>,
    events: EventBus,
    outcomes_tx: mpsc::UnboundedSender<UploadOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<UploadOutcome>,
    in_flight: HashSet<PhotoId>,
}

impl std::fmt::Debug for WizardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardController")
            .field("step", &self.session.current_step)
            .field("photos", &self.session.photos.len())
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}

impl WizardController {
    /// Fresh, empty wizard
    pub fn new(uploader: ImageUploadClient, drafts: Option<DraftStore>, events: EventBus) -> Self {
        Self::with_session(WizardSession::new(), uploader, drafts, events)
    }

    pub fn with_session(
        session: WizardSession,
        uploader: ImageUploadClient,
        drafts: Option<DraftStore>,
        events: EventBus,
    ) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            session,
            uploader,
            drafts,
            events,
            outcomes_tx,
            outcomes_rx,
            in_flight: HashSet::new(),
        }
    }

    /// Rehydrate from the saved draft. Uploads cannot survive a reload, so
    /// photos saved mid-upload come back as failed.
    pub fn resume(uploader: ImageUploadClient, drafts: DraftStore, events: EventBus) -> Self {
        let mut session = drafts.load_draft();

        let mut interrupted = 0;
        for photo in session
            .photos
            .iter_mut()
            .filter(|photo| photo.status == PhotoStatus::Uploading)
        {
            photo.mark_failed(MSG_UPLOAD_INTERRUPTED);
            interrupted += 1;
        }

        info!(
            step = session.current_step.number(),
            photos = session.photos.len(),
            interrupted,
            "Resumed listing draft"
        );

        Self::with_session(session, uploader, Some(drafts), events)
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn current_step(&self) -> WizardStep {
        self.session.current_step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.session.errors
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Uploads of photos still in the listing whose outcome has not been
    /// received yet
    pub fn pending_uploads(&self) -> usize {
        self.in_flight.len()
    }

    // ---- navigation ----

    /// Validate the current step and advance when it passes. Returns whether
    /// the step changed; the last step never advances.
    pub fn next(&mut self) -> bool {
        self.poll_uploads();

        let step = self.session.current_step;
        let errors = validate_step(step, &self.session);
        let passed = errors.is_empty();
        self.session.errors = errors;

        if !passed {
            debug!(step = step.number(), errors = self.session.errors.len(), "Step blocked");
            self.autosave();
            return false;
        }

        match step.next() {
            Some(to) => {
                self.move_to(to);
                true
            }
            None => {
                self.autosave();
                false
            }
        }
    }

    /// Go back one step without validating
    pub fn previous(&mut self) -> bool {
        match self.session.current_step.previous() {
            Some(to) => {
                self.move_to(to);
                true
            }
            None => false,
        }
    }

    /// Revisit any earlier step, or skip ahead when every step in between
    /// passes. A blocked jump changes nothing.
    pub fn jump_to(&mut self, step: WizardStep) -> bool {
        self.poll_uploads();

        let current = self.session.current_step;
        if step == current {
            return true;
        }
        if step > current {
            let blocked = WizardStep::ALL
                .iter()
                .filter(|s| **s >= current && **s < step)
                .any(|s| !validate_step(*s, &self.session).is_empty());
            if blocked {
                debug!(from = current.number(), to = step.number(), "Jump blocked");
                return false;
            }
            self.session.errors.clear();
        }

        self.move_to(step);
        true
    }

    fn move_to(&mut self, to: WizardStep) {
        let from = self.session.current_step;
        self.session.current_step = to;
        self.emit(WizardEventPayload::StepChanged { from, to });
        self.autosave();
    }

    // ---- form edits ----

    /// Edit step-1 fields; errors of the fields that changed are cleared
    pub fn edit_basic_info(&mut self, edit: impl FnOnce(&mut BasicInfo)) {
        let before = self.session.basic_info.clone();
        edit(&mut self.session.basic_info);

        for field in self.session.basic_info.changed_fields(&before) {
            self.session.errors.shift_remove(field);
        }
        self.autosave();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.session.description = description.into();
        self.session.errors.shift_remove(FIELD_DESCRIPTION);
        self.autosave();
    }

    pub fn edit_seo(&mut self, edit: impl FnOnce(&mut SeoData)) {
        let before = self.session.seo.clone();
        edit(&mut self.session.seo);

        if self.session.seo.title != before.title {
            self.session.errors.shift_remove(FIELD_SEO_TITLE);
        }
        if self.session.seo.meta_description != before.meta_description {
            self.session.errors.shift_remove(FIELD_SEO_META_DESCRIPTION);
        }
        self.autosave();
    }

    // ---- photos ----

    /// Accept a batch of selected files. Each file that passes its checks is
    /// appended as `uploading` and its upload starts right away; a batch over
    /// the photo cap is refused whole.
    pub fn add_photos(
        &mut self,
        files: Vec<ImageFile>,
    ) -> std::result::Result<AddPhotosReport, UploadError> {
        ImageUploadClient::ensure_runtime()?;
        if let Err(e) = self.uploader.validate_batch(&files, self.session.photos.len()) {
            warn!("Rejected photo batch: {}", e);
            self.session.errors.insert(FIELD_PHOTOS.to_string(), e.to_string());
            return Err(e);
        }

        let mut report = AddPhotosReport::default();
        for file in files {
            if let Err(e) = self.uploader.validate(&file) {
                warn!(file = %file.file_name, "Rejected photo: {}", e);
                report.rejected.push(e);
                continue;
            }

            let file = Arc::new(file);
            let photo = PhotoItem::uploading(file.clone());
            let photo_id = photo.id;
            self.session.photos.push(photo);
            self.start_upload(photo_id, file.clone());

            self.emit(WizardEventPayload::PhotoAdded {
                photo_id,
                file_name: file.file_name.clone(),
            });
            report.accepted.push(photo_id);
        }

        if !report.rejected.is_empty() {
            let messages: Vec<String> = report.rejected.iter().map(|e| e.to_string()).collect();
            self.session
                .errors
                .insert(FIELD_PHOTOS.to_string(), messages.join("; "));
        } else if !report.accepted.is_empty() {
            self.session.errors.shift_remove(FIELD_PHOTOS);
        }

        self.autosave();
        Ok(report)
    }

    /// Drop a photo whatever its state. An upload still running for it is left
    /// alone and its outcome ignored.
    pub fn remove_photo(&mut self, photo_id: PhotoId) -> bool {
        let Some(index) = self.session.photos.iter().position(|p| p.id == photo_id) else {
            return false;
        };

        let removed = self.session.photos.remove(index);
        self.in_flight.remove(&photo_id);
        debug!(photo_id = %photo_id, status = ?removed.status, "Photo removed");
        self.session.errors.shift_remove(FIELD_PHOTOS);
        self.emit(WizardEventPayload::PhotoRemoved { photo_id });
        self.autosave();
        true
    }

    /// Move the photo at `from` to `to`; position 0 is the cover
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.session.photos.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let photo = self.session.photos.remove(from);
            self.session.photos.insert(to, photo);
            self.autosave();
        }
        true
    }

    /// Send a failed photo's bytes again
    pub fn retry_upload(&mut self, photo_id: PhotoId) -> std::result::Result<(), UploadError> {
        ImageUploadClient::ensure_runtime()?;
        let photo = self
            .session
            .photo_mut(photo_id)
            .ok_or(UploadError::UnknownPhoto(photo_id))?;
        if photo.status != PhotoStatus::Failed {
            return Err(UploadError::NotRetryable(photo_id));
        }
        let file = photo
            .local_file()
            .cloned()
            .ok_or(UploadError::NoLocalFile(photo_id))?;

        photo.mark_uploading();
        info!(photo_id = %photo_id, file = %file.file_name, "Retrying upload");
        self.start_upload(photo_id, file);

        self.session.errors.shift_remove(FIELD_PHOTOS);
        self.autosave();
        Ok(())
    }

    fn start_upload(&mut self, photo_id: PhotoId, file: Arc<ImageFile>) {
        self.in_flight.insert(photo_id);
        // Detached; the outcome comes back over the channel
        let _ = self
            .uploader
            .spawn_upload(photo_id, file, self.outcomes_tx.clone());
    }

    /// Apply every outcome that has already arrived. Returns how many
    /// changed a photo.
    pub fn poll_uploads(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.in_flight.remove(&outcome.photo_id);
            if self.apply_upload_outcome(&outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next upload of a photo still in the listing to finish
    /// and apply it. `None` when nothing is in flight. Late results for
    /// removed photos are skipped without waiting on them specifically.
    pub async fn next_upload_outcome(&mut self) -> Option<UploadOutcome> {
        while !self.in_flight.is_empty() {
            let outcome = self.outcomes_rx.recv().await?;
            if !self.in_flight.remove(&outcome.photo_id) {
                debug!(photo_id = %outcome.photo_id, "Skipping upload result for removed photo");
                continue;
            }
            self.apply_upload_outcome(&outcome);
            return Some(outcome);
        }
        None
    }

    /// Drain every in-flight upload
    pub async fn wait_for_uploads(&mut self) {
        while self.next_upload_outcome().await.is_some() {}
    }

    fn apply_upload_outcome(&mut self, outcome: &UploadOutcome) -> bool {
        let photo_id = outcome.photo_id;
        let Some(photo) = self.session.photo_mut(photo_id) else {
            debug!(photo_id = %photo_id, "Discarding upload result for removed photo");
            return false;
        };
        if photo.status != PhotoStatus::Uploading {
            debug!(photo_id = %photo_id, status = ?photo.status, "Discarding stale upload result");
            return false;
        }

        let payload = match &outcome.result {
            Ok(remote_url) => {
                photo.mark_uploaded(remote_url.clone());
                WizardEventPayload::PhotoUploaded {
                    photo_id,
                    remote_url: remote_url.clone(),
                }
            }
            Err(e) => {
                photo.mark_failed(e.to_string());
                WizardEventPayload::PhotoFailed {
                    photo_id,
                    reason: e.to_string(),
                }
            }
        };

        self.emit(payload);
        self.autosave();
        true
    }

    // ---- content ----

    /// Fill the description with generated copy (or the static fallback).
    /// The artisan can keep editing it afterwards.
    pub async fn generate_description(
        &mut self,
        generator: &dyn ContentGenerator,
        tone: Tone,
        platform: Platform,
    ) -> MarketingContent {
        let request = ContentRequest::from_session(&self.session, tone, platform);
        let content = content::generate_marketing_content(generator, &request).await;
        self.set_description(content.text.clone());
        content
    }

    /// Fill only the SEO fields that are still empty
    pub fn suggest_seo(&mut self) {
        let suggestion = content::suggest_seo(&self.session.basic_info, &self.session.description);
        self.edit_seo(|seo| {
            if seo.title.trim().is_empty() {
                seo.title = suggestion.title;
            }
            if seo.meta_description.trim().is_empty() {
                seo.meta_description = suggestion.meta_description;
            }
            if seo.slug.trim().is_empty() {
                seo.slug = suggestion.slug;
            }
            if seo.keywords.is_empty() {
                seo.keywords = suggestion.keywords;
            }
        });
    }

    // ---- drafts ----

    /// Explicit save; unlike auto-save, failures reach the caller
    pub fn save_draft(&self) -> Result<()> {
        if let Some(drafts) = &self.drafts {
            drafts.save_draft(&self.session)?;
            self.emit(WizardEventPayload::DraftSaved);
        }
        Ok(())
    }

    /// Throw the listing away, including the saved draft
    pub fn discard(&mut self) {
        self.session = WizardSession::new();
        self.in_flight.clear();
        self.clear_draft();
    }

    fn autosave(&self) {
        if let Some(drafts) = &self.drafts {
            if let Err(e) = drafts.save_draft(&self.session) {
                warn!("Failed to auto-save draft: {}", e);
            }
        }
    }

    fn clear_draft(&self) {
        if let Some(drafts) = &self.drafts {
            if let Err(e) = drafts.clear_draft() {
                warn!("Failed to clear draft: {}", e);
            }
        }
    }

    // ---- publish ----

    /// Submit the listing. On success the draft is removed and the wizard
    /// starts over; on failure the session is kept and the reason lands in
    /// `errors`.
    pub async fn publish(
        &mut self,
        submitter: &PublishSubmitter,
    ) -> std::result::Result<ProductId, PublishError> {
        self.poll_uploads();

        match submitter.submit(&self.session).await {
            Ok(product_id) => {
                info!(product_id = %product_id, "✓ Listing published");
                self.session = WizardSession::new();
                self.in_flight.clear();
                self.clear_draft();
                self.emit(WizardEventPayload::Published {
                    product_id: product_id.to_string(),
                });
                Ok(product_id)
            }
            Err(e) => {
                warn!("Publish blocked: {}", e);
                match &e {
                    PublishError::NotReady => {
                        self.session
                            .errors
                            .insert(FIELD_PHOTOS.to_string(), MSG_UPLOADS_PENDING.to_string());
                    }
                    PublishError::NoUploadedPhotos => {
                        self.session
                            .errors
                            .insert(FIELD_PHOTOS.to_string(), MSG_PHOTOS_REQUIRED.to_string());
                    }
                    PublishError::Validation(errors) | PublishError::Rejected(errors) => {
                        self.session.errors = errors.clone();
                    }
                    PublishError::Failed(message) => {
                        self.session
                            .errors
                            .insert(FIELD_FORM.to_string(), message.clone());
                    }
                }
                self.autosave();
                Err(e)
            }
        }
    }

    fn emit(&self, payload: WizardEventPayload) {
        // No subscribers is fine
        let _ = self.events.publish(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::MemoryStore;
    use crate::upload::ImageStore;
    use async_trait::async_trait;

    struct EchoStore;

    #[async_trait]
    impl ImageStore for EchoStore {
        async fn store(&self, file: &ImageFile) -> std::result::Result<String, UploadError> {
            if file.file_name.starts_with("bad") {
                return Err(UploadError::UploadFailed("status 500".to_string()));
            }
            Ok(format!("https://cdn.example/{}", file.file_name))
        }
    }

    fn controller() -> (WizardController, DraftStore) {
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));
        let uploader = ImageUploadClient::new(Arc::new(EchoStore));
        (
            WizardController::new(uploader, Some(drafts.clone()), EventBus::default()),
            drafts,
        )
    }

    fn jpeg(name: &str) -> ImageFile {
        ImageFile::new(name, "image/jpeg", vec![0xFF; 64])
    }

    fn fill_basic_info(wizard: &mut WizardController) {
        wizard.edit_basic_info(|info| {
            info.name = "Clay Pot".to_string();
            info.category = "pottery".to_string();
            info.price = "500".to_string();
            info.quantity = "2".to_string();
        });
    }

    #[tokio::test]
    async fn test_next_blocks_and_sets_errors() {
        let (mut wizard, _) = controller();
        assert!(!wizard.next());
        assert_eq!(wizard.current_step(), WizardStep::BasicInfo);
        assert!(wizard.errors().contains_key("name"));
        assert!(wizard.errors().contains_key(FIELD_PHOTOS));
    }

    #[tokio::test]
    async fn test_editing_clears_only_changed_field_errors() {
        let (mut wizard, _) = controller();
        wizard.next();
        wizard.edit_basic_info(|info| info.name = "Clay Pot".to_string());
        assert!(!wizard.errors().contains_key("name"));
        assert!(wizard.errors().contains_key("price"));
    }

    #[tokio::test]
    async fn test_walk_forward_and_back() {
        let (mut wizard, _) = controller();
        fill_basic_info(&mut wizard);
        wizard.add_photos(vec![jpeg("a.jpg")]).unwrap();
        wizard.wait_for_uploads().await;

        assert!(wizard.next());
        assert_eq!(wizard.current_step(), WizardStep::Description);
        assert!(wizard.errors().is_empty());

        assert!(wizard.previous());
        assert!(!wizard.previous());
        assert_eq!(wizard.current_step(), WizardStep::BasicInfo);
    }

    #[tokio::test]
    async fn test_jump_to() {
        let (mut wizard, _) = controller();
        fill_basic_info(&mut wizard);
        wizard.add_photos(vec![jpeg("a.jpg")]).unwrap();
        wizard.wait_for_uploads().await;

        // Description is still empty, so SEO is out of reach
        assert!(!wizard.jump_to(WizardStep::Seo));
        assert_eq!(wizard.current_step(), WizardStep::BasicInfo);
        assert!(wizard.errors().is_empty());

        assert!(wizard.jump_to(WizardStep::Description));
        wizard.set_description("Hand-thrown terracotta");
        assert!(wizard.jump_to(WizardStep::Seo));
        assert!(wizard.jump_to(WizardStep::BasicInfo));
    }

    #[tokio::test]
    async fn test_last_step_never_advances() {
        let (mut wizard, _) = controller();
        fill_basic_info(&mut wizard);
        wizard.add_photos(vec![jpeg("a.jpg")]).unwrap();
        wizard.wait_for_uploads().await;
        wizard.set_description("Hand-thrown terracotta");
        wizard.suggest_seo();

        assert!(wizard.jump_to(WizardStep::Preview));
        assert!(!wizard.next());
        assert_eq!(wizard.current_step(), WizardStep::Preview);
        assert!(wizard.errors().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_and_retry() {
        let (mut wizard, _) = controller();
        let report = wizard.add_photos(vec![jpeg("bad.jpg")]).unwrap();
        let id = report.accepted[0];
        wizard.wait_for_uploads().await;

        let photo = wizard.session().photo(id).unwrap();
        assert_eq!(photo.status, PhotoStatus::Failed);
        assert_eq!(photo.error.as_deref(), Some("upload failed: status 500"));

        let stranger = PhotoId::new();
        assert_eq!(wizard.retry_upload(stranger), Err(UploadError::UnknownPhoto(stranger)));

        wizard.retry_upload(id).unwrap();
        assert_eq!(wizard.session().photo(id).unwrap().status, PhotoStatus::Uploading);
        assert_eq!(wizard.retry_upload(id), Err(UploadError::NotRetryable(id)));
        assert_eq!(wizard.pending_uploads(), 1);
    }

    #[tokio::test]
    async fn test_batch_over_cap_is_refused() {
        let (mut wizard, _) = controller();
        let files = (0..11).map(|i| jpeg(&format!("{}.jpg", i))).collect();
        assert!(matches!(wizard.add_photos(files), Err(UploadError::TooMany { .. })));
        assert!(wizard.session().photos.is_empty());
        assert_eq!(wizard.pending_uploads(), 0);
        assert!(wizard.errors().contains_key(FIELD_PHOTOS));
    }

    #[tokio::test]
    async fn test_every_rejection_lands_in_photo_errors() {
        let (mut wizard, _) = controller();
        let report = wizard
            .add_photos(vec![
                ImageFile::new("a.gif", "image/gif", vec![1; 16]),
                jpeg("ok.jpg"),
                ImageFile::new("b.bmp", "image/bmp", vec![1; 16]),
            ])
            .unwrap();
        assert_eq!(report.rejected.len(), 2);

        let message = &wizard.errors()[FIELD_PHOTOS];
        assert!(message.contains("a.gif"), "{}", message);
        assert!(message.contains("b.bmp"), "{}", message);
        assert_eq!(message.matches("; ").count(), 1);
    }

    #[test]
    fn test_adding_photos_outside_a_runtime_is_refused() {
        let (mut wizard, _) = controller();
        assert_eq!(wizard.add_photos(vec![jpeg("a.jpg")]), Err(UploadError::NoRuntime));
        assert!(wizard.session().photos.is_empty());
        assert_eq!(wizard.pending_uploads(), 0);
    }

    #[tokio::test]
    async fn test_discard_forgets_running_uploads() {
        let (mut wizard, drafts) = controller();
        wizard.add_photos(vec![jpeg("a.jpg")]).unwrap();
        wizard.discard();
        assert_eq!(wizard.pending_uploads(), 0);
        assert!(wizard.next_upload_outcome().await.is_none());
        assert!(!drafts.has_draft());
    }

    #[tokio::test]
    async fn test_reorder_bounds() {
        let (mut wizard, _) = controller();
        let report = wizard
            .add_photos(vec![jpeg("a.jpg"), jpeg("b.jpg"), jpeg("c.jpg")])
            .unwrap();
        assert!(wizard.reorder(2, 0));
        let order: Vec<PhotoId> = wizard.session().photos.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![report.accepted[2], report.accepted[0], report.accepted[1]]);
        assert!(!wizard.reorder(3, 0));
        assert!(wizard.reorder(1, 1));
    }

    #[tokio::test]
    async fn test_edits_are_auto_saved() {
        let (mut wizard, drafts) = controller();
        fill_basic_info(&mut wizard);
        assert_eq!(drafts.load_draft().basic_info.name, "Clay Pot");

        wizard.set_description("Hand-thrown");
        assert_eq!(drafts.load_draft().description, "Hand-thrown");
    }

    #[tokio::test]
    async fn test_resume_marks_interrupted_uploads_failed() {
        let (mut wizard, drafts) = controller();
        let id = wizard.add_photos(vec![jpeg("a.jpg")]).unwrap().accepted[0];
        // Draft written while the upload was still running
        assert_eq!(drafts.load_draft().photo(id).unwrap().status, PhotoStatus::Uploading);
        drop(wizard);

        let uploader = ImageUploadClient::new(Arc::new(EchoStore));
        let mut resumed = WizardController::resume(uploader, drafts, EventBus::default());
        let photo = resumed.session().photo(id).unwrap();
        assert_eq!(photo.status, PhotoStatus::Failed);
        assert_eq!(photo.error.as_deref(), Some(MSG_UPLOAD_INTERRUPTED));
        assert_eq!(resumed.retry_upload(id), Err(UploadError::NoLocalFile(id)));

        assert!(resumed.remove_photo(id));
        assert!(resumed.session().photos.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_seo_keeps_user_values() {
        let (mut wizard, _) = controller();
        fill_basic_info(&mut wizard);
        wizard.edit_seo(|seo| seo.title = "My own title".to_string());
        wizard.suggest_seo();

        let seo = &wizard.session().seo;
        assert_eq!(seo.title, "My own title");
        assert_eq!(seo.slug, "clay-pot");
        assert!(!seo.meta_description.is_empty());
    }
}
