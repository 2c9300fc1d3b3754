//! Teacher upload form: dependent three-level taxonomy selection, two-file
//! upload with progress, and create-or-update submission of a video.
//!
//! Each taxonomy level (category, subcategory, topic) is an independent
//! [`Selection`] state machine: `Browsing` a persisted value or `Creating`
//! a brand-new one.  Category and subcategory creates persist immediately;
//! a new topic is staged and union-merged during submit so a failed submit
//! never leaves a half-written taxonomy.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use skillforge_media::storage::validate_file_type;
use skillforge_media::{probe, progress, MediaKind};
use skillforge_shared::{Category, Subcategory, VideoRecord};
use skillforge_store::{NewVideo, VideoUpdate};

use crate::error::{ClientError, Result};
use crate::services::Services;

// ---------------------------------------------------------------------------
// Selection state machine
// ---------------------------------------------------------------------------

/// Whether a selector shows persisted options or a new-value input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// A persisted value is selected, or none is.
    Browsing,
    /// The user is typing a value that does not exist yet.
    Creating,
}

/// One taxonomy selector.  The option lists live on the form; this holds
/// only the chosen identifier (or topic string) and the in-progress draft
/// while creating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    mode: SelectionMode,
    value: Option<String>,
    draft: String,
}

impl Selection {
    fn new() -> Self {
        Self {
            mode: SelectionMode::Browsing,
            value: None,
            draft: String::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Selected identifier (or topic string), if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Text typed so far while in `Creating` mode.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    fn begin_creating(&mut self) {
        self.mode = SelectionMode::Creating;
        self.draft.clear();
    }

    fn cancel_creating(&mut self) {
        self.mode = SelectionMode::Browsing;
        self.draft.clear();
    }

    fn select(&mut self, value: String) {
        self.value = Some(value);
        self.mode = SelectionMode::Browsing;
        self.draft.clear();
    }

    fn clear(&mut self) {
        self.value = None;
        self.mode = SelectionMode::Browsing;
        self.draft.clear();
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Ephemeral, client-only form state.  Updated copy-with; transformed into
/// a store write on submit and discarded after; never persisted directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDraft {
    pub title: String,
    pub description: String,
    /// Newly picked video file, `None` when keeping the stored one.
    pub video_path: Option<PathBuf>,
    /// Newly picked thumbnail file, `None` when keeping the stored one.
    pub thumbnail_path: Option<PathBuf>,
}

impl UploadDraft {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_video_file(mut self, path: PathBuf) -> Self {
        self.video_path = Some(path);
        self
    }

    pub fn with_thumbnail_file(mut self, path: PathBuf) -> Self {
        self.thumbnail_path = Some(path);
        self
    }
}

/// Create a new video, or overwrite an existing one's editable fields.
enum FormMode {
    Create,
    Edit(VideoRecord),
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// View model of the categorized upload form.
pub struct CategorizedUploadForm {
    services: Services,
    creator_id: String,
    mode: FormMode,
    draft: UploadDraft,
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    category: Selection,
    subcategory: Selection,
    topic: Selection,
    /// New topic staged for union-merge at submit.
    pending_topic: Option<String>,
    in_flight: bool,
    priming: bool,
    progress_tx: Arc<watch::Sender<u8>>,
}

impl CategorizedUploadForm {
    /// Fresh form in create mode.  Call [`prime`](Self::prime) before
    /// presenting it.
    pub fn new(services: Services, creator_id: impl Into<String>) -> Self {
        Self::build(services, creator_id.into(), FormMode::Create)
    }

    /// Form pre-populated from an edit target.  The selectors are seeded
    /// from the record's stored identifiers; [`prime`](Self::prime) loads
    /// the matching option lists before the form becomes interactive.
    pub fn for_edit(
        services: Services,
        creator_id: impl Into<String>,
        target: VideoRecord,
    ) -> Self {
        let mut form = Self::build(services, creator_id.into(), FormMode::Edit(target.clone()));
        form.draft = UploadDraft::default()
            .with_title(target.meta.title.clone())
            .with_description(target.description.clone());
        if !target.category_id.is_empty() {
            form.category.select(target.category_id.clone());
        }
        if !target.subcategory_id.is_empty() {
            form.subcategory.select(target.subcategory_id.clone());
        }
        if !target.topic.is_empty() {
            form.topic.select(target.topic);
        }
        form
    }

    fn build(services: Services, creator_id: String, mode: FormMode) -> Self {
        let (progress_tx, _) = watch::channel(0);
        Self {
            services,
            creator_id,
            mode,
            draft: UploadDraft::default(),
            categories: Vec::new(),
            subcategories: Vec::new(),
            category: Selection::new(),
            subcategory: Selection::new(),
            topic: Selection::new(),
            pending_topic: None,
            in_flight: false,
            priming: true,
            progress_tx: Arc::new(progress_tx),
        }
    }

    // ------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// False while priming or while an upload is in flight; the submit
    /// control stays disabled until this is true.
    pub fn is_interactive(&self) -> bool {
        !self.priming && !self.in_flight
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Subcategory options for the selected category.
    pub fn subcategories(&self) -> &[Subcategory] {
        &self.subcategories
    }

    /// Topic options: the selected subcategory's topic set, already
    /// loaded -- no additional fetch.
    pub fn topic_options(&self) -> &[String] {
        self.subcategory
            .value()
            .and_then(|id| self.subcategories.iter().find(|s| s.id == id))
            .map(|s| s.topics.as_slice())
            .unwrap_or_default()
    }

    pub fn category_selection(&self) -> &Selection {
        &self.category
    }

    pub fn subcategory_selection(&self) -> &Selection {
        &self.subcategory
    }

    pub fn topic_selection(&self) -> &Selection {
        &self.topic
    }

    /// Latest upload percentage, for the visible progress indicator.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress_tx.subscribe()
    }

    // ------------------------------------------------------------------
    // Priming
    // ------------------------------------------------------------------

    /// Load the category options (and, in edit mode, the target
    /// category's subcategories).  Read failures degrade to empty option
    /// lists and are logged only.
    pub async fn prime(&mut self) {
        match self.services.store.list_categories().await {
            Ok(categories) => self.categories = categories,
            Err(e) => {
                warn!(error = %e, "category load failed");
                self.categories = Vec::new();
            }
        }
        if let Some(category_id) = self.category.value.clone() {
            self.load_subcategories(&category_id).await;
        }
        self.priming = false;
    }

    async fn load_subcategories(&mut self, category_id: &str) {
        match self.services.store.list_subcategories(category_id).await {
            Ok(subcategories) => self.subcategories = subcategories,
            Err(e) => {
                warn!(category_id = %category_id, error = %e, "subcategory load failed");
                self.subcategories = Vec::new();
            }
        }
    }

    // ------------------------------------------------------------------
    // Field updates
    // ------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft = self.draft.clone().with_title(title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft = self.draft.clone().with_description(description);
    }

    pub fn pick_video_file(&mut self, path: PathBuf) {
        self.draft = self.draft.clone().with_video_file(path);
    }

    pub fn pick_thumbnail_file(&mut self, path: PathBuf) {
        self.draft = self.draft.clone().with_thumbnail_file(path);
    }

    // ------------------------------------------------------------------
    // Taxonomy selection
    // ------------------------------------------------------------------

    /// Select a category: resets subcategory and topic, replaces the
    /// subcategory options with this category's children only.
    pub async fn select_category(&mut self, id: &str) {
        self.category.select(id.to_string());
        self.reset_dependents();
        self.load_subcategories(id).await;
    }

    /// Select a subcategory: resets topic.  Topic options come from the
    /// already-loaded subcategory list.
    pub fn select_subcategory(&mut self, id: &str) {
        self.subcategory.select(id.to_string());
        self.topic.clear();
        self.pending_topic = None;
    }

    pub fn select_topic(&mut self, topic: &str) {
        self.topic.select(topic.to_string());
        self.pending_topic = None;
    }

    fn reset_dependents(&mut self) {
        self.subcategory.clear();
        self.topic.clear();
        self.pending_topic = None;
        self.subcategories.clear();
    }

    // ------------------------------------------------------------------
    // Inline creation
    // ------------------------------------------------------------------

    pub fn begin_new_category(&mut self) {
        self.category.begin_creating();
    }

    pub fn cancel_new_category(&mut self) {
        self.category.cancel_creating();
    }

    pub fn set_new_category_name(&mut self, name: impl Into<String>) {
        self.category.draft = name.into();
    }

    /// Persist the typed category, append it to the options, select it.
    pub async fn commit_new_category(&mut self) -> Result<()> {
        let name = self.category.draft.trim().to_string();
        if name.is_empty() {
            return Err(ClientError::Validation(
                "Category name must not be empty".into(),
            ));
        }

        let created = self.services.store.create_category(&name).await?;
        let id = created.id.clone();
        self.categories.push(created);
        self.category.select(id);
        // A brand-new category has no children yet.
        self.reset_dependents();
        Ok(())
    }

    pub fn begin_new_subcategory(&mut self) {
        self.subcategory.begin_creating();
    }

    pub fn cancel_new_subcategory(&mut self) {
        self.subcategory.cancel_creating();
    }

    pub fn set_new_subcategory_name(&mut self, name: impl Into<String>) {
        self.subcategory.draft = name.into();
    }

    /// Persist the typed subcategory under the selected category, append
    /// it to the options, select it.
    pub async fn commit_new_subcategory(&mut self) -> Result<()> {
        let name = self.subcategory.draft.trim().to_string();
        if name.is_empty() {
            return Err(ClientError::Validation(
                "Subcategory name must not be empty".into(),
            ));
        }
        let Some(category_id) = self.category.value.clone() else {
            return Err(ClientError::Validation(
                "Select a category before adding a subcategory".into(),
            ));
        };

        let created = self
            .services
            .store
            .create_subcategory(&category_id, &name)
            .await?;
        let id = created.id.clone();
        self.subcategories.push(created);
        self.subcategory.select(id);
        self.topic.clear();
        self.pending_topic = None;
        Ok(())
    }

    pub fn begin_new_topic(&mut self) {
        self.topic.begin_creating();
    }

    pub fn cancel_new_topic(&mut self) {
        self.topic.cancel_creating();
    }

    pub fn set_new_topic_name(&mut self, name: impl Into<String>) {
        self.topic.draft = name.into();
    }

    /// Stage the typed topic and select it.  The union-merge into the
    /// subcategory's topic set happens during [`submit`](Self::submit).
    pub fn commit_new_topic(&mut self) -> Result<()> {
        let topic = self.topic.draft.trim().to_string();
        if topic.is_empty() {
            return Err(ClientError::Validation("Topic must not be empty".into()));
        }
        let Some(subcategory_id) = self.subcategory.value.clone() else {
            return Err(ClientError::Validation(
                "Select a subcategory before adding a topic".into(),
            ));
        };

        // Show it in the options right away.
        if let Some(sub) = self
            .subcategories
            .iter_mut()
            .find(|s| s.id == subcategory_id)
        {
            if !sub.topics.contains(&topic) {
                sub.topics.push(topic.clone());
            }
        }
        self.topic.select(topic.clone());
        self.pending_topic = Some(topic);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------

    /// Validate, merge any staged topic, upload any newly picked files,
    /// and create or update the record.
    ///
    /// Validation failures return before any remote call.  A remote
    /// failure aborts the whole submit and leaves every field as typed.
    pub async fn submit(&mut self) -> Result<VideoRecord> {
        self.validate()?;

        self.in_flight = true;
        let result = self.perform_submit().await;
        self.in_flight = false;

        if result.is_ok() {
            self.pending_topic = None;
            if !self.is_edit() {
                self.draft = UploadDraft::default();
            }
        }
        result
    }

    /// Synchronous pre-flight checks; the remote layer is never reached
    /// when any of these fail.
    fn validate(&self) -> Result<()> {
        if self.draft.title.trim().is_empty() {
            return Err(ClientError::Validation("Title must not be empty".into()));
        }
        if self.category.value.is_none() {
            return Err(ClientError::Validation("Select a category".into()));
        }
        if !self.is_edit() && self.draft.video_path.is_none() {
            return Err(ClientError::Validation("Pick a video file".into()));
        }
        if let Some(path) = &self.draft.video_path {
            validate_file_type(path, MediaKind::Video)
                .map_err(|e| ClientError::Validation(e.to_string()))?;
        }
        if let Some(path) = &self.draft.thumbnail_path {
            validate_file_type(path, MediaKind::Thumbnail)
                .map_err(|e| ClientError::Validation(e.to_string()))?;
        }
        Ok(())
    }

    async fn perform_submit(&mut self) -> Result<VideoRecord> {
        let category_id = self
            .category
            .value
            .clone()
            .ok_or_else(|| ClientError::Validation("Select a category".into()))?;
        let subcategory_id = self.subcategory.value.clone().unwrap_or_default();
        let topic = self.topic.value.clone().unwrap_or_default();

        // Merge the staged topic first.  Additive union: concurrent
        // additions from other sessions survive, re-submits are no-ops.
        if let Some(pending) = self.pending_topic.clone() {
            if !subcategory_id.is_empty() {
                self.services
                    .store
                    .add_topics(&category_id, &subcategory_id, std::slice::from_ref(&pending))
                    .await?;
            }
        }

        // Duration comes from the file's container metadata, before the
        // upload starts; with no new file the stored value is kept.
        let duration = match (&self.draft.video_path, &self.mode) {
            (Some(path), _) => probe::video_duration_formatted(path).await?,
            (None, FormMode::Edit(target)) => target.duration.clone(),
            (None, FormMode::Create) => {
                return Err(ClientError::Validation("Pick a video file".into()))
            }
        };

        let video_url = match &self.draft.video_path {
            Some(path) => Some(self.upload_with_progress(path).await?),
            None => None,
        };
        let thumbnail_url = match &self.draft.thumbnail_path {
            Some(path) => Some(self.upload_with_progress(path).await?),
            None => None,
        };

        match &self.mode {
            FormMode::Create => {
                let video_url = video_url
                    .ok_or_else(|| ClientError::Validation("Pick a video file".into()))?;
                let record = self
                    .services
                    .store
                    .create_video(NewVideo {
                        title: self.draft.title.trim().to_string(),
                        description: self.draft.description.clone(),
                        creator_id: self.creator_id.clone(),
                        category_id,
                        subcategory_id,
                        topic,
                        video_url,
                        thumbnail_url: thumbnail_url.unwrap_or_default(),
                        duration,
                    })
                    .await?;
                info!(id = %record.meta.id, "upload submitted");
                Ok(record)
            }
            FormMode::Edit(target) => {
                // Editable fields only; stored URLs are retained when no
                // new file was picked, counters are never touched.
                let update = VideoUpdate {
                    title: self.draft.title.trim().to_string(),
                    description: self.draft.description.clone(),
                    category_id,
                    subcategory_id,
                    topic,
                    video_url: video_url.unwrap_or_else(|| target.video_url.clone()),
                    thumbnail_url: thumbnail_url.unwrap_or_else(|| target.thumbnail_url.clone()),
                    duration,
                };
                self.services.store.update_video(&target.meta.id, update).await?;
                info!(id = %target.meta.id, "edit submitted");
                Ok(self.services.store.get_video(&target.meta.id).await?)
            }
        }
    }

    /// Upload one file, forwarding its progress stream into the form's
    /// visible percentage.
    async fn upload_with_progress(&self, path: &Path) -> Result<String> {
        let (sender, mut rx) = progress::channel();
        let watch_tx = Arc::clone(&self.progress_tx);
        let forwarder = tokio::spawn(async move {
            while let Some(percent) = rx.recv().await {
                let _ = watch_tx.send(percent);
            }
        });

        let result = self.services.media.upload(path, sender).await;
        let _ = forwarder.await;
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use skillforge_media::FsMediaStorage;
    use skillforge_shared::constants::MAX_VIDEO_BYTES;
    use skillforge_shared::ContentStatus;
    use skillforge_store::Store;

    // Minimal MP4: ftyp plus moov/mvhd (v0, timescale 1000).
    fn fake_mp4(duration_seconds: u32) -> Vec<u8> {
        fn mp4_box(box_type: &[u8; 4], payload: &[u8]) -> Vec<u8> {
            let mut out = Vec::new();
            out.extend_from_slice(&((8 + payload.len()) as u32).to_be_bytes());
            out.extend_from_slice(box_type);
            out.extend_from_slice(payload);
            out
        }
        let mut mvhd_payload = vec![0u8; 12];
        mvhd_payload.extend_from_slice(&1000u32.to_be_bytes());
        mvhd_payload.extend_from_slice(&(duration_seconds * 1000).to_be_bytes());
        let mut file = mp4_box(b"ftyp", b"isom\0\0\0\0");
        file.extend_from_slice(&mp4_box(b"moov", &mp4_box(b"mvhd", &mvhd_payload)));
        file
    }

    async fn test_services(dir: &TempDir) -> Services {
        let media = FsMediaStorage::new(
            dir.path().join("objects"),
            "https://media.test",
            MAX_VIDEO_BYTES,
        )
        .await
        .unwrap();
        Services::new(Store::in_memory(), Arc::new(media))
    }

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Services plus a category/subcategory pair and a primed create form.
    async fn primed_form(dir: &TempDir) -> (Services, CategorizedUploadForm, String, String) {
        let services = test_services(dir).await;
        let cat = services.store.create_category("DSA").await.unwrap();
        let sub = services
            .store
            .create_subcategory(&cat.id, "Graphs")
            .await
            .unwrap();

        let mut form = CategorizedUploadForm::new(services.clone(), "teacher-1");
        form.prime().await;
        (services, form, cat.id, sub.id)
    }

    #[tokio::test]
    async fn priming_loads_categories() {
        let dir = TempDir::new().unwrap();
        let (_, form, _, _) = primed_form(&dir).await;

        assert!(form.is_interactive());
        assert_eq!(form.categories().len(), 1);
        assert_eq!(form.categories()[0].name, "DSA");
    }

    #[tokio::test]
    async fn selecting_category_replaces_children_and_resets_dependents() {
        let dir = TempDir::new().unwrap();
        let (services, mut form, cat_id, _) = primed_form(&dir).await;
        let web = services.store.create_category("Web").await.unwrap();
        services
            .store
            .create_subcategory(&web.id, "CSS")
            .await
            .unwrap();

        form.select_category(&cat_id).await;
        let graphs_id = form.subcategories()[0].id.clone();
        form.select_subcategory(&graphs_id);
        form.select_topic("Graphs");
        assert!(form.subcategory_selection().value().is_some());
        assert!(form.topic_selection().value().is_some());

        form.select_category(&web.id).await;

        assert!(form.subcategory_selection().value().is_none());
        assert!(form.topic_selection().value().is_none());
        let names: Vec<&str> = form.subcategories().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["CSS"]);
    }

    #[tokio::test]
    async fn inline_category_creation_selects_the_new_node() {
        let dir = TempDir::new().unwrap();
        let (services, mut form, _, _) = primed_form(&dir).await;

        form.begin_new_category();
        assert_eq!(form.category_selection().mode(), SelectionMode::Creating);

        form.set_new_category_name("  Machine Learning ");
        form.commit_new_category().await.unwrap();

        assert_eq!(form.category_selection().mode(), SelectionMode::Browsing);
        let selected = form.category_selection().value().unwrap().to_string();
        assert!(form.categories().iter().any(|c| c.id == selected));
        // Persisted remotely, not just appended locally.
        let stored = services.store.list_categories().await.unwrap();
        assert!(stored.iter().any(|c| c.name == "Machine Learning"));
    }

    #[tokio::test]
    async fn empty_inline_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let (_, mut form, _, _) = primed_form(&dir).await;

        form.begin_new_category();
        form.set_new_category_name("   ");
        assert!(matches!(
            form.commit_new_category().await.unwrap_err(),
            ClientError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn submit_with_empty_title_aborts_before_any_remote_call() {
        let dir = TempDir::new().unwrap();
        let (services, mut form, cat_id, _) = primed_form(&dir).await;
        form.select_category(&cat_id).await;
        form.pick_video_file(write_file(&dir, "clip.mp4", &fake_mp4(10)));

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(services.store.list_videos().await.unwrap().is_empty());
        // Fields stay as typed.
        assert!(form.draft().video_path.is_some());
    }

    #[tokio::test]
    async fn submit_rejects_wrong_file_type_before_upload() {
        let dir = TempDir::new().unwrap();
        let (services, mut form, cat_id, _) = primed_form(&dir).await;
        form.set_title("Intro");
        form.select_category(&cat_id).await;
        form.pick_video_file(write_file(&dir, "clip.gif", b"not-a-video"));

        assert!(matches!(
            form.submit().await.unwrap_err(),
            ClientError::Validation(_)
        ));
        assert!(services.store.list_videos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_creates_record_with_defaults_and_merged_topic() {
        let dir = TempDir::new().unwrap();
        let (services, mut form, cat_id, sub_id) = primed_form(&dir).await;
        services
            .store
            .add_topics(&cat_id, &sub_id, &["Loops".into()])
            .await
            .unwrap();

        form.set_title("Intro to Graphs");
        form.set_description("BFS, then DFS.");
        form.select_category(&cat_id).await;
        form.select_subcategory(&sub_id);
        form.begin_new_topic();
        form.set_new_topic_name("Recursion");
        form.commit_new_topic().unwrap();
        form.pick_video_file(write_file(&dir, "clip.mp4", &fake_mp4(754)));
        form.pick_thumbnail_file(write_file(&dir, "thumb.png", b"png-bytes"));

        let record = form.submit().await.unwrap();

        assert_eq!(record.meta.title, "Intro to Graphs");
        assert_eq!(record.meta.creator_id, "teacher-1");
        assert_eq!(record.duration, "12:34");
        assert!(record.video_url.starts_with("https://media.test/"));
        assert!(record.thumbnail_url.ends_with(".png"));
        assert_eq!(record.topic, "Recursion");
        assert_eq!(
            (record.like_count, record.report_count, record.views),
            (0, 0, 0)
        );
        assert_eq!(record.average_rating, 0.0);
        assert_eq!(record.status, ContentStatus::Active);

        // Union-merged, existing topics kept.
        let subs = services.store.list_subcategories(&cat_id).await.unwrap();
        assert_eq!(subs[0].topics, ["Loops", "Recursion"]);

        // Draft discarded on success, upload finished.
        assert_eq!(form.draft(), &UploadDraft::default());
        assert!(!form.is_uploading());
        assert_eq!(*form.progress().borrow(), 100);
    }

    #[tokio::test]
    async fn edit_without_new_files_keeps_urls_and_counters() {
        let dir = TempDir::new().unwrap();
        let (services, mut create_form, cat_id, sub_id) = primed_form(&dir).await;

        create_form.set_title("Original");
        create_form.select_category(&cat_id).await;
        create_form.select_subcategory(&sub_id);
        create_form.pick_video_file(write_file(&dir, "clip.mp4", &fake_mp4(60)));
        let created = create_form.submit().await.unwrap();

        let target = services.store.get_video(&created.meta.id).await.unwrap();
        let mut form = CategorizedUploadForm::for_edit(services.clone(), "teacher-1", target);
        form.prime().await;

        assert!(form.is_edit());
        // Selectors pre-seeded and subcategory options loaded.
        assert_eq!(form.category_selection().value(), Some(cat_id.as_str()));
        assert_eq!(form.subcategories().len(), 1);
        assert_eq!(form.draft().title, "Original");

        form.set_title("Intro to Graphs");
        let updated = form.submit().await.unwrap();

        assert_eq!(updated.meta.title, "Intro to Graphs");
        assert_eq!(updated.video_url, created.video_url);
        assert_eq!(updated.thumbnail_url, created.thumbnail_url);
        assert_eq!(updated.duration, "01:00");
    }
}
