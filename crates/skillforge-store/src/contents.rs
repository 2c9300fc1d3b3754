//! CRUD operations for the three content collections.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use skillforge_shared::{
    ChallengeRecord, ContentKind, ContentMeta, ContentRecord, ContentStatus, EventMode,
    EventRecord, VideoRecord,
};

use crate::document::{CollectionPath, Document};
use crate::error::{Result, StoreError};
use crate::store::Store;

// ---------------------------------------------------------------------------
// Write models
// ---------------------------------------------------------------------------

/// Fields supplied when a teacher uploads a new video.  Counters, status
/// and timestamps are defaulted by [`Store::create_video`].
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub creator_id: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub topic: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: String,
}

/// Editable fields of a video, written as a single overwrite.  Counters
/// (`like_count`, `report_count`, `views`, `average_rating`) and `status`
/// are never touched from this surface.
#[derive(Debug, Clone, Serialize)]
pub struct VideoUpdate {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub topic: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: String,
}

/// Fields supplied when creating a challenge.
#[derive(Debug, Clone)]
pub struct NewChallenge {
    pub title: String,
    pub creator_id: String,
    pub problem_url: String,
    pub solution_url: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub topic: String,
}

/// Fields supplied when creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub creator_id: String,
    pub event_date: chrono::DateTime<Utc>,
    pub registration_closes: chrono::DateTime<Utc>,
    pub mode: EventMode,
    pub location: String,
    pub organizer: String,
}

impl Store {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Create a video document with default counters
    /// (`like_count = report_count = views = 0`, `average_rating = 0.0`)
    /// and `status = Active`.
    pub async fn create_video(&self, new: NewVideo) -> Result<VideoRecord> {
        let mut record = VideoRecord {
            meta: ContentMeta {
                id: String::new(),
                title: new.title,
                creator_id: new.creator_id,
                creator_name: String::new(),
                created_at: Utc::now(),
            },
            description: new.description,
            video_url: new.video_url,
            thumbnail_url: new.thumbnail_url,
            category_id: new.category_id,
            subcategory_id: new.subcategory_id,
            topic: new.topic,
            duration: new.duration,
            like_count: 0,
            report_count: 0,
            views: 0,
            average_rating: 0.0,
            status: ContentStatus::Active,
        };

        let id = self
            .backend()
            .insert(&CollectionPath::videos(), body_of(&record)?)
            .await?;
        record.meta.id = id;

        info!(id = %record.meta.id, title = %record.meta.title, "video created");
        Ok(record)
    }

    pub async fn create_challenge(&self, new: NewChallenge) -> Result<ChallengeRecord> {
        let mut record = ChallengeRecord {
            meta: ContentMeta {
                id: String::new(),
                title: new.title,
                creator_id: new.creator_id,
                creator_name: String::new(),
                created_at: Utc::now(),
            },
            problem_url: new.problem_url,
            solution_url: new.solution_url,
            category_id: new.category_id,
            subcategory_id: new.subcategory_id,
            topic: new.topic,
        };

        let id = self
            .backend()
            .insert(&CollectionPath::challenges(), body_of(&record)?)
            .await?;
        record.meta.id = id;

        info!(id = %record.meta.id, title = %record.meta.title, "challenge created");
        Ok(record)
    }

    pub async fn create_event(&self, new: NewEvent) -> Result<EventRecord> {
        let mut record = EventRecord {
            meta: ContentMeta {
                id: String::new(),
                title: new.title,
                creator_id: new.creator_id,
                creator_name: String::new(),
                created_at: Utc::now(),
            },
            event_date: new.event_date,
            registration_closes: new.registration_closes,
            mode: new.mode,
            location: new.location,
            organizer: new.organizer,
        };

        let id = self
            .backend()
            .insert(&CollectionPath::events(), body_of(&record)?)
            .await?;
        record.meta.id = id;

        info!(id = %record.meta.id, title = %record.meta.title, "event created");
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Snapshot of the whole `videos` collection.
    pub async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
        let docs = self.backend().list(&CollectionPath::videos()).await?;
        docs.into_iter().map(decode_video).collect()
    }

    pub async fn list_challenges(&self) -> Result<Vec<ChallengeRecord>> {
        let docs = self.backend().list(&CollectionPath::challenges()).await?;
        docs.into_iter().map(decode_challenge).collect()
    }

    pub async fn list_events(&self) -> Result<Vec<EventRecord>> {
        let docs = self.backend().list(&CollectionPath::events()).await?;
        docs.into_iter().map(decode_event).collect()
    }

    /// Snapshot of one variant's collection as the unified projection.
    pub async fn list_contents(&self, kind: ContentKind) -> Result<Vec<ContentRecord>> {
        let records = match kind {
            ContentKind::Video => self
                .list_videos()
                .await?
                .into_iter()
                .map(ContentRecord::Video)
                .collect(),
            ContentKind::Challenge => self
                .list_challenges()
                .await?
                .into_iter()
                .map(ContentRecord::Challenge)
                .collect(),
            ContentKind::Event => self
                .list_events()
                .await?
                .into_iter()
                .map(ContentRecord::Event)
                .collect(),
        };
        Ok(records)
    }

    /// Fetch a single video by id.
    pub async fn get_video(&self, id: &str) -> Result<VideoRecord> {
        let doc = self
            .backend()
            .get(&CollectionPath::videos(), id)
            .await?
            .ok_or(StoreError::NotFound)?;
        decode_video(doc)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Overwrite a video's editable fields, leaving counters and status as
    /// stored.
    pub async fn update_video(&self, id: &str, update: VideoUpdate) -> Result<()> {
        let fields = serde_json::to_value(&update)?;
        self.backend()
            .update(&CollectionPath::videos(), id, fields)
            .await?;
        info!(id = %id, "video updated");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Hard-delete one content document.  No soft-delete, no tombstone.
    pub async fn delete_content(&self, kind: ContentKind, id: &str) -> Result<()> {
        self.backend()
            .delete(&CollectionPath::for_kind(kind), id)
            .await?;
        info!(kind = %kind, id = %id, "content deleted");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serialize a record into a document body, stripping the identifier: ids
/// live outside the body, assigned by the backend.
fn body_of<T: Serialize>(record: &T) -> Result<Value> {
    let mut value = serde_json::to_value(record)?;
    if let Some(body) = value.as_object_mut() {
        body.remove("id");
    }
    Ok(value)
}

fn decode_video(doc: Document) -> Result<VideoRecord> {
    let mut record: VideoRecord = serde_json::from_value(doc.data)?;
    record.meta.id = doc.id;
    Ok(record)
}

fn decode_challenge(doc: Document) -> Result<ChallengeRecord> {
    let mut record: ChallengeRecord = serde_json::from_value(doc.data)?;
    record.meta.id = doc.id;
    Ok(record)
}

fn decode_event(doc: Document) -> Result<EventRecord> {
    let mut record: EventRecord = serde_json::from_value(doc.data)?;
    record.meta.id = doc.id;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video(title: &str) -> NewVideo {
        NewVideo {
            title: title.into(),
            description: "desc".into(),
            creator_id: "u1".into(),
            category_id: "cat1".into(),
            subcategory_id: "sub1".into(),
            topic: "Graphs".into(),
            video_url: "https://cdn/v.mp4".into(),
            thumbnail_url: "https://cdn/v.png".into(),
            duration: "10:00".into(),
        }
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let store = Store::in_memory();
        let created = store.create_video(sample_video("Intro")).await.unwrap();
        assert!(!created.meta.id.is_empty());
        assert_eq!(created.like_count, 0);
        assert_eq!(created.status, ContentStatus::Active);

        let listed = store.list_videos().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn update_preserves_counters() {
        let store = Store::in_memory();
        let created = store.create_video(sample_video("Intro")).await.unwrap();

        // Simulate engagement written by another surface.
        store
            .backend()
            .update(
                &CollectionPath::videos(),
                &created.meta.id,
                serde_json::json!({"like_count": 42, "views": 9}),
            )
            .await
            .unwrap();

        store
            .update_video(
                &created.meta.id,
                VideoUpdate {
                    title: "Intro to Graphs".into(),
                    description: "updated".into(),
                    category_id: created.category_id.clone(),
                    subcategory_id: created.subcategory_id.clone(),
                    topic: created.topic.clone(),
                    video_url: created.video_url.clone(),
                    thumbnail_url: created.thumbnail_url.clone(),
                    duration: created.duration.clone(),
                },
            )
            .await
            .unwrap();

        let fetched = store.get_video(&created.meta.id).await.unwrap();
        assert_eq!(fetched.meta.title, "Intro to Graphs");
        assert_eq!(fetched.like_count, 42);
        assert_eq!(fetched.views, 9);
    }

    #[tokio::test]
    async fn delete_content_removes_the_document() {
        let store = Store::in_memory();
        let created = store.create_video(sample_video("Bye")).await.unwrap();

        store
            .delete_content(ContentKind::Video, &created.meta.id)
            .await
            .unwrap();

        assert!(matches!(
            store.get_video(&created.meta.id).await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn list_contents_wraps_the_variant() {
        let store = Store::in_memory();
        store.create_video(sample_video("Intro")).await.unwrap();

        let contents = store.list_contents(ContentKind::Video).await.unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].kind(), ContentKind::Video);
        assert!(store
            .list_contents(ContentKind::Challenge)
            .await
            .unwrap()
            .is_empty());
    }
}
