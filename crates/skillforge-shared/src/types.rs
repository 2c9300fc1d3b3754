//! Domain model structs stored in the remote document database.
//!
//! Each content variant lives in its own top-level collection, so the
//! variant structs serialize without a discriminator; [`ContentRecord`]
//! is the client-side projection that unifies them for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_CREATOR;

// ---------------------------------------------------------------------------
// Content variants
// ---------------------------------------------------------------------------

/// The three kinds of content the platform manages.  Doubles as the tab
/// discriminator in the admin console and the collection selector in the
/// store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Video,
    Challenge,
    Event,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Challenge => "challenge",
            Self::Event => "event",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation status of a video.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    #[default]
    Active,
    Removed,
}

/// Whether an event is held online or at a physical venue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventMode {
    Online,
    Offline,
}

/// Fields common to every content variant.
///
/// `creator_name` is denormalized: it is resolved from the `users`
/// collection after fetch and never written back, so it is skipped on
/// serialization and defaults to empty on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentMeta {
    /// Document identifier, assigned by the store on create.  Immutable.
    #[serde(default)]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Identifier of the creator's profile in the `users` collection.
    pub creator_id: String,
    /// Resolved creator display name; [`UNKNOWN_CREATOR`] when the profile
    /// lookup fails.  Derived, never persisted.
    #[serde(skip_serializing, default)]
    pub creator_name: String,
    /// Creation timestamp.  Immutable once created.
    pub created_at: DateTime<Utc>,
}

/// A teacher-uploaded video lesson.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoRecord {
    #[serde(flatten)]
    pub meta: ContentMeta,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    /// Identifier of the owning category.
    pub category_id: String,
    /// Identifier of the owning subcategory, empty when none was chosen.
    #[serde(default)]
    pub subcategory_id: String,
    /// Topic string within the subcategory's topic set.
    #[serde(default)]
    pub topic: String,
    /// Formatted running time, `mm:ss` or `hh:mm:ss`.
    pub duration: String,
    pub like_count: u64,
    pub report_count: u64,
    pub views: u64,
    /// Average community rating, 0.0–5.0.
    pub average_rating: f64,
    pub status: ContentStatus,
}

/// A coding challenge with a problem statement and a reference solution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChallengeRecord {
    #[serde(flatten)]
    pub meta: ContentMeta,
    pub problem_url: String,
    pub solution_url: String,
    pub category_id: String,
    #[serde(default)]
    pub subcategory_id: String,
    #[serde(default)]
    pub topic: String,
}

/// A scheduled community event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    #[serde(flatten)]
    pub meta: ContentMeta,
    pub event_date: DateTime<Utc>,
    /// Last moment at which registration is accepted.
    pub registration_closes: DateTime<Utc>,
    pub mode: EventMode,
    pub location: String,
    pub organizer: String,
}

/// Client-side union of the three content variants.
///
/// Consumers match exhaustively; there is no optional-field duck typing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentRecord {
    Video(VideoRecord),
    Challenge(ChallengeRecord),
    Event(EventRecord),
}

impl ContentRecord {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Video(_) => ContentKind::Video,
            Self::Challenge(_) => ContentKind::Challenge,
            Self::Event(_) => ContentKind::Event,
        }
    }

    pub fn meta(&self) -> &ContentMeta {
        match self {
            Self::Video(v) => &v.meta,
            Self::Challenge(c) => &c.meta,
            Self::Event(e) => &e.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut ContentMeta {
        match self {
            Self::Video(v) => &mut v.meta,
            Self::Challenge(c) => &mut c.meta,
            Self::Event(e) => &mut e.meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    pub fn title(&self) -> &str {
        &self.meta().title
    }

    /// Resolved creator display name, never empty: falls back to the
    /// [`UNKNOWN_CREATOR`] sentinel when resolution has not happened.
    pub fn creator_name(&self) -> &str {
        let name = &self.meta().creator_name;
        if name.is_empty() {
            UNKNOWN_CREATOR
        } else {
            name
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.meta().created_at
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A user profile, used only to resolve creator display names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Taxonomy
// ---------------------------------------------------------------------------

/// A top-level category.  Owns its subcategories as a parent-scoped
/// sub-collection (`categories/{id}/subcategories`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

/// A subcategory.  Owns an insertion-ordered, duplicate-free set of topic
/// strings; uniqueness is enforced by union-merge semantics on write, not
/// by this struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subcategory {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str, title: &str) -> ContentMeta {
        ContentMeta {
            id: id.into(),
            title: title.into(),
            creator_id: "u1".into(),
            creator_name: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn creator_name_falls_back_to_sentinel() {
        let record = ContentRecord::Challenge(ChallengeRecord {
            meta: meta("c1", "Two Sum"),
            problem_url: String::new(),
            solution_url: String::new(),
            category_id: "cat".into(),
            subcategory_id: String::new(),
            topic: String::new(),
        });
        assert_eq!(record.creator_name(), UNKNOWN_CREATOR);
    }

    #[test]
    fn derived_creator_name_is_not_serialized() {
        let mut m = meta("v1", "Intro");
        m.creator_name = "Ada".into();
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("creator_name").is_none());

        let back: ContentMeta = serde_json::from_value(json).unwrap();
        assert_eq!(back.creator_name, "");
    }

    #[test]
    fn video_round_trips_through_json() {
        let video = VideoRecord {
            meta: meta("v1", "Intro to Graphs"),
            description: "BFS and DFS".into(),
            video_url: "https://cdn/v1.mp4".into(),
            thumbnail_url: "https://cdn/v1.png".into(),
            category_id: "cat1".into(),
            subcategory_id: "sub1".into(),
            topic: "Graphs".into(),
            duration: "12:34".into(),
            like_count: 3,
            report_count: 0,
            views: 10,
            average_rating: 4.5,
            status: ContentStatus::Active,
        };
        let json = serde_json::to_value(&video).unwrap();
        // Flattened meta: fields appear at the top level.
        assert_eq!(json["title"], "Intro to Graphs");
        let back: VideoRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, video);
    }
}
