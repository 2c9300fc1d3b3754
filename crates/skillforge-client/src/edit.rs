//! Payloads handed to the external editing route.
//!
//! Editing happens on a separate surface; the list view only assembles the
//! record's current editable fields, variant-shaped, and navigates.  The
//! payloads serialize so they can cross the routing boundary as-is.

use chrono::{DateTime, Utc};
use serde::Serialize;

use skillforge_shared::{ContentRecord, EventMode};

/// Variant-specific editable-field snapshot of a record.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditPayload {
    Video {
        id: String,
        title: String,
        description: String,
        category_id: String,
        subcategory_id: String,
        topic: String,
        video_url: String,
        thumbnail_url: String,
        duration: String,
    },
    Challenge {
        id: String,
        title: String,
        problem_url: String,
        solution_url: String,
        category_id: String,
        subcategory_id: String,
        topic: String,
    },
    Event {
        id: String,
        title: String,
        event_date: DateTime<Utc>,
        registration_closes: DateTime<Utc>,
        mode: EventMode,
        location: String,
        organizer: String,
    },
}

impl From<&ContentRecord> for EditPayload {
    fn from(record: &ContentRecord) -> Self {
        match record {
            ContentRecord::Video(v) => Self::Video {
                id: v.meta.id.clone(),
                title: v.meta.title.clone(),
                description: v.description.clone(),
                category_id: v.category_id.clone(),
                subcategory_id: v.subcategory_id.clone(),
                topic: v.topic.clone(),
                video_url: v.video_url.clone(),
                thumbnail_url: v.thumbnail_url.clone(),
                duration: v.duration.clone(),
            },
            ContentRecord::Challenge(c) => Self::Challenge {
                id: c.meta.id.clone(),
                title: c.meta.title.clone(),
                problem_url: c.problem_url.clone(),
                solution_url: c.solution_url.clone(),
                category_id: c.category_id.clone(),
                subcategory_id: c.subcategory_id.clone(),
                topic: c.topic.clone(),
            },
            ContentRecord::Event(e) => Self::Event {
                id: e.meta.id.clone(),
                title: e.meta.title.clone(),
                event_date: e.event_date,
                registration_closes: e.registration_closes,
                mode: e.mode,
                location: e.location.clone(),
                organizer: e.organizer.clone(),
            },
        }
    }
}
