//! Admin content table: one variant at a time, filterable, sortable, with
//! two-step delete.
//!
//! The base list is only ever replaced by a completed fetch; search and
//! sort derive a memoized projection and never mutate it.  Every fetch is
//! generation-stamped so a slow fetch that lost a tab race cannot
//! overwrite a newer result.

use futures::future::join_all;
use tracing::{debug, warn};

use skillforge_shared::duration::parse_duration;
use skillforge_shared::{ContentKind, ContentRecord};
use skillforge_store::{Store, StoreError};

use crate::edit::EditPayload;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sortable columns.  Keys that do not apply to the active variant compare
/// records as equal, so the stable sort leaves their order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Creator,
    CreatedAt,
    Likes,
    Reports,
    Views,
    Rating,
    Duration,
    EventDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Comparable projection of one record under one key.
enum SortValue {
    Missing,
    Text(String),
    Number(f64),
    Time(chrono::DateTime<chrono::Utc>),
}

fn sort_value(record: &ContentRecord, key: SortKey) -> SortValue {
    match key {
        SortKey::Title => SortValue::Text(record.title().to_string()),
        SortKey::Creator => SortValue::Text(record.creator_name().to_string()),
        SortKey::CreatedAt => SortValue::Time(record.created_at()),
        SortKey::Likes => match record {
            ContentRecord::Video(v) => SortValue::Number(v.like_count as f64),
            _ => SortValue::Missing,
        },
        SortKey::Reports => match record {
            ContentRecord::Video(v) => SortValue::Number(v.report_count as f64),
            _ => SortValue::Missing,
        },
        SortKey::Views => match record {
            ContentRecord::Video(v) => SortValue::Number(v.views as f64),
            _ => SortValue::Missing,
        },
        SortKey::Rating => match record {
            ContentRecord::Video(v) => SortValue::Number(v.average_rating),
            _ => SortValue::Missing,
        },
        SortKey::Duration => match record {
            // Sort on the parsed seconds, not the display string.
            ContentRecord::Video(v) => parse_duration(&v.duration)
                .map(|s| SortValue::Number(s as f64))
                .unwrap_or(SortValue::Missing),
            _ => SortValue::Missing,
        },
        SortKey::EventDate => match record {
            ContentRecord::Event(e) => SortValue::Time(e.event_date),
            _ => SortValue::Missing,
        },
    }
}

fn compare(a: &SortValue, b: &SortValue) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (SortValue::Text(x), SortValue::Text(y)) => x.cmp(y),
        (SortValue::Number(x), SortValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (SortValue::Time(x), SortValue::Time(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// A record staged for deletion, awaiting explicit confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StagedDelete {
    kind: ContentKind,
    id: String,
}

/// View model of the admin content table.
pub struct ContentListView {
    store: Store,
    tab: ContentKind,
    records: Vec<ContentRecord>,
    search: String,
    sort: Option<SortSpec>,
    staged_delete: Option<StagedDelete>,
    loading: bool,
    fetch_gen: u64,
    // Memoized filtered+sorted projection; None when stale.
    view_cache: Option<Vec<ContentRecord>>,
}

impl ContentListView {
    /// New view on the given tab.  Empty until [`fetch`](Self::fetch) runs.
    pub fn new(store: Store, tab: ContentKind) -> Self {
        Self {
            store,
            tab,
            records: Vec::new(),
            search: String::new(),
            sort: None,
            staged_delete: None,
            loading: false,
            fetch_gen: 0,
            view_cache: None,
        }
    }

    pub fn tab(&self) -> ContentKind {
        self.tab
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Identifier of the record currently staged for deletion, if any.
    pub fn staged_delete(&self) -> Option<&str> {
        self.staged_delete.as_ref().map(|s| s.id.as_str())
    }

    // ------------------------------------------------------------------
    // Tab switching and fetch
    // ------------------------------------------------------------------

    /// Switch the active variant: clears search and sort, drops the old
    /// list (only the loading state is visible), and re-fetches.
    pub async fn select_tab(&mut self, tab: ContentKind) {
        self.tab = tab;
        self.search.clear();
        self.sort = None;
        self.staged_delete = None;
        self.fetch().await;
    }

    /// Load the active variant's collection and resolve creator names.
    ///
    /// A fetch error leaves an empty, non-loading list; the failure is
    /// logged, not surfaced.
    pub async fn fetch(&mut self) {
        let generation = self.begin_fetch();
        let result = Self::load(self.store.clone(), self.tab).await;
        self.complete_fetch(generation, result);
    }

    /// Start a fetch: clear the visible list, enter loading, and stamp a
    /// new generation.  Exposed so overlapping fetches can be driven (and
    /// tested) explicitly.
    pub fn begin_fetch(&mut self) -> u64 {
        self.loading = true;
        self.records.clear();
        self.invalidate();
        self.fetch_gen += 1;
        self.fetch_gen
    }

    /// Publish a fetch result.  Returns `false` when the result belonged
    /// to a superseded generation and was discarded.
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        result: std::result::Result<Vec<ContentRecord>, StoreError>,
    ) -> bool {
        if generation != self.fetch_gen {
            debug!(generation, current = self.fetch_gen, "stale fetch discarded");
            return false;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                debug!(tab = %self.tab, count = records.len(), "fetch complete");
                self.records = records;
            }
            Err(e) => {
                warn!(tab = %self.tab, error = %e, "fetch failed");
                self.records = Vec::new();
            }
        }
        self.invalidate();
        true
    }

    /// Snapshot the collection, then resolve every creator name in
    /// parallel.  Lookup failures degrade per record to the sentinel; the
    /// aggregate publishes only after all lookups settle.
    async fn load(
        store: Store,
        tab: ContentKind,
    ) -> std::result::Result<Vec<ContentRecord>, StoreError> {
        let mut records = store.list_contents(tab).await?;

        let names = join_all(
            records
                .iter()
                .map(|r| store.resolve_creator_name(&r.meta().creator_id)),
        )
        .await;

        for (record, name) in records.iter_mut().zip(names) {
            record.meta_mut().creator_name = name;
        }
        Ok(records)
    }

    // ------------------------------------------------------------------
    // Derived view
    // ------------------------------------------------------------------

    /// Update the search term.  Case-insensitive substring match against
    /// title and creator name.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.invalidate();
    }

    /// Toggle direction when the active column is re-selected, otherwise
    /// sort ascending on the new column.
    pub fn request_sort(&mut self, key: SortKey) {
        self.sort = Some(match self.sort {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: spec.direction.toggled(),
            },
            _ => SortSpec {
                key,
                direction: SortDirection::Ascending,
            },
        });
        self.invalidate();
    }

    /// The filtered, sorted projection.  Recomputed only after a change to
    /// the base list, search term, or sort; the base list is never
    /// mutated.
    pub fn visible(&mut self) -> &[ContentRecord] {
        if self.view_cache.is_none() {
            self.view_cache = Some(self.project());
        }
        self.view_cache.as_deref().unwrap_or_default()
    }

    fn project(&self) -> Vec<ContentRecord> {
        // The term is matched exactly as stored; whitespace in it is part
        // of the substring, only case is folded.
        let needle = self.search.to_lowercase();
        let mut view: Vec<ContentRecord> = self
            .records
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.title().to_lowercase().contains(&needle)
                    || r.creator_name().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        if let Some(SortSpec { key, direction }) = self.sort {
            // sort_by is stable: equal keys keep their relative order.
            view.sort_by(|a, b| {
                let ordering = compare(&sort_value(a, key), &sort_value(b, key));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        view
    }

    fn invalidate(&mut self) {
        self.view_cache = None;
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Stage a record for deletion.  Nothing is removed until
    /// [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, id: &str) {
        let staged = self
            .records
            .iter()
            .find(|r| r.id() == id)
            .map(|r| StagedDelete {
                kind: r.kind(),
                id: id.to_string(),
            });
        self.staged_delete = staged;
    }

    /// Drop the staged deletion without touching anything.
    pub fn cancel_delete(&mut self) {
        self.staged_delete = None;
    }

    /// Delete the staged record remotely, then remove it from the local
    /// list without a re-fetch.  On failure the stage is cleared and the
    /// list is left unchanged; the user must reinitiate.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(staged) = self.staged_delete.take() else {
            return Ok(());
        };

        match self.store.delete_content(staged.kind, &staged.id).await {
            Ok(()) => {
                self.records.retain(|r| r.id() != staged.id);
                self.invalidate();
                Ok(())
            }
            Err(e) => {
                warn!(id = %staged.id, error = %e, "delete failed");
                Err(e.into())
            }
        }
    }

    // ------------------------------------------------------------------
    // Edit hand-off
    // ------------------------------------------------------------------

    /// Assemble the variant-specific editable-field payload for the
    /// external editing route.  No local mutation.
    pub fn request_edit(&self, id: &str) -> Option<EditPayload> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .map(EditPayload::from)
    }
}
