//! # skillforge-client
//!
//! View-model layer of the Skillforge admin console and teacher upload
//! surface.  Two components do the real work:
//!
//! - [`ContentListView`] -- sortable, filterable admin table over one
//!   content variant at a time, with two-step delete and edit hand-off.
//! - [`CategorizedUploadForm`] -- the category/subcategory/topic selector
//!   plus two-file upload and create-or-update submission of a video.
//!
//! Components hold explicit handles to the store and media storage (see
//! [`Services`]); nothing in this crate is a singleton.  All remote work
//! is async and never blocks the caller's event loop.

pub mod content_list;
pub mod edit;
pub mod services;
pub mod upload_form;

mod error;

pub use content_list::{ContentListView, SortDirection, SortKey, SortSpec};
pub use edit::EditPayload;
pub use error::{ClientError, Result};
pub use services::Services;
pub use upload_form::{CategorizedUploadForm, Selection, SelectionMode, UploadDraft};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to debug for this crate and info for the
/// store and media layers.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("skillforge_client=debug,skillforge_store=info,skillforge_media=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
