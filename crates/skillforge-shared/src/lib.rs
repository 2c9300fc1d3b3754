//! # skillforge-shared
//!
//! Domain model shared by every Skillforge crate: the content record
//! variants shown in the admin console, the category/subcategory/topic
//! taxonomy used by the upload form, and small helpers (duration
//! formatting, shared constants).
//!
//! Every struct derives `Serialize` and `Deserialize` so it can cross the
//! document-store boundary and be handed directly to a UI layer.

pub mod constants;
pub mod duration;
pub mod types;

pub use types::*;
