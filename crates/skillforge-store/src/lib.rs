//! # skillforge-store
//!
//! The remote document-database boundary.  The hosted database is consumed
//! only through the [`DocumentBackend`] trait: whole-collection snapshot
//! reads, document-level create/update/delete, and an additive array-union
//! merge (the contract the taxonomy's topic set relies on).
//!
//! [`Store`] is the typed facade the rest of the application talks to; its
//! CRUD helpers are spread across per-domain modules (`contents`, `users`,
//! `categories`).  [`MemoryBackend`] is the in-process backend used by
//! tests and local development; a hosted adapter implements the same trait.

pub mod backend;
pub mod categories;
pub mod contents;
pub mod document;
pub mod memory;
pub mod store;
pub mod users;

mod error;

pub use backend::DocumentBackend;
pub use contents::{NewChallenge, NewEvent, NewVideo, VideoUpdate};
pub use document::{CollectionPath, Document};
pub use error::{Result, StoreError};
pub use memory::MemoryBackend;
pub use store::Store;
