//! The typed store handle.
//!
//! [`Store`] wraps a [`DocumentBackend`] trait object and exposes typed
//! CRUD helpers, implemented across the per-domain modules (`contents`,
//! `users`, `categories`).  Components receive the handle explicitly;
//! there is no ambient singleton.

use std::sync::Arc;

use crate::backend::DocumentBackend;
use crate::memory::MemoryBackend;

/// Handle to the remote document database.
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn DocumentBackend>,
}

impl Store {
    /// Wrap an existing backend.
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self { backend }
    }

    /// Store over a fresh [`MemoryBackend`].  Used by tests and local
    /// development.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    pub(crate) fn backend(&self) -> &dyn DocumentBackend {
        self.backend.as_ref()
    }
}
