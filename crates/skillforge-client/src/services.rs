//! The handle bundle components are constructed with.
//!
//! The remote store and the media storage are process-wide resources, but
//! they are passed into each component explicitly rather than reached
//! through ambient globals.

use std::sync::Arc;

use skillforge_media::MediaStorage;
use skillforge_store::Store;

/// Shared service handles.  Cheap to clone; clones share the same
/// backends.
#[derive(Clone)]
pub struct Services {
    /// Handle to the remote document database.
    pub store: Store,
    /// Handle to the remote binary storage.
    pub media: Arc<dyn MediaStorage>,
}

impl Services {
    pub fn new(store: Store, media: Arc<dyn MediaStorage>) -> Self {
        Self { store, media }
    }
}
