//! The document-database trait the hosted backend is consumed through.

use async_trait::async_trait;
use serde_json::Value;

use crate::document::{CollectionPath, Document};
use crate::error::Result;

/// Document-level operations offered by the remote database.
///
/// Reads are whole-collection snapshots; there is no server-side filtering
/// in this core.  All methods are non-blocking; the backend's own timeout
/// behavior applies.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Snapshot of every document in a collection, in insertion order.
    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>>;

    /// Fetch a single document, `None` when absent.
    async fn get(&self, collection: &CollectionPath, id: &str) -> Result<Option<Document>>;

    /// Create a document with a backend-assigned identifier.
    async fn insert(&self, collection: &CollectionPath, data: Value) -> Result<String>;

    /// Merge the given top-level fields into an existing document.  Fields
    /// not named are left untouched.
    async fn update(&self, collection: &CollectionPath, id: &str, fields: Value) -> Result<()>;

    /// Hard-delete a document.
    async fn delete(&self, collection: &CollectionPath, id: &str) -> Result<()>;

    /// Add `values` to the string-array field `field`, set-union style:
    /// stored order is preserved, duplicates are never introduced, and
    /// elements added concurrently by other writers are never dropped.
    async fn merge_array_union(
        &self,
        collection: &CollectionPath,
        id: &str,
        field: &str,
        values: &[String],
    ) -> Result<()>;
}
