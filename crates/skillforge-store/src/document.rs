//! Collection addressing and the raw document shape.

use serde_json::Value;

use skillforge_shared::ContentKind;

/// Path of a collection in the document database.
///
/// Top-level collections are plain names (`videos`, `users`); the
/// subcategories of a category live in a parent-scoped sub-collection
/// (`categories/{id}/subcategories`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    pub fn videos() -> Self {
        Self("videos".into())
    }

    pub fn challenges() -> Self {
        Self("challenges".into())
    }

    pub fn events() -> Self {
        Self("events".into())
    }

    pub fn users() -> Self {
        Self("users".into())
    }

    pub fn categories() -> Self {
        Self("categories".into())
    }

    pub fn subcategories(category_id: &str) -> Self {
        Self(format!("categories/{category_id}/subcategories"))
    }

    /// Collection holding the given content variant.
    pub fn for_kind(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Video => Self::videos(),
            ContentKind::Challenge => Self::challenges(),
            ContentKind::Event => Self::events(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw document: backend-assigned identifier plus JSON body.  The body
/// never contains the identifier; typed decoders copy it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}
