//! CRUD operations for the category → subcategory → topic taxonomy.
//!
//! Categories are a top-level collection; each category's subcategories
//! live in a parent-scoped sub-collection.  Topics have no entity identity
//! of their own: a topic is a string in the subcategory's `topics` array,
//! kept duplicate-free by the backend's array-union merge.

use tracing::info;

use skillforge_shared::{Category, Subcategory};

use crate::document::{CollectionPath, Document};
use crate::error::Result;
use crate::store::Store;

impl Store {
    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let docs = self.backend().list(&CollectionPath::categories()).await?;
        docs.into_iter().map(decode_category).collect()
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        let body = serde_json::json!({ "name": name });
        let id = self
            .backend()
            .insert(&CollectionPath::categories(), body)
            .await?;
        info!(id = %id, name = %name, "category created");
        Ok(Category {
            id,
            name: name.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Subcategories
    // ------------------------------------------------------------------

    /// Snapshot of one category's subcategories only.
    pub async fn list_subcategories(&self, category_id: &str) -> Result<Vec<Subcategory>> {
        let docs = self
            .backend()
            .list(&CollectionPath::subcategories(category_id))
            .await?;
        docs.into_iter().map(decode_subcategory).collect()
    }

    pub async fn create_subcategory(&self, category_id: &str, name: &str) -> Result<Subcategory> {
        let body = serde_json::json!({ "name": name, "topics": [] });
        let id = self
            .backend()
            .insert(&CollectionPath::subcategories(category_id), body)
            .await?;
        info!(category_id = %category_id, id = %id, name = %name, "subcategory created");
        Ok(Subcategory {
            id,
            name: name.to_string(),
            topics: Vec::new(),
        })
    }

    // ------------------------------------------------------------------
    // Topics
    // ------------------------------------------------------------------

    /// Merge topics into a subcategory's topic set.
    ///
    /// Additive union: concurrent additions from other sessions are never
    /// overwritten, and re-submitting an existing topic is a no-op.
    pub async fn add_topics(
        &self,
        category_id: &str,
        subcategory_id: &str,
        topics: &[String],
    ) -> Result<()> {
        self.backend()
            .merge_array_union(
                &CollectionPath::subcategories(category_id),
                subcategory_id,
                "topics",
                topics,
            )
            .await?;
        info!(
            category_id = %category_id,
            subcategory_id = %subcategory_id,
            count = topics.len(),
            "topics merged"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn decode_category(doc: Document) -> Result<Category> {
    let mut category: Category = serde_json::from_value(doc.data)?;
    category.id = doc.id;
    Ok(category)
}

fn decode_subcategory(doc: Document) -> Result<Subcategory> {
    let mut subcategory: Subcategory = serde_json::from_value(doc.data)?;
    subcategory.id = doc.id;
    Ok(subcategory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subcategories_are_scoped_to_their_category() {
        let store = Store::in_memory();
        let dsa = store.create_category("DSA").await.unwrap();
        let web = store.create_category("Web").await.unwrap();

        store.create_subcategory(&dsa.id, "Graphs").await.unwrap();
        store.create_subcategory(&web.id, "CSS").await.unwrap();

        let dsa_subs = store.list_subcategories(&dsa.id).await.unwrap();
        assert_eq!(dsa_subs.len(), 1);
        assert_eq!(dsa_subs[0].name, "Graphs");

        let web_subs = store.list_subcategories(&web.id).await.unwrap();
        assert_eq!(web_subs.len(), 1);
        assert_eq!(web_subs[0].name, "CSS");
    }

    #[tokio::test]
    async fn topic_union_is_idempotent() {
        let store = Store::in_memory();
        let cat = store.create_category("DSA").await.unwrap();
        let sub = store.create_subcategory(&cat.id, "Basics").await.unwrap();

        store
            .add_topics(&cat.id, &sub.id, &["Loops".into()])
            .await
            .unwrap();
        // Re-submitting "Loops" any number of times must not duplicate it.
        store
            .add_topics(&cat.id, &sub.id, &["Loops".into(), "Recursion".into()])
            .await
            .unwrap();
        store
            .add_topics(&cat.id, &sub.id, &["Loops".into()])
            .await
            .unwrap();

        let subs = store.list_subcategories(&cat.id).await.unwrap();
        assert_eq!(subs[0].topics, ["Loops", "Recursion"]);
    }
}
