//! In-process [`DocumentBackend`] used by tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::DocumentBackend;
use crate::document::{CollectionPath, Document};
use crate::error::{Result, StoreError};

/// Collections as insertion-ordered vectors of `(id, body)` pairs, keyed by
/// collection path.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, Vec<(String, Value)>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>> {
        let guard = self.collections.read().await;
        let docs = guard
            .get(collection.as_str())
            .map(|rows| {
                rows.iter()
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn get(&self, collection: &CollectionPath, id: &str) -> Result<Option<Document>> {
        let guard = self.collections.read().await;
        let doc = guard
            .get(collection.as_str())
            .and_then(|rows| rows.iter().find(|(row_id, _)| row_id == id))
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            });
        Ok(doc)
    }

    async fn insert(&self, collection: &CollectionPath, data: Value) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let mut guard = self.collections.write().await;
        guard
            .entry(collection.as_str().to_string())
            .or_default()
            .push((id.clone(), data));
        Ok(id)
    }

    async fn update(&self, collection: &CollectionPath, id: &str, fields: Value) -> Result<()> {
        let incoming = match fields {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::InvalidDocument(format!(
                    "update requires a JSON object, got {other}"
                )))
            }
        };

        let mut guard = self.collections.write().await;
        let rows = guard
            .get_mut(collection.as_str())
            .ok_or(StoreError::NotFound)?;
        let (_, data) = rows
            .iter_mut()
            .find(|(row_id, _)| row_id == id)
            .ok_or(StoreError::NotFound)?;

        let body = data.as_object_mut().ok_or_else(|| {
            StoreError::InvalidDocument(format!("stored document {id} is not an object"))
        })?;
        for (key, value) in incoming {
            body.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &CollectionPath, id: &str) -> Result<()> {
        let mut guard = self.collections.write().await;
        let rows = guard
            .get_mut(collection.as_str())
            .ok_or(StoreError::NotFound)?;
        let before = rows.len();
        rows.retain(|(row_id, _)| row_id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn merge_array_union(
        &self,
        collection: &CollectionPath,
        id: &str,
        field: &str,
        values: &[String],
    ) -> Result<()> {
        let mut guard = self.collections.write().await;
        let rows = guard
            .get_mut(collection.as_str())
            .ok_or(StoreError::NotFound)?;
        let (_, data) = rows
            .iter_mut()
            .find(|(row_id, _)| row_id == id)
            .ok_or(StoreError::NotFound)?;

        let body = data.as_object_mut().ok_or_else(|| {
            StoreError::InvalidDocument(format!("stored document {id} is not an object"))
        })?;
        let array = body
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        let array = array.as_array_mut().ok_or_else(|| {
            StoreError::InvalidDocument(format!("field {field:?} of {id} is not an array"))
        })?;

        for value in values {
            let exists = array.iter().any(|v| v.as_str() == Some(value));
            if !exists {
                array.push(Value::String(value.clone()));
            }
        }
        Ok(())
    }
}
