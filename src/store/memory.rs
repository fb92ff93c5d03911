//! In-memory document store used for embedding and tests.

use crate::store::{Document, DocumentStore, StoreError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// Collections as id-ordered maps behind one lock. Listing follows id order,
/// which for generated ids tracks creation time.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.get(collection).and_then(|c| c.get(id)).cloned())
    }

    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections.entry(collection.to_string()).or_default().insert(id.to_string(), doc);
        Ok(())
    }

    async fn merge(&self, collection: &str, id: &str, patch: Document) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        let Some(existing) = collections.get_mut(collection).and_then(|c| c.get_mut(id)) else {
            return Ok(false);
        };
        for (key, value) in patch {
            existing.insert(key, value);
        }
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        Ok(collections.get_mut(collection).map(|c| c.remove(id).is_some()).unwrap_or(false))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.get(collection).map(|c| c.values().cloned().collect()).unwrap_or_default())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set("root/x/lookups", "LOOKUP1", doc(json!({ "id": "LOOKUP1" }))).await.unwrap();
        let fetched = store.get("root/x/lookups", "LOOKUP1").await.unwrap();
        assert_eq!(fetched, Some(doc(json!({ "id": "LOOKUP1" }))));
    }

    #[tokio::test]
    async fn get_of_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("root/x/lookups", "LOOKUP404").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_orders_by_id_and_isolates_collections() {
        let store = MemoryStore::new();
        store.set("a", "2", doc(json!({ "id": "2" }))).await.unwrap();
        store.set("a", "1", doc(json!({ "id": "1" }))).await.unwrap();
        store.set("b", "9", doc(json!({ "id": "9" }))).await.unwrap();

        let listed = store.list("a").await.unwrap();
        let ids: Vec<&str> = listed.iter().filter_map(|d| d["id"].as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(store.list("b").await.unwrap().len(), 1);
        assert!(store.list("c").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn merge_overwrites_top_level_keys_only() {
        let store = MemoryStore::new();
        store
            .set("a", "1", doc(json!({ "id": "1", "name": "old", "keep": true })))
            .await
            .unwrap();
        let merged = store.merge("a", "1", doc(json!({ "name": "new" }))).await.unwrap();
        assert!(merged);
        let fetched = store.get("a", "1").await.unwrap().unwrap();
        assert_eq!(fetched["name"], json!("new"));
        assert_eq!(fetched["keep"], json!(true));
    }

    #[tokio::test]
    async fn merge_into_missing_document_writes_nothing() {
        let store = MemoryStore::new();
        let merged = store.merge("a", "ghost", doc(json!({ "name": "x" }))).await.unwrap();
        assert!(!merged);
        assert_eq!(store.get("a", "ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_reports_whether_something_was_removed() {
        let store = MemoryStore::new();
        store.set("a", "1", doc(json!({ "id": "1" }))).await.unwrap();
        assert!(store.delete("a", "1").await.unwrap());
        assert!(!store.delete("a", "1").await.unwrap());
        assert_eq!(store.get("a", "1").await.unwrap(), None);
    }
}
