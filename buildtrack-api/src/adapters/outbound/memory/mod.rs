//! In-memory record store.

mod seed;

use std::{collections::HashMap, path::Path, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use strum::IntoEnumIterator;
use tokio::sync::RwLock;

use crate::domain::{
    ports::outbound::{record_key, Collection, RecordStore},
    StoreError,
};

pub use seed::{demo_notes, demo_records};

/// Record store keeping every collection in process memory.
///
/// Each collection is a vector ordered newest first; an upsert of an existing
/// id replaces the record in place.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Value>>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-filled with `records`, listed in the given order.
    pub fn with_records(records: HashMap<Collection, Vec<Value>>) -> Self {
        Self {
            collections: Arc::new(RwLock::new(records)),
        }
    }

    /// Load a JSON snapshot: an object keyed by collection name, each holding
    /// an array of records. Unknown keys are ignored.
    pub async fn from_snapshot_file(path: &Path) -> Result<Self, StoreError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Backend(format!("reading {}: {e}", path.display())))?;
        let mut snapshot: HashMap<String, Vec<Value>> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Backend(format!("parsing {}: {e}", path.display())))?;

        let records = Collection::iter()
            .map(|collection| {
                let records = snapshot.remove(&collection.to_string()).unwrap_or_default();
                (collection, records)
            })
            .collect::<HashMap<_, _>>();
        Ok(Self::with_records(records))
    }

    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, collection: Collection, record: Value) -> Result<(), StoreError> {
        let id = record_key(collection, &record)?;
        let mut collections = self.collections.write().await;
        let records = collections.entry(collection).or_default();

        match records
            .iter()
            .position(|r| r.get("id").and_then(Value::as_str) == Some(id.as_str()))
        {
            Some(index) => records[index] = record,
            None => records.insert(0, record),
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(records) = collections.get_mut(&collection) {
            records.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn new_records_are_listed_first() {
        let store = MemoryRecordStore::new();
        store
            .save(Collection::Projects, json!({"id": "a"}))
            .await
            .unwrap();
        store
            .save(Collection::Projects, json!({"id": "b"}))
            .await
            .unwrap();

        let ids: Vec<Value> = store
            .get_all(Collection::Projects)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!("b"), json!("a")]);
    }

    #[tokio::test]
    async fn save_replaces_in_place() {
        let store = MemoryRecordStore::new();
        store
            .save(Collection::QaqcTasks, json!({"id": "a", "v": 1}))
            .await
            .unwrap();
        store
            .save(Collection::QaqcTasks, json!({"id": "b", "v": 1}))
            .await
            .unwrap();
        store
            .save(Collection::QaqcTasks, json!({"id": "a", "v": 2}))
            .await
            .unwrap();

        let records = store.get_all(Collection::QaqcTasks).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], json!({"id": "a", "v": 2}));
    }

    #[tokio::test]
    async fn records_without_id_are_rejected() {
        let store = MemoryRecordStore::new();
        let result = store
            .save(Collection::PcccMaterials, json!({"name": "no id"}))
            .await;
        assert!(matches!(result, Err(StoreError::InvalidRecord { .. })));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryRecordStore::new();
        store
            .save(Collection::Projects, json!({"id": "a"}))
            .await
            .unwrap();

        store.delete(Collection::Projects, "a").await.unwrap();
        store.delete(Collection::Projects, "a").await.unwrap();
        assert_eq!(store.len(Collection::Projects).await, 0);
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let store = MemoryRecordStore::new();
        store
            .save(Collection::Projects, json!({"id": "x"}))
            .await
            .unwrap();

        assert!(store
            .get_all(Collection::PcccMaterials)
            .await
            .unwrap()
            .is_empty());
    }
}
