use async_trait::async_trait;
use buildtrack_core::domain::{AcceptanceTask, PcccMaterial, Project};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString};

use crate::domain::StoreError;

/// Named record collections known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    Projects,
    PcccMaterials,
    QaqcTasks,
}

/// Outbound port for record persistence.
///
/// Records cross this boundary untyped. Every record is a JSON object with a
/// string `id`; `save` upserts on that id. Listings return the most recently
/// inserted records first.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StoreError>;

    async fn save(&self, collection: Collection, record: Value) -> Result<(), StoreError>;

    /// Deleting an id that is not present is not an error.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;
}

/// A typed record stored in a fixed collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn record_id(&self) -> &str;
}

impl Record for Project {
    const COLLECTION: Collection = Collection::Projects;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for PcccMaterial {
    const COLLECTION: Collection = Collection::PcccMaterials;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for AcceptanceTask {
    const COLLECTION: Collection = Collection::QaqcTasks;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Load and decode every record of `R`'s collection.
///
/// A record with an unknown enum value or a missing field fails the whole
/// load with [`StoreError::InvalidRecord`].
pub async fn load_all<R: Record>(store: &dyn RecordStore) -> Result<Vec<R>, StoreError> {
    store
        .get_all(R::COLLECTION)
        .await?
        .into_iter()
        .map(|value| serde_json::from_value(value).map_err(|e| StoreError::invalid(R::COLLECTION, e)))
        .collect()
}

pub async fn find_record<R: Record>(
    store: &dyn RecordStore,
    id: &str,
) -> Result<Option<R>, StoreError> {
    Ok(load_all::<R>(store)
        .await?
        .into_iter()
        .find(|record| record.record_id() == id))
}

pub async fn save_record<R: Record>(store: &dyn RecordStore, record: &R) -> Result<(), StoreError> {
    let value = serde_json::to_value(record).map_err(|e| StoreError::invalid(R::COLLECTION, e))?;
    store.save(R::COLLECTION, value).await
}

pub async fn delete_record<R: Record>(store: &dyn RecordStore, id: &str) -> Result<(), StoreError> {
    store.delete(R::COLLECTION, id).await
}

/// Extract the `id` of an untyped record.
pub fn record_key(collection: Collection, record: &Value) -> Result<String, StoreError> {
    record
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::invalid(collection, "record has no string `id`"))
}
