use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::Result;

/// A record kept in a local collection and mirrored to one remote document.
///
/// The identifier is assigned by the local store when the record is first
/// inserted. A record without an identifier has never been persisted and is
/// never synced.
pub trait SyncRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name of the local and remote collection holding this record kind.
    const COLLECTION: &'static str;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);
}

/// Local store operations for one record collection.
#[async_trait]
pub trait RecordRepositoryTrait<T: SyncRecord>: Send + Sync {
    /// Read every record in the collection.
    fn list(&self) -> Result<Vec<T>>;

    fn get_by_id(&self, id: i64) -> Result<T>;

    /// Insert a record, assigning a fresh identifier. Any identifier already
    /// set on `record` is ignored.
    async fn insert(&self, record: T) -> Result<T>;

    /// Overwrite the record with the same identifier.
    async fn update(&self, record: T) -> Result<T>;

    async fn delete(&self, id: i64) -> Result<usize>;

    /// Insert records as-is, keeping identifiers that are already set.
    async fn insert_many(&self, records: Vec<T>) -> Result<usize>;

    /// Remove every record in the collection.
    async fn clear(&self) -> Result<usize>;
}
