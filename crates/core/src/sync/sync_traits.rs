use async_trait::async_trait;
use serde_json::Value;

use super::sync_model::{LocalSnapshot, RemoteDocument, SyncDocument};
use crate::errors::Result;

/// Per-user document store in the cloud.
///
/// Paths are slash separated, e.g. `users/{uid}/assets/7`.
#[async_trait]
pub trait RemoteStoreTrait: Send + Sync {
    /// Create or fully overwrite the document at `path`.
    async fn set_document(&self, path: &str, value: &Value) -> Result<()>;

    async fn get_document(&self, path: &str) -> Result<Option<Value>>;

    /// Every document directly under `collection_path`.
    async fn list_documents(&self, collection_path: &str) -> Result<Vec<RemoteDocument>>;

    async fn delete_document(&self, path: &str) -> Result<()>;
}

/// A local collection taking part in cloud sync.
#[async_trait]
pub trait SyncCollectionTrait: Send + Sync {
    fn collection_name(&self) -> &'static str;

    /// Current in-memory contents, one document per record.
    fn snapshot_documents(&self) -> Result<Vec<SyncDocument>>;

    /// Re-read the collection from the local store.
    async fn reload(&self) -> Result<()>;
}

/// Durable storage for the time of the last successful sync.
pub trait SyncStateStoreTrait: Send + Sync {
    fn load_last_sync_time(&self) -> Result<Option<i64>>;

    fn save_last_sync_time(&self, millis: i64) -> Result<()>;
}

/// Whole-database operations spanning several collections.
#[async_trait]
pub trait LocalSnapshotRepositoryTrait: Send + Sync {
    /// Clear the five record collections and insert the snapshot's records,
    /// all in one transaction. Settings are left untouched.
    async fn replace_all(&self, snapshot: LocalSnapshot) -> Result<()>;

    /// Read all six collections.
    fn export(&self) -> Result<LocalSnapshot>;

    /// Like [`replace_all`](Self::replace_all), also overwriting settings when
    /// the snapshot carries them.
    async fn import(&self, snapshot: LocalSnapshot) -> Result<()>;
}
