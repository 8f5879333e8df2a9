use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::debug;

use super::record_traits::{RecordRepositoryTrait, SyncRecord};
use crate::errors::{Error, Result, ValidationError};
use crate::sync::{SyncCollectionTrait, SyncDocument};

/// In-memory view of one local collection, kept in step with its repository.
///
/// Every mutation goes to the repository first and then reloads the whole
/// collection, so readers always see what the local store holds.
pub struct RecordStore<T: SyncRecord> {
    repository: Arc<dyn RecordRepositoryTrait<T>>,
    records: RwLock<Vec<T>>,
}

impl<T: SyncRecord> RecordStore<T> {
    pub fn new(repository: Arc<dyn RecordRepositoryTrait<T>>) -> Self {
        Self {
            repository,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Current in-memory contents.
    pub fn list(&self) -> Vec<T> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn find(&self, id: i64) -> Option<T> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|r| r.id() == Some(id))
            .cloned()
    }

    /// Replace the in-memory contents with what the repository holds.
    pub fn load(&self) -> Result<()> {
        let loaded = self.repository.list()?;
        debug!("Loaded {} {} from local store", loaded.len(), T::COLLECTION);
        *self
            .records
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = loaded;
        Ok(())
    }

    pub async fn create(&self, record: T) -> Result<T> {
        let created = self.repository.insert(record).await?;
        self.load()?;
        Ok(created)
    }

    pub async fn update(&self, record: T) -> Result<T> {
        if record.id().is_none() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        let updated = self.repository.update(record).await?;
        self.load()?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<usize> {
        let deleted = self.repository.delete(id).await?;
        self.load()?;
        Ok(deleted)
    }

    pub async fn insert_many(&self, records: Vec<T>) -> Result<usize> {
        let inserted = self.repository.insert_many(records).await?;
        self.load()?;
        Ok(inserted)
    }
}

/// A domain service backed by a [`RecordStore`].
///
/// Implementing this is enough to take part in cloud sync.
pub trait RecordService: Send + Sync {
    type Record: SyncRecord;

    fn record_store(&self) -> &RecordStore<Self::Record>;
}

#[async_trait]
impl<S: RecordService> SyncCollectionTrait for S {
    fn collection_name(&self) -> &'static str {
        S::Record::COLLECTION
    }

    fn snapshot_documents(&self) -> Result<Vec<SyncDocument>> {
        self.record_store()
            .list()
            .iter()
            .map(|record| {
                Ok(SyncDocument {
                    id: record.id(),
                    data: serde_json::to_value(record)?,
                })
            })
            .collect()
    }

    async fn reload(&self) -> Result<()> {
        self.record_store().load()
    }
}
