//! In-memory repository and clock used by service tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use super::record_traits::{RecordRepositoryTrait, SyncRecord};
use crate::errors::{DatabaseError, Error, Result};
use crate::utils::time_utils::Clock;

pub struct InMemoryRepository<T: SyncRecord> {
    records: Mutex<Vec<T>>,
    next_id: AtomicI64,
}

impl<T: SyncRecord> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        let max_id = records.iter().filter_map(|r| r.id()).max().unwrap_or(0);
        Self {
            records: Mutex::new(records),
            next_id: AtomicI64::new(max_id + 1),
        }
    }

    pub fn stored(&self) -> Vec<T> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: SyncRecord> RecordRepositoryTrait<T> for InMemoryRepository<T> {
    fn list(&self) -> Result<Vec<T>> {
        Ok(self.stored())
    }

    fn get_by_id(&self, id: i64) -> Result<T> {
        self.stored()
            .into_iter()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(id.to_string())))
    }

    async fn insert(&self, mut record: T) -> Result<T> {
        record.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T> {
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| Error::Database(DatabaseError::NotFound("record".to_string())))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != Some(id));
        Ok(before - records.len())
    }

    async fn insert_many(&self, records: Vec<T>) -> Result<usize> {
        let count = records.len();
        for mut record in records {
            match record.id() {
                Some(id) => {
                    self.next_id.fetch_max(id + 1, Ordering::SeqCst);
                }
                None => record.set_id(self.next_id.fetch_add(1, Ordering::SeqCst)),
            }
            self.records.lock().unwrap().push(record);
        }
        Ok(count)
    }

    async fn clear(&self) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let count = records.len();
        records.clear();
        Ok(count)
    }
}

/// Clock frozen at a fixed instant, movable by tests.
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(instant.timestamp_millis()),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.millis.fetch_add(secs * 1000, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis.load(Ordering::SeqCst))
            .single()
            .unwrap_or_else(Utc::now)
    }
}
