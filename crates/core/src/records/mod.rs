//! Shared plumbing for locally stored, cloud-syncable record collections.

mod record_store;
mod record_traits;

pub use record_store::{RecordService, RecordStore};
pub use record_traits::{RecordRepositoryTrait, SyncRecord};

#[cfg(test)]
pub(crate) mod test_support;
