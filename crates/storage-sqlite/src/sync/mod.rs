//! Whole-database snapshot operations and the persisted sync state.

mod snapshot_repository;
mod sync_state_store;

pub use snapshot_repository::SnapshotRepository;
pub use sync_state_store::{FileSyncStateStore, SYNC_STATE_FILE};
