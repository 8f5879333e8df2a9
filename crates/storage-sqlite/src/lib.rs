//! SQLite storage implementation for DhanRakshak.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `dhanrakshak-core` and contains:
//! - Database connection pooling and the single writer actor
//! - Embedded Diesel migrations
//! - Repository implementations for the five record collections and settings
//! - Whole-database snapshot replace/export/import
//!
//! ```text
//!  core (domain, traits)      cloud-sync (remote store)
//!          │
//!          ▼
//!  storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

pub mod assets;
pub mod goals;
pub mod reminders;
pub mod settings;
pub mod sync;
pub mod transactions;
pub mod trips;

pub use db::{
    create_pool, get_connection, init, open, run_migrations, DbConnection, DbPool, WriteHandle,
};

pub use errors::{IntoCore, StorageError};

pub use assets::AssetRepository;
pub use goals::GoalRepository;
pub use reminders::ReminderRepository;
pub use settings::SettingsRepository;
pub use sync::{FileSyncStateStore, SnapshotRepository};
pub use transactions::TransactionRepository;
pub use trips::TripRepository;

pub use dhanrakshak_core::errors::{DatabaseError, Error, Result};
