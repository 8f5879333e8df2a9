//! DhanRakshak Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the personal-finance tracker:
//! the record services, the CAS statement parser, the cloud sync engine and
//! the market price refresh. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` and `cloud-sync` crates.

pub mod assets;
pub mod auth;
pub mod cas;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod market_data;
pub mod records;
pub mod reminders;
pub mod settings;
pub mod sync;
pub mod transactions;
pub mod trips;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
