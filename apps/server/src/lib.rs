//! DhanRakshak HTTP server: JSON API over the local store, CAS import,
//! cloud sync and market price refresh.

pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod scheduler;

pub use main_lib::{build_state, init_tracing, AppState};
