//! Cloud sync of the local collections and local data export/import.

mod cloud_sync_service;
mod data_transfer_service;
mod sync_model;
mod sync_traits;

#[cfg(test)]
mod cloud_sync_service_tests;

pub use cloud_sync_service::{CloudSyncService, CloudSyncServiceTrait, SyncCollections};
pub use data_transfer_service::{DataTransferService, DataTransferServiceTrait};
pub use sync_model::*;
pub use sync_traits::*;
