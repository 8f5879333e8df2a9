use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::cloud_sync_service::SyncCollections;
use super::sync_model::DataExport;
use super::sync_traits::LocalSnapshotRepositoryTrait;
use crate::errors::Result;
use crate::settings::SettingsServiceTrait;
use crate::utils::time_utils::Clock;

/// Backup and restore of all local data as a single JSON document.
#[async_trait]
pub trait DataTransferServiceTrait: Send + Sync {
    fn export_data(&self) -> Result<DataExport>;

    /// Replace every local collection, settings included, with `data`.
    async fn import_data(&self, data: DataExport) -> Result<()>;
}

pub struct DataTransferService {
    snapshot_repository: Arc<dyn LocalSnapshotRepositoryTrait>,
    collections: SyncCollections,
    settings_service: Arc<dyn SettingsServiceTrait>,
    clock: Arc<dyn Clock>,
}

impl DataTransferService {
    pub fn new(
        snapshot_repository: Arc<dyn LocalSnapshotRepositoryTrait>,
        collections: SyncCollections,
        settings_service: Arc<dyn SettingsServiceTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            snapshot_repository,
            collections,
            settings_service,
            clock,
        }
    }
}

#[async_trait]
impl DataTransferServiceTrait for DataTransferService {
    fn export_data(&self) -> Result<DataExport> {
        let snapshot = self.snapshot_repository.export()?;
        Ok(DataExport {
            snapshot,
            exported_at: self.clock.now_millis(),
        })
    }

    async fn import_data(&self, data: DataExport) -> Result<()> {
        info!(
            "Importing data exported at {} ({} assets)",
            data.exported_at,
            data.snapshot.assets.len()
        );
        self.snapshot_repository.import(data.snapshot).await?;
        for collection in self.collections.all() {
            collection.reload().await?;
        }
        self.settings_service.load_settings().await?;
        Ok(())
    }
}
