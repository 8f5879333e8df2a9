use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, error, info, warn};

use super::sync_model::{LocalSnapshot, RemoteDocument, SyncDocument, SyncStatus};
use super::sync_traits::{
    LocalSnapshotRepositoryTrait, RemoteStoreTrait, SyncCollectionTrait, SyncStateStoreTrait,
};
use crate::auth::{AuthProviderTrait, Identity};
use crate::assets::Asset;
use crate::constants::{ASSETS_COLLECTION, SETTINGS_COLLECTION, SETTINGS_DOCUMENT, USERS_ROOT};
use crate::errors::{Error, Result};
use crate::goals::Goal;
use crate::records::SyncRecord;
use crate::reminders::Reminder;
use crate::settings::{SettingsServiceTrait, UserSettings};
use crate::transactions::Transaction;
use crate::trips::Trip;
use crate::utils::time_utils::Clock;

const UPLOAD_NOT_AUTHENTICATED: &str = "Must be logged in to sync";
const DOWNLOAD_NOT_AUTHENTICATED: &str = "Must be logged in to download";
const UPLOAD_FAILED: &str = "Failed to sync to cloud";
const DOWNLOAD_FAILED: &str = "Failed to download from cloud";

/// The five record collections kept in sync.
#[derive(Clone)]
pub struct SyncCollections {
    pub assets: Arc<dyn SyncCollectionTrait>,
    pub transactions: Arc<dyn SyncCollectionTrait>,
    pub goals: Arc<dyn SyncCollectionTrait>,
    pub trips: Arc<dyn SyncCollectionTrait>,
    pub reminders: Arc<dyn SyncCollectionTrait>,
}

impl SyncCollections {
    pub(crate) fn all(&self) -> [&Arc<dyn SyncCollectionTrait>; 5] {
        [
            &self.assets,
            &self.transactions,
            &self.goals,
            &self.trips,
            &self.reminders,
        ]
    }
}

#[async_trait]
pub trait CloudSyncServiceTrait: Send + Sync {
    /// Restore the last sync time persisted by a previous run.
    fn init_sync(&self) -> Result<()>;

    fn status(&self) -> SyncStatus;

    fn set_auto_sync(&self, enabled: bool);

    /// Write every local record and the settings to the signed-in user's
    /// remote collections, overwriting documents with the same identifier.
    async fn upload_to_cloud(&self) -> Result<()>;

    /// Replace the local record collections with the remote ones.
    async fn download_from_cloud(&self) -> Result<()>;

    /// Remove one asset document remotely. Does nothing when signed out.
    async fn delete_asset_from_cloud(&self, asset_id: i64) -> Result<()>;
}

pub struct CloudSyncService {
    remote: Arc<dyn RemoteStoreTrait>,
    auth: Arc<dyn AuthProviderTrait>,
    state_store: Arc<dyn SyncStateStoreTrait>,
    snapshot_repository: Arc<dyn LocalSnapshotRepositoryTrait>,
    collections: SyncCollections,
    settings_service: Arc<dyn SettingsServiceTrait>,
    clock: Arc<dyn Clock>,
    status: RwLock<SyncStatus>,
}

fn collection_path(uid: &str, collection: &str) -> String {
    format!("{}/{}/{}", USERS_ROOT, uid, collection)
}

fn settings_path(uid: &str) -> String {
    format!(
        "{}/{}",
        collection_path(uid, SETTINGS_COLLECTION),
        SETTINGS_DOCUMENT
    )
}

/// Message shown to the user for a failed sync.
fn failure_message(err: &Error, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Decode remote documents into records, taking the identifier from the
/// document name when the body does not carry one.
fn decode_records<T: SyncRecord>(documents: Vec<RemoteDocument>) -> Result<Vec<T>> {
    documents
        .into_iter()
        .map(|doc| {
            let mut record: T = serde_json::from_value(doc.data)?;
            if record.id().is_none() {
                if let Ok(id) = doc.id.parse::<i64>() {
                    record.set_id(id);
                }
            }
            Ok(record)
        })
        .collect()
}

impl CloudSyncService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        remote: Arc<dyn RemoteStoreTrait>,
        auth: Arc<dyn AuthProviderTrait>,
        state_store: Arc<dyn SyncStateStoreTrait>,
        snapshot_repository: Arc<dyn LocalSnapshotRepositoryTrait>,
        collections: SyncCollections,
        settings_service: Arc<dyn SettingsServiceTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            remote,
            auth,
            state_store,
            snapshot_repository,
            collections,
            settings_service,
            clock,
            status: RwLock::new(SyncStatus {
                auto_sync: true,
                ..SyncStatus::default()
            }),
        }
    }

    fn update_status(&self, f: impl FnOnce(&mut SyncStatus)) {
        let mut status = self
            .status
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut status);
    }

    /// Identity for a sync run, or the not-authenticated error with the
    /// status message set.
    fn require_identity(&self, message: &str) -> Result<Identity> {
        match self.auth.current_identity() {
            Some(identity) => Ok(identity),
            None => {
                warn!("Sync requested without a signed-in user");
                self.update_status(|s| s.error = Some(message.to_string()));
                Err(Error::NotAuthenticated)
            }
        }
    }

    fn begin(&self) {
        self.update_status(|s| {
            s.syncing = true;
            s.error = None;
        });
    }

    fn finish(&self, outcome: &Result<()>, fallback: &str) {
        self.update_status(|s| {
            s.syncing = false;
            if let Err(err) = outcome {
                s.error = Some(failure_message(err, fallback));
            }
        });
    }

    fn record_sync_time(&self) -> Result<()> {
        let now = self.clock.now_millis();
        self.state_store.save_last_sync_time(now)?;
        self.update_status(|s| s.last_sync_time = Some(now));
        Ok(())
    }

    async fn run_upload(&self, uid: &str) -> Result<()> {
        let mut snapshots: Vec<(&'static str, Vec<SyncDocument>)> = Vec::with_capacity(5);
        for collection in self.collections.all() {
            snapshots.push((collection.collection_name(), collection.snapshot_documents()?));
        }
        let settings = serde_json::to_value(self.settings_service.get_settings())?;

        let mut uploads: FuturesUnordered<BoxFuture<'static, Result<usize>>> =
            FuturesUnordered::new();

        for (collection, documents) in snapshots {
            let remote = Arc::clone(&self.remote);
            let base = collection_path(uid, collection);
            uploads.push(Box::pin(async move {
                let mut written = 0;
                for document in documents {
                    let Some(id) = document.id else {
                        continue;
                    };
                    remote
                        .set_document(&format!("{}/{}", base, id), &document.data)
                        .await?;
                    written += 1;
                }
                debug!("Uploaded {} documents to {}", written, base);
                Ok(written)
            }));
        }

        let remote = Arc::clone(&self.remote);
        let path = settings_path(uid);
        uploads.push(Box::pin(async move {
            remote.set_document(&path, &settings).await?;
            Ok(1)
        }));

        let mut first_error: Option<Error> = None;
        let mut total = 0;
        while let Some(result) = uploads.next().await {
            match result {
                Ok(written) => total += written,
                Err(err) => {
                    error!("Cloud upload step failed: {}", err);
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }

        info!("Uploaded {} documents for user {}", total, uid);
        self.record_sync_time()
    }

    async fn fetch_records<T: SyncRecord>(&self, uid: &str) -> Result<Vec<T>> {
        let documents = self
            .remote
            .list_documents(&collection_path(uid, T::COLLECTION))
            .await?;
        decode_records(documents)
    }

    async fn fetch_settings(&self, uid: &str) -> Result<UserSettings> {
        match self.remote.get_document(&settings_path(uid)).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(UserSettings::default()),
        }
    }

    async fn run_download(&self, uid: &str) -> Result<()> {
        let (assets, transactions, goals, trips, reminders, settings) = futures::try_join!(
            self.fetch_records::<Asset>(uid),
            self.fetch_records::<Transaction>(uid),
            self.fetch_records::<Goal>(uid),
            self.fetch_records::<Trip>(uid),
            self.fetch_records::<Reminder>(uid),
            self.fetch_settings(uid),
        )?;

        let snapshot = LocalSnapshot {
            assets,
            transactions,
            goals,
            trips,
            reminders,
            settings: Some(settings),
        };
        info!(
            "Downloaded {} assets, {} transactions, {} goals, {} trips, {} reminders",
            snapshot.assets.len(),
            snapshot.transactions.len(),
            snapshot.goals.len(),
            snapshot.trips.len(),
            snapshot.reminders.len()
        );

        self.snapshot_repository.replace_all(snapshot).await?;

        for collection in self.collections.all() {
            collection.reload().await?;
        }

        self.record_sync_time()
    }
}

#[async_trait]
impl CloudSyncServiceTrait for CloudSyncService {
    fn init_sync(&self) -> Result<()> {
        let last_sync_time = self.state_store.load_last_sync_time()?;
        debug!("Restored last sync time: {:?}", last_sync_time);
        if last_sync_time.is_some() {
            self.update_status(|s| s.last_sync_time = last_sync_time);
        }
        Ok(())
    }

    fn status(&self) -> SyncStatus {
        self.status
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_auto_sync(&self, enabled: bool) {
        self.update_status(|s| s.auto_sync = enabled);
    }

    async fn upload_to_cloud(&self) -> Result<()> {
        let identity = self.require_identity(UPLOAD_NOT_AUTHENTICATED)?;
        self.begin();
        let outcome = self.run_upload(&identity.uid).await;
        self.finish(&outcome, UPLOAD_FAILED);
        outcome
    }

    async fn download_from_cloud(&self) -> Result<()> {
        let identity = self.require_identity(DOWNLOAD_NOT_AUTHENTICATED)?;
        self.begin();
        let outcome = self.run_download(&identity.uid).await;
        self.finish(&outcome, DOWNLOAD_FAILED);
        outcome
    }

    async fn delete_asset_from_cloud(&self, asset_id: i64) -> Result<()> {
        let Some(identity) = self.auth.current_identity() else {
            return Ok(());
        };
        let path = format!(
            "{}/{}",
            collection_path(&identity.uid, ASSETS_COLLECTION),
            asset_id
        );
        self.remote.delete_document(&path).await
    }
}
