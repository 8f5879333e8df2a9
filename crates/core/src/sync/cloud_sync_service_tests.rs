//! Unit tests for the cloud sync engine.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tokio::sync::watch;

use super::*;
use crate::assets::{Asset, AssetService, AssetServiceTrait, AssetType, NewAsset};
use crate::auth::{AuthProviderTrait, Identity};
use crate::errors::{Error, Result};
use crate::goals::{Goal, GoalService};
use crate::records::test_support::{FixedClock, InMemoryRepository};
use crate::records::RecordRepositoryTrait;
use crate::reminders::{Reminder, ReminderService};
use crate::settings::{SettingsRepositoryTrait, SettingsService, SettingsServiceTrait, UserSettings};
use crate::transactions::{Transaction, TransactionService, TransactionType};
use crate::trips::{Trip, TripService};
use crate::utils::time_utils::Clock;

// --- Mocks ---

#[derive(Default)]
struct MockRemoteStore {
    documents: Mutex<BTreeMap<String, Value>>,
    calls: AtomicUsize,
    failing_prefix: Mutex<Option<(String, String)>>,
    failing_path: Mutex<Option<(String, String)>>,
}

impl MockRemoteStore {
    fn fail_under(&self, prefix: &str, message: &str) {
        *self.failing_prefix.lock().unwrap() = Some((prefix.to_string(), message.to_string()));
    }

    fn fail_at(&self, path: &str, message: &str) {
        *self.failing_path.lock().unwrap() = Some((path.to_string(), message.to_string()));
    }

    fn check(&self, path: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((failing, message)) = self.failing_path.lock().unwrap().as_ref() {
            if path == failing {
                return Err(Error::Remote(message.clone()));
            }
        }
        if let Some((prefix, message)) = self.failing_prefix.lock().unwrap().as_ref() {
            if path.starts_with(prefix.as_str()) {
                return Err(Error::Remote(message.clone()));
            }
        }
        Ok(())
    }

    fn put(&self, path: &str, value: Value) {
        self.documents.lock().unwrap().insert(path.to_string(), value);
    }

    fn get(&self, path: &str) -> Option<Value> {
        self.documents.lock().unwrap().get(path).cloned()
    }

    fn paths(&self) -> Vec<String> {
        self.documents.lock().unwrap().keys().cloned().collect()
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStoreTrait for MockRemoteStore {
    async fn set_document(&self, path: &str, value: &Value) -> Result<()> {
        self.check(path)?;
        self.put(path, value.clone());
        Ok(())
    }

    async fn get_document(&self, path: &str) -> Result<Option<Value>> {
        self.check(path)?;
        Ok(self.get(path))
    }

    async fn list_documents(&self, collection_path: &str) -> Result<Vec<RemoteDocument>> {
        self.check(collection_path)?;
        let prefix = format!("{}/", collection_path);
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(path, data)| {
                let id = path.strip_prefix(&prefix)?;
                if id.contains('/') {
                    return None;
                }
                Some(RemoteDocument {
                    id: id.to_string(),
                    data: data.clone(),
                })
            })
            .collect())
    }

    async fn delete_document(&self, path: &str) -> Result<()> {
        self.check(path)?;
        self.documents.lock().unwrap().remove(path);
        Ok(())
    }
}

struct MockAuth {
    sender: watch::Sender<Option<Identity>>,
}

impl MockAuth {
    fn signed_in(uid: &str) -> Self {
        let (sender, _) = watch::channel(Some(Identity {
            uid: uid.to_string(),
            email: None,
            display_name: None,
            id_token: None,
        }));
        Self { sender }
    }

    fn signed_out() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }
}

impl AuthProviderTrait for MockAuth {
    fn current_identity(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}

#[derive(Default)]
struct MockStateStore {
    last: Mutex<Option<i64>>,
}

impl SyncStateStoreTrait for MockStateStore {
    fn load_last_sync_time(&self) -> Result<Option<i64>> {
        Ok(*self.last.lock().unwrap())
    }

    fn save_last_sync_time(&self, millis: i64) -> Result<()> {
        *self.last.lock().unwrap() = Some(millis);
        Ok(())
    }
}

#[derive(Default)]
struct MockSettingsRepository {
    stored: Mutex<Option<UserSettings>>,
}

#[async_trait]
impl SettingsRepositoryTrait for MockSettingsRepository {
    fn get_settings(&self) -> Result<Option<UserSettings>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        *self.stored.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

struct MockSnapshotRepository {
    assets: Arc<InMemoryRepository<Asset>>,
    transactions: Arc<InMemoryRepository<Transaction>>,
    goals: Arc<InMemoryRepository<Goal>>,
    trips: Arc<InMemoryRepository<Trip>>,
    reminders: Arc<InMemoryRepository<Reminder>>,
    settings: Arc<MockSettingsRepository>,
}

#[async_trait]
impl LocalSnapshotRepositoryTrait for MockSnapshotRepository {
    async fn replace_all(&self, snapshot: LocalSnapshot) -> Result<()> {
        self.assets.clear().await?;
        self.transactions.clear().await?;
        self.goals.clear().await?;
        self.trips.clear().await?;
        self.reminders.clear().await?;
        self.assets.insert_many(snapshot.assets).await?;
        self.transactions.insert_many(snapshot.transactions).await?;
        self.goals.insert_many(snapshot.goals).await?;
        self.trips.insert_many(snapshot.trips).await?;
        self.reminders.insert_many(snapshot.reminders).await?;
        Ok(())
    }

    fn export(&self) -> Result<LocalSnapshot> {
        Ok(LocalSnapshot {
            assets: self.assets.stored(),
            transactions: self.transactions.stored(),
            goals: self.goals.stored(),
            trips: self.trips.stored(),
            reminders: self.reminders.stored(),
            settings: self.settings.get_settings()?,
        })
    }

    async fn import(&self, snapshot: LocalSnapshot) -> Result<()> {
        let settings = snapshot.settings.clone();
        self.replace_all(snapshot).await?;
        if let Some(settings) = settings {
            self.settings.save_settings(&settings).await?;
        }
        Ok(())
    }
}

/// A collection holding one record that was never persisted.
struct UnsavedCollection;

#[async_trait]
impl SyncCollectionTrait for UnsavedCollection {
    fn collection_name(&self) -> &'static str {
        "goals"
    }

    fn snapshot_documents(&self) -> Result<Vec<SyncDocument>> {
        Ok(vec![
            SyncDocument {
                id: None,
                data: json!({"name": "draft"}),
            },
            SyncDocument {
                id: Some(4),
                data: json!({"name": "saved"}),
            },
        ])
    }

    async fn reload(&self) -> Result<()> {
        Ok(())
    }
}

// --- Fixture ---

const UID: &str = "user-1";

struct Fixture {
    remote: Arc<MockRemoteStore>,
    state: Arc<MockStateStore>,
    asset_repo: Arc<InMemoryRepository<Asset>>,
    assets: Arc<AssetService>,
    collections: SyncCollections,
    snapshot_repo: Arc<MockSnapshotRepository>,
    settings: Arc<SettingsService>,
    clock: Arc<FixedClock>,
}

impl Fixture {
    fn new() -> Self {
        let clock = Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap()));
        let asset_repo = Arc::new(InMemoryRepository::<Asset>::new());
        let transaction_repo = Arc::new(InMemoryRepository::<Transaction>::new());
        let goal_repo = Arc::new(InMemoryRepository::<Goal>::new());
        let trip_repo = Arc::new(InMemoryRepository::<Trip>::new());
        let reminder_repo = Arc::new(InMemoryRepository::<Reminder>::new());
        let settings_repo = Arc::new(MockSettingsRepository::default());

        let assets = Arc::new(AssetService::new(asset_repo.clone(), clock.clone()));
        let collections = SyncCollections {
            assets: assets.clone(),
            transactions: Arc::new(TransactionService::new(transaction_repo.clone(), clock.clone())),
            goals: Arc::new(GoalService::new(goal_repo.clone(), clock.clone())),
            trips: Arc::new(TripService::new(trip_repo.clone(), clock.clone())),
            reminders: Arc::new(ReminderService::new(reminder_repo.clone(), clock.clone())),
        };
        let snapshot_repo = Arc::new(MockSnapshotRepository {
            assets: asset_repo.clone(),
            transactions: transaction_repo,
            goals: goal_repo,
            trips: trip_repo,
            reminders: reminder_repo,
            settings: settings_repo.clone(),
        });

        Self {
            remote: Arc::new(MockRemoteStore::default()),
            state: Arc::new(MockStateStore::default()),
            asset_repo,
            assets,
            collections,
            snapshot_repo,
            settings: Arc::new(SettingsService::new(settings_repo)),
            clock,
        }
    }

    fn service(&self, auth: MockAuth) -> CloudSyncService {
        CloudSyncService::new(
            self.remote.clone(),
            Arc::new(auth),
            self.state.clone(),
            self.snapshot_repo.clone(),
            self.collections.clone(),
            self.settings.clone(),
            self.clock.clone(),
        )
    }

    async fn add_asset(&self, name: &str) -> Asset {
        self.assets
            .create_asset(NewAsset {
                name: name.to_string(),
                symbol: None,
                asset_type: AssetType::Gold,
                quantity: 2.0,
                buy_price: 5000.0,
                current_price: 6000.0,
                purchase_date: None,
            })
            .await
            .unwrap()
    }
}

fn remote_asset(name: &str) -> Value {
    json!({
        "name": name,
        "type": "STOCK",
        "quantity": 1.0,
        "buyPrice": 100.0,
        "currentPrice": 110.0,
        "createdAt": 1
    })
}

// --- Tests ---

#[tokio::test]
async fn test_upload_requires_identity() {
    let fixture = Fixture::new();
    fixture.add_asset("Gold coin").await;
    let service = fixture.service(MockAuth::signed_out());

    let result = service.upload_to_cloud().await;

    assert!(matches!(result, Err(Error::NotAuthenticated)));
    assert_eq!(fixture.remote.calls(), 0);
    let status = service.status();
    assert_eq!(status.error.as_deref(), Some("Must be logged in to sync"));
    assert!(!status.syncing);
    assert_eq!(status.last_sync_time, None);
}

#[tokio::test]
async fn test_download_requires_identity() {
    let fixture = Fixture::new();
    let service = fixture.service(MockAuth::signed_out());

    assert!(matches!(
        service.download_from_cloud().await,
        Err(Error::NotAuthenticated)
    ));
    assert_eq!(fixture.remote.calls(), 0);
    assert_eq!(
        service.status().error.as_deref(),
        Some("Must be logged in to download")
    );
}

#[tokio::test]
async fn test_upload_writes_records_and_settings() {
    let fixture = Fixture::new();
    let first = fixture.add_asset("Gold coin").await;
    let second = fixture.add_asset("Gold bar").await;
    fixture.settings.load_settings().await.unwrap();
    let service = fixture.service(MockAuth::signed_in(UID));

    service.upload_to_cloud().await.unwrap();

    let first_path = format!("users/{}/assets/{}", UID, first.id.unwrap());
    let second_path = format!("users/{}/assets/{}", UID, second.id.unwrap());
    assert_eq!(fixture.remote.get(&first_path).unwrap()["name"], "Gold coin");
    assert_eq!(fixture.remote.get(&second_path).unwrap()["name"], "Gold bar");

    let settings = fixture
        .remote
        .get(&format!("users/{}/settings/preferences", UID))
        .unwrap();
    assert_eq!(settings["currency"], "INR");

    let now = fixture.clock.now_millis();
    let status = service.status();
    assert_eq!(status.last_sync_time, Some(now));
    assert_eq!(status.error, None);
    assert!(!status.syncing);
    assert_eq!(*fixture.state.last.lock().unwrap(), Some(now));
}

#[tokio::test]
async fn test_upload_skips_records_without_id() {
    let fixture = Fixture::new();
    let mut collections = fixture.collections.clone();
    collections.goals = Arc::new(UnsavedCollection);
    let service = CloudSyncService::new(
        fixture.remote.clone(),
        Arc::new(MockAuth::signed_in(UID)),
        fixture.state.clone(),
        fixture.snapshot_repo.clone(),
        collections,
        fixture.settings.clone(),
        fixture.clock.clone(),
    );

    service.upload_to_cloud().await.unwrap();

    let goal_paths: Vec<String> = fixture
        .remote
        .paths()
        .into_iter()
        .filter(|p| p.contains("/goals/"))
        .collect();
    assert_eq!(goal_paths, vec![format!("users/{}/goals/4", UID)]);
}

#[tokio::test]
async fn test_upload_failure_keeps_sibling_writes() {
    let fixture = Fixture::new();
    let asset = fixture.add_asset("Gold coin").await;
    fixture
        .remote
        .fail_under(&format!("users/{}/settings", UID), "quota exceeded");
    let service = fixture.service(MockAuth::signed_in(UID));

    let result = service.upload_to_cloud().await;

    assert!(matches!(result, Err(Error::Remote(ref m)) if m == "quota exceeded"));
    assert!(fixture
        .remote
        .get(&format!("users/{}/assets/{}", UID, asset.id.unwrap()))
        .is_some());
    let status = service.status();
    assert_eq!(status.error.as_deref(), Some("quota exceeded"));
    assert_eq!(status.last_sync_time, None);
    assert!(!status.syncing);
}

#[tokio::test]
async fn test_upload_stops_collection_at_first_failed_write() {
    let fixture = Fixture::new();
    let first = fixture.add_asset("Gold coin").await;
    let second = fixture.add_asset("Gold bar").await;
    let third = fixture.add_asset("Gold chain").await;
    fixture
        .snapshot_repo
        .transactions
        .insert(Transaction {
            id: None,
            amount: 250.0,
            transaction_type: TransactionType::Debit,
            category: "Food".to_string(),
            description: "Lunch".to_string(),
            date: 5,
            asset_id: None,
            created_at: 5,
        })
        .await
        .unwrap();
    fixture.collections.transactions.reload().await.unwrap();
    fixture.settings.load_settings().await.unwrap();

    let asset_path = |asset: &Asset| format!("users/{}/assets/{}", UID, asset.id.unwrap());
    fixture.remote.fail_at(&asset_path(&second), "write rejected");
    let service = fixture.service(MockAuth::signed_in(UID));

    let result = service.upload_to_cloud().await;

    assert!(matches!(result, Err(Error::Remote(ref m)) if m == "write rejected"));
    assert!(fixture.remote.get(&asset_path(&first)).is_some());
    assert!(fixture.remote.get(&asset_path(&second)).is_none());
    assert!(fixture.remote.get(&asset_path(&third)).is_none());
    assert!(fixture
        .remote
        .get(&format!("users/{}/transactions/1", UID))
        .is_some());
    assert!(fixture
        .remote
        .get(&format!("users/{}/settings/preferences", UID))
        .is_some());

    let status = service.status();
    assert_eq!(status.error.as_deref(), Some("write rejected"));
    assert_eq!(status.last_sync_time, None);
    assert!(!status.syncing);
}

#[tokio::test]
async fn test_download_replaces_local_with_remote() {
    let fixture = Fixture::new();
    fixture.add_asset("Local only").await;
    fixture
        .remote
        .put(&format!("users/{}/assets/10", UID), remote_asset("Remote A"));
    fixture
        .remote
        .put(&format!("users/{}/assets/11", UID), remote_asset("Remote B"));
    fixture.remote.put(
        &format!("users/{}/transactions/3", UID),
        json!({
            "id": 3,
            "amount": 250.0,
            "type": "DEBIT",
            "category": "Food",
            "description": "Lunch",
            "date": 5,
            "createdAt": 5
        }),
    );
    let service = fixture.service(MockAuth::signed_in(UID));

    service.download_from_cloud().await.unwrap();

    let mut stored: Vec<(Option<i64>, String)> = fixture
        .asset_repo
        .stored()
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    stored.sort();
    assert_eq!(
        stored,
        vec![
            (Some(10), "Remote A".to_string()),
            (Some(11), "Remote B".to_string())
        ]
    );

    let in_memory = fixture.assets.get_assets();
    assert_eq!(in_memory.len(), 2);
    assert!(in_memory.iter().all(|a| a.name.starts_with("Remote")));

    let transactions = fixture.snapshot_repo.transactions.stored();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].amount, 250.0);

    let status = service.status();
    assert_eq!(status.last_sync_time, Some(fixture.clock.now_millis()));
    assert_eq!(status.error, None);
}

#[tokio::test]
async fn test_download_failure_leaves_local_data() {
    let fixture = Fixture::new();
    fixture.add_asset("Keep me").await;
    fixture.remote.fail_under(&format!("users/{}/trips", UID), "");
    let service = fixture.service(MockAuth::signed_in(UID));

    assert!(service.download_from_cloud().await.is_err());

    assert_eq!(fixture.asset_repo.stored().len(), 1);
    let status = service.status();
    assert_eq!(status.error.as_deref(), Some("Failed to download from cloud"));
    assert!(!status.syncing);
}

#[tokio::test]
async fn test_init_sync_restores_last_sync_time() {
    let fixture = Fixture::new();
    fixture.state.save_last_sync_time(1234).unwrap();
    let service = fixture.service(MockAuth::signed_out());

    service.init_sync().unwrap();

    let status = service.status();
    assert_eq!(status.last_sync_time, Some(1234));
    assert!(status.auto_sync);
}

#[tokio::test]
async fn test_delete_asset_from_cloud() {
    let fixture = Fixture::new();
    let path = format!("users/{}/assets/7", UID);
    fixture.remote.put(&path, remote_asset("Old"));

    fixture
        .service(MockAuth::signed_out())
        .delete_asset_from_cloud(7)
        .await
        .unwrap();
    assert!(fixture.remote.get(&path).is_some());

    fixture
        .service(MockAuth::signed_in(UID))
        .delete_asset_from_cloud(7)
        .await
        .unwrap();
    assert!(fixture.remote.get(&path).is_none());
}

#[tokio::test]
async fn test_export_and_import_round_trip_through_services() {
    let fixture = Fixture::new();
    fixture.add_asset("Gold coin").await;
    fixture.settings.load_settings().await.unwrap();
    let transfer = DataTransferService::new(
        fixture.snapshot_repo.clone(),
        fixture.collections.clone(),
        fixture.settings.clone(),
        fixture.clock.clone(),
    );

    let mut export = transfer.export_data().unwrap();
    assert_eq!(export.exported_at, fixture.clock.now_millis());
    assert_eq!(export.snapshot.assets.len(), 1);

    export.snapshot.assets[0].name = "Imported".to_string();
    if let Some(settings) = export.snapshot.settings.as_mut() {
        settings.currency = "USD".to_string();
    }
    transfer.import_data(export).await.unwrap();

    assert_eq!(fixture.assets.get_assets()[0].name, "Imported");
    assert_eq!(fixture.settings.get_settings().currency, "USD");
}
