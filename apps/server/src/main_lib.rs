use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use dhanrakshak_cloud_sync::{FirestoreClient, SessionAuthProvider};
use dhanrakshak_core::{
    assets::{AssetService, AssetServiceTrait},
    auth::AuthProviderTrait,
    goals::{GoalService, GoalServiceTrait},
    market_data::{NavCache, PriceRefreshService, PriceRefreshServiceTrait},
    reminders::{ReminderService, ReminderServiceTrait},
    settings::{SettingsService, SettingsServiceTrait},
    sync::{
        CloudSyncService, CloudSyncServiceTrait, DataTransferService, DataTransferServiceTrait,
        LocalSnapshotRepositoryTrait, SyncCollections,
    },
    transactions::{TransactionService, TransactionServiceTrait},
    trips::{TripService, TripServiceTrait},
    utils::time_utils::{Clock, SystemClock},
};
use dhanrakshak_market_data::AmfiNavProvider;
use dhanrakshak_storage_sqlite::{
    assets::AssetRepository,
    db::{self, write_actor},
    goals::GoalRepository,
    reminders::ReminderRepository,
    settings::SettingsRepository,
    sync::{FileSyncStateStore, SnapshotRepository},
    transactions::TransactionRepository,
    trips::TripRepository,
};

pub struct AppState {
    pub asset_service: Arc<dyn AssetServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub trip_service: Arc<dyn TripServiceTrait>,
    pub reminder_service: Arc<dyn ReminderServiceTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub session: Arc<SessionAuthProvider>,
    /// `None` when no Firestore project is configured.
    pub cloud_sync_service: Option<Arc<dyn CloudSyncServiceTrait>>,
    pub data_transfer_service: Arc<dyn DataTransferServiceTrait>,
    pub nav_cache: Arc<NavCache>,
    pub price_refresh_service: Arc<dyn PriceRefreshServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("DR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let settings_repo = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));
    let settings_service = Arc::new(SettingsService::new(settings_repo));
    let settings = settings_service.load_settings().await?;
    tracing::debug!("Loaded settings (currency {})", settings.currency);

    let asset_repository = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));
    let asset_service = Arc::new(AssetService::new(asset_repository, clock.clone()));
    asset_service.load_assets()?;

    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository,
        clock.clone(),
    ));
    transaction_service.load_transactions()?;

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let goal_service = Arc::new(GoalService::new(goal_repository, clock.clone()));
    goal_service.load_goals()?;

    let trip_repository = Arc::new(TripRepository::new(pool.clone(), writer.clone()));
    let trip_service = Arc::new(TripService::new(trip_repository, clock.clone()));
    trip_service.load_trips()?;

    let reminder_repository = Arc::new(ReminderRepository::new(pool.clone(), writer.clone()));
    let reminder_service = Arc::new(ReminderService::new(reminder_repository, clock.clone()));
    reminder_service.load_reminders()?;

    let collections = SyncCollections {
        assets: asset_service.clone(),
        transactions: transaction_service.clone(),
        goals: goal_service.clone(),
        trips: trip_service.clone(),
        reminders: reminder_service.clone(),
    };

    let snapshot_repository: Arc<dyn LocalSnapshotRepositoryTrait> =
        Arc::new(SnapshotRepository::new(pool.clone(), writer.clone()));
    let data_transfer_service = Arc::new(DataTransferService::new(
        snapshot_repository.clone(),
        collections.clone(),
        settings_service.clone(),
        clock.clone(),
    ));

    let session = Arc::new(SessionAuthProvider::new());
    let auth: Arc<dyn AuthProviderTrait> = session.clone();

    let cloud_sync_service: Option<Arc<dyn CloudSyncServiceTrait>> =
        match &config.firestore_project_id {
            Some(project_id) => {
                let remote = Arc::new(FirestoreClient::new(
                    &config.firestore_base_url,
                    project_id,
                    auth.clone(),
                )?);
                let service = CloudSyncService::new(
                    remote,
                    auth.clone(),
                    Arc::new(FileSyncStateStore::beside_database(&db_path)),
                    snapshot_repository,
                    collections,
                    settings_service.clone(),
                    clock.clone(),
                );
                service.init_sync()?;
                tracing::info!("Cloud sync enabled for project {}", project_id);
                Some(Arc::new(service))
            }
            None => {
                tracing::info!("Cloud sync disabled: DR_FIRESTORE_PROJECT_ID is not set");
                None
            }
        };

    let nav_cache = Arc::new(NavCache::with_ttl_secs(
        Arc::new(AmfiNavProvider::new()),
        clock.clone(),
        config.nav_cache_ttl_secs,
    ));
    let price_refresh_service = Arc::new(PriceRefreshService::new(
        asset_service.clone(),
        nav_cache.clone(),
        Vec::new(),
    ));

    Ok(Arc::new(AppState {
        asset_service,
        transaction_service,
        goal_service,
        trip_service,
        reminder_service,
        settings_service,
        session,
        cloud_sync_service,
        data_transfer_service,
        nav_cache,
        price_refresh_service,
    }))
}
