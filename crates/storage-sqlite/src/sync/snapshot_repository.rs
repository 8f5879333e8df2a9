use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use log::info;
use std::sync::Arc;

use dhanrakshak_core::errors::Result;
use dhanrakshak_core::sync::{LocalSnapshot, LocalSnapshotRepositoryTrait};

use crate::assets::{clear_assets, insert_asset_rows, load_assets};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::goals::{clear_goals, insert_goal_rows, load_goals};
use crate::reminders::{clear_reminders, insert_reminder_rows, load_reminders};
use crate::settings::{load_settings, save_settings_rows};
use crate::transactions::{clear_transactions, insert_transaction_rows, load_transactions};
use crate::trips::{clear_trips, insert_trip_rows, load_trips};

/// Clears the five record tables and refills them from `snapshot`.
/// Runs on the writer connection, inside the job's transaction.
fn replace_records(conn: &mut SqliteConnection, snapshot: LocalSnapshot) -> Result<usize> {
    clear_assets(conn)?;
    clear_transactions(conn)?;
    clear_goals(conn)?;
    clear_trips(conn)?;
    clear_reminders(conn)?;

    let mut inserted = insert_asset_rows(conn, snapshot.assets)?;
    inserted += insert_transaction_rows(conn, snapshot.transactions)?;
    inserted += insert_goal_rows(conn, snapshot.goals)?;
    inserted += insert_trip_rows(conn, snapshot.trips)?;
    inserted += insert_reminder_rows(conn, snapshot.reminders)?;
    Ok(inserted)
}

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl LocalSnapshotRepositoryTrait for SnapshotRepository {
    async fn replace_all(&self, snapshot: LocalSnapshot) -> Result<()> {
        let inserted = self
            .writer
            .exec(move |conn| replace_records(conn, snapshot))
            .await?;
        info!("Replaced local records with {} downloaded rows", inserted);
        Ok(())
    }

    fn export(&self) -> Result<LocalSnapshot> {
        let mut conn = get_connection(&self.pool)?;
        Ok(LocalSnapshot {
            assets: load_assets(&mut conn)?,
            transactions: load_transactions(&mut conn)?,
            goals: load_goals(&mut conn)?,
            trips: load_trips(&mut conn)?,
            reminders: load_reminders(&mut conn)?,
            settings: load_settings(&mut conn)?,
        })
    }

    async fn import(&self, mut snapshot: LocalSnapshot) -> Result<()> {
        let settings = snapshot.settings.take();
        let inserted = self
            .writer
            .exec(move |conn| {
                let inserted = replace_records(conn, snapshot)?;
                if let Some(settings) = settings {
                    save_settings_rows(conn, &settings)?;
                }
                Ok(inserted)
            })
            .await?;
        info!("Imported {} rows", inserted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetRepository;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use crate::settings::SettingsRepository;
    use dhanrakshak_core::assets::{Asset, AssetType};
    use dhanrakshak_core::records::RecordRepositoryTrait;
    use dhanrakshak_core::settings::{SettingsRepositoryTrait, UserSettings};
    use dhanrakshak_core::transactions::{Transaction, TransactionType};
    use tempfile::tempdir;

    async fn setup() -> (Arc<DbPool>, WriteHandle, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (pool, writer, temp_dir)
    }

    fn asset(id: Option<i64>, name: &str) -> Asset {
        Asset {
            id,
            name: name.to_string(),
            symbol: None,
            asset_type: AssetType::Stock,
            quantity: 10.0,
            buy_price: 100.0,
            current_price: 120.0,
            purchase_date: None,
            created_at: 1_700_000_000_000,
            updated_at: None,
        }
    }

    fn transaction(id: i64) -> Transaction {
        Transaction {
            id: Some(id),
            amount: 2500.0,
            transaction_type: TransactionType::Debit,
            category: "Food".to_string(),
            description: "Groceries".to_string(),
            date: 1_700_000_000_000,
            asset_id: None,
            created_at: 1_700_000_000_000,
        }
    }

    #[tokio::test]
    async fn test_asset_repository_crud() {
        let (pool, writer, _dir) = setup().await;
        let repo = AssetRepository::new(pool, writer);

        let created = repo.insert(asset(Some(99), "Infosys")).await.unwrap();
        let id = created.id.expect("store assigns an id");

        let mut changed = created.clone();
        changed.current_price = 150.0;
        repo.update(changed).await.unwrap();
        assert_eq!(repo.get_by_id(id).unwrap().current_price, 150.0);

        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert!(repo.list().unwrap().is_empty());
        assert!(repo.get_by_id(id).is_err());
    }

    #[tokio::test]
    async fn test_replace_all_keeps_ids_and_drops_old_rows() {
        let (pool, writer, _dir) = setup().await;
        let assets = AssetRepository::new(pool.clone(), writer.clone());
        assets.insert(asset(None, "Old")).await.unwrap();

        let repo = SnapshotRepository::new(pool, writer);
        repo.replace_all(LocalSnapshot {
            assets: vec![asset(Some(7), "Gold ETF"), asset(Some(12), "Nifty Index")],
            transactions: vec![transaction(3)],
            ..LocalSnapshot::default()
        })
        .await
        .unwrap();

        let exported = repo.export().unwrap();
        let ids: Vec<_> = exported.assets.iter().filter_map(|a| a.id).collect();
        assert_eq!(ids, vec![7, 12]);
        assert_eq!(exported.transactions.len(), 1);
        assert_eq!(exported.transactions[0].id, Some(3));
        assert!(exported.goals.is_empty());
        assert!(exported.settings.is_none());
    }

    #[tokio::test]
    async fn test_replace_all_rolls_back_on_failure() {
        let (pool, writer, _dir) = setup().await;
        let assets = AssetRepository::new(pool.clone(), writer.clone());
        assets.insert(asset(None, "Kept")).await.unwrap();

        let repo = SnapshotRepository::new(pool, writer);
        let result = repo
            .replace_all(LocalSnapshot {
                assets: vec![asset(Some(5), "First"), asset(Some(5), "Duplicate")],
                ..LocalSnapshot::default()
            })
            .await;

        assert!(result.is_err());
        let names: Vec<_> = assets.list().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Kept".to_string()]);
    }

    #[tokio::test]
    async fn test_import_overwrites_settings() {
        let (pool, writer, _dir) = setup().await;
        let settings_repo = SettingsRepository::new(pool.clone(), writer.clone());
        assert!(settings_repo.get_settings().unwrap().is_none());

        let settings = UserSettings {
            dark_mode: false,
            monthly_budget: 75_000.0,
            ..UserSettings::default()
        };
        let repo = SnapshotRepository::new(pool, writer);
        repo.import(LocalSnapshot {
            assets: vec![asset(Some(1), "Imported")],
            settings: Some(settings.clone()),
            ..LocalSnapshot::default()
        })
        .await
        .unwrap();

        assert_eq!(settings_repo.get_settings().unwrap(), Some(settings));
        assert_eq!(repo.export().unwrap().assets.len(), 1);
    }
}
