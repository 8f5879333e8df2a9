use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::warn;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use dhanrakshak_core::errors::Result;
use dhanrakshak_core::settings::{SettingsRepositoryTrait, UserSettings};

const DARK_MODE: &str = "dark_mode";
const CURRENCY: &str = "currency";
const LANGUAGE: &str = "language";
const NOTIFICATIONS: &str = "notifications";
const BIOMETRIC_LOCK: &str = "biometric_lock";
const MONTHLY_BUDGET: &str = "monthly_budget";
const SAVINGS_GOAL_PERCENTAGE: &str = "savings_goal_percentage";

fn parse_or<T: std::str::FromStr>(key: &str, value: &str, fallback: T) -> T {
    value.parse().unwrap_or_else(|_| {
        warn!("Ignoring unparsable setting {}={}", key, value);
        fallback
    })
}

/// Stored settings, `None` when no setting row exists yet.
pub(crate) fn load_settings(conn: &mut SqliteConnection) -> Result<Option<UserSettings>> {
    let rows: Vec<(String, String)> = app_settings
        .select((setting_key, setting_value))
        .load::<(String, String)>(conn)
        .map_err(StorageError::from)?;

    if rows.is_empty() {
        return Ok(None);
    }

    let mut settings = UserSettings::default();
    for (key, value) in rows {
        match key.as_str() {
            DARK_MODE => settings.dark_mode = parse_or(&key, &value, settings.dark_mode),
            CURRENCY => settings.currency = value,
            LANGUAGE => settings.language = value,
            NOTIFICATIONS => {
                settings.notifications = parse_or(&key, &value, settings.notifications)
            }
            BIOMETRIC_LOCK => {
                settings.biometric_lock = parse_or(&key, &value, settings.biometric_lock)
            }
            MONTHLY_BUDGET => {
                settings.monthly_budget = parse_or(&key, &value, settings.monthly_budget)
            }
            SAVINGS_GOAL_PERCENTAGE => {
                settings.savings_goal_percentage =
                    parse_or(&key, &value, settings.savings_goal_percentage)
            }
            _ => {} // Ignore unknown settings
        }
    }

    Ok(Some(settings))
}

pub(crate) fn save_settings_rows(conn: &mut SqliteConnection, settings: &UserSettings) -> Result<()> {
    let rows = [
        (DARK_MODE, settings.dark_mode.to_string()),
        (CURRENCY, settings.currency.clone()),
        (LANGUAGE, settings.language.clone()),
        (NOTIFICATIONS, settings.notifications.to_string()),
        (BIOMETRIC_LOCK, settings.biometric_lock.to_string()),
        (MONTHLY_BUDGET, settings.monthly_budget.to_string()),
        (
            SAVINGS_GOAL_PERCENTAGE,
            settings.savings_goal_percentage.to_string(),
        ),
    ];

    for (key, value) in rows {
        diesel::replace_into(app_settings)
            .values(&AppSettingDB {
                setting_key: key.to_string(),
                setting_value: value,
            })
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(())
}

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Option<UserSettings>> {
        let mut conn = get_connection(&self.pool)?;
        load_settings(&mut conn)
    }

    async fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        let settings = settings.clone();
        self.writer
            .exec(move |conn| save_settings_rows(conn, &settings))
            .await
    }
}
