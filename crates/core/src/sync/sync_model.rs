use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::assets::Asset;
use crate::goals::Goal;
use crate::reminders::Reminder;
use crate::settings::UserSettings;
use crate::transactions::Transaction;
use crate::trips::Trip;

/// One local record ready to be written remotely.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncDocument {
    /// `None` for records that were never persisted locally.
    pub id: Option<i64>,
    pub data: Value,
}

/// A document read from a remote collection, keyed by its document name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDocument {
    pub id: String,
    pub data: Value,
}

/// Observable state of the sync engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub syncing: bool,
    pub last_sync_time: Option<i64>,
    pub error: Option<String>,
    pub auto_sync: bool,
}

/// Every locally owned collection at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalSnapshot {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    /// Read from either an object or a list of settings rows, of which the
    /// first is kept.
    #[serde(default, deserialize_with = "settings_object_or_rows")]
    pub settings: Option<UserSettings>,
}

fn settings_object_or_rows<'de, D>(deserializer: D) -> Result<Option<UserSettings>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SettingsField {
        Object(UserSettings),
        Rows(Vec<UserSettings>),
    }

    Ok(
        match Option::<SettingsField>::deserialize(deserializer)? {
            Some(SettingsField::Object(settings)) => Some(settings),
            Some(SettingsField::Rows(rows)) => rows.into_iter().next(),
            None => None,
        },
    )
}

/// Serialized form of a local data export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    #[serde(flatten)]
    pub snapshot: LocalSnapshot,
    pub exported_at: i64,
}
