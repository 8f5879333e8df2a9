use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::REMINDERS_COLLECTION;
use crate::errors::{Error, ValidationError};
use crate::records::SyncRecord;

/// Category marking a reminder as a bill payment.
pub const BILL_CATEGORY: &str = "BILL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderFrequency {
    Once,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ReminderFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderFrequency::Once => "ONCE",
            ReminderFrequency::Daily => "DAILY",
            ReminderFrequency::Weekly => "WEEKLY",
            ReminderFrequency::Monthly => "MONTHLY",
            ReminderFrequency::Yearly => "YEARLY",
        }
    }
}

impl FromStr for ReminderFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONCE" => Ok(ReminderFrequency::Once),
            "DAILY" => Ok(ReminderFrequency::Daily),
            "WEEKLY" => Ok(ReminderFrequency::Weekly),
            "MONTHLY" => Ok(ReminderFrequency::Monthly),
            "YEARLY" => Ok(ReminderFrequency::Yearly),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown reminder frequency: {}",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub reminder_time: i64,
    pub frequency: ReminderFrequency,
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered: Option<i64>,
    pub created_at: i64,
}

impl Reminder {
    pub fn is_bill(&self) -> bool {
        self.category == BILL_CATEGORY
    }
}

impl SyncRecord for Reminder {
    const COLLECTION: &'static str = REMINDERS_COLLECTION;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub amount: Option<f64>,
    pub reminder_time: i64,
    pub frequency: ReminderFrequency,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}
