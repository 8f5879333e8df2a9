//! Database model for reminders.

use diesel::prelude::*;
use std::str::FromStr;

use dhanrakshak_core::reminders::{Reminder, ReminderFrequency};
use dhanrakshak_core::Error;

#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reminders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ReminderDB {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub amount: Option<f64>,
    pub reminder_time: i64,
    pub frequency: String,
    pub is_enabled: bool,
    pub last_triggered: Option<i64>,
    pub created_at: i64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::reminders)]
pub struct NewReminderDB {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub amount: Option<f64>,
    pub reminder_time: i64,
    pub frequency: String,
    pub is_enabled: bool,
    pub last_triggered: Option<i64>,
    pub created_at: i64,
}

impl TryFrom<ReminderDB> for Reminder {
    type Error = Error;

    fn try_from(db: ReminderDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(db.id),
            title: db.title,
            description: db.description,
            category: db.category,
            amount: db.amount,
            reminder_time: db.reminder_time,
            frequency: ReminderFrequency::from_str(&db.frequency)?,
            is_enabled: db.is_enabled,
            last_triggered: db.last_triggered,
            created_at: db.created_at,
        })
    }
}

impl From<Reminder> for NewReminderDB {
    fn from(domain: Reminder) -> Self {
        Self {
            id: domain.id,
            title: domain.title,
            description: domain.description,
            category: domain.category,
            amount: domain.amount,
            reminder_time: domain.reminder_time,
            frequency: domain.frequency.as_str().to_string(),
            is_enabled: domain.is_enabled,
            last_triggered: domain.last_triggered,
            created_at: domain.created_at,
        }
    }
}

impl ReminderDB {
    pub fn from_domain(id: i64, domain: Reminder) -> Self {
        Self {
            id,
            title: domain.title,
            description: domain.description,
            category: domain.category,
            amount: domain.amount,
            reminder_time: domain.reminder_time,
            frequency: domain.frequency.as_str().to_string(),
            is_enabled: domain.is_enabled,
            last_triggered: domain.last_triggered,
            created_at: domain.created_at,
        }
    }
}
