use std::sync::Arc;

use async_trait::async_trait;

use super::reminders_model::{NewReminder, Reminder, ReminderFrequency};
use crate::constants::DAY_MILLIS;
use crate::errors::{DatabaseError, Error, Result};
use crate::records::{RecordRepositoryTrait, RecordService, RecordStore};
use crate::utils::time_utils::Clock;

const UPCOMING_WINDOW_DAYS: i64 = 7;

#[async_trait]
pub trait ReminderServiceTrait: Send + Sync {
    fn load_reminders(&self) -> Result<()>;
    fn get_reminders(&self) -> Vec<Reminder>;
    fn get_active_reminders(&self) -> Vec<Reminder>;
    /// Enabled reminders due within the next seven days, soonest first.
    fn get_upcoming_reminders(&self) -> Vec<Reminder>;
    /// Enabled one-off reminders whose time has passed.
    fn get_overdue_reminders(&self) -> Vec<Reminder>;
    fn get_bill_reminders(&self) -> Vec<Reminder>;
    /// Sum of amounts over enabled bill reminders.
    fn get_monthly_bills_total(&self) -> f64;
    async fn create_reminder(&self, new_reminder: NewReminder) -> Result<Reminder>;
    async fn update_reminder(&self, reminder: Reminder) -> Result<Reminder>;
    async fn toggle_reminder(&self, reminder_id: i64) -> Result<Reminder>;
    async fn delete_reminder(&self, reminder_id: i64) -> Result<usize>;
}

pub struct ReminderService {
    store: RecordStore<Reminder>,
    clock: Arc<dyn Clock>,
}

impl ReminderService {
    pub fn new(
        repository: Arc<dyn RecordRepositoryTrait<Reminder>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store: RecordStore::new(repository),
            clock,
        }
    }
}

impl RecordService for ReminderService {
    type Record = Reminder;

    fn record_store(&self) -> &RecordStore<Reminder> {
        &self.store
    }
}

#[async_trait]
impl ReminderServiceTrait for ReminderService {
    fn load_reminders(&self) -> Result<()> {
        self.store.load()
    }

    fn get_reminders(&self) -> Vec<Reminder> {
        self.store.list()
    }

    fn get_active_reminders(&self) -> Vec<Reminder> {
        self.store
            .list()
            .into_iter()
            .filter(|r| r.is_enabled)
            .collect()
    }

    fn get_upcoming_reminders(&self) -> Vec<Reminder> {
        let now = self.clock.now_millis();
        let horizon = now + UPCOMING_WINDOW_DAYS * DAY_MILLIS;
        let mut reminders: Vec<Reminder> = self
            .get_active_reminders()
            .into_iter()
            .filter(|r| r.reminder_time > now && r.reminder_time <= horizon)
            .collect();
        reminders.sort_by_key(|r| r.reminder_time);
        reminders
    }

    fn get_overdue_reminders(&self) -> Vec<Reminder> {
        let now = self.clock.now_millis();
        let mut reminders: Vec<Reminder> = self
            .get_active_reminders()
            .into_iter()
            .filter(|r| r.reminder_time < now && r.frequency == ReminderFrequency::Once)
            .collect();
        reminders.sort_by_key(|r| r.reminder_time);
        reminders
    }

    fn get_bill_reminders(&self) -> Vec<Reminder> {
        self.store
            .list()
            .into_iter()
            .filter(Reminder::is_bill)
            .collect()
    }

    fn get_monthly_bills_total(&self) -> f64 {
        self.get_bill_reminders()
            .iter()
            .filter(|r| r.is_enabled)
            .map(|r| r.amount.unwrap_or(0.0))
            .sum()
    }

    async fn create_reminder(&self, new_reminder: NewReminder) -> Result<Reminder> {
        let reminder = Reminder {
            id: None,
            title: new_reminder.title,
            description: new_reminder.description,
            category: new_reminder.category,
            amount: new_reminder.amount,
            reminder_time: new_reminder.reminder_time,
            frequency: new_reminder.frequency,
            is_enabled: new_reminder.is_enabled,
            last_triggered: None,
            created_at: self.clock.now_millis(),
        };
        self.store.create(reminder).await
    }

    async fn update_reminder(&self, reminder: Reminder) -> Result<Reminder> {
        self.store.update(reminder).await
    }

    async fn toggle_reminder(&self, reminder_id: i64) -> Result<Reminder> {
        let mut reminder = self.store.find(reminder_id).ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!("Reminder {}", reminder_id)))
        })?;
        reminder.is_enabled = !reminder.is_enabled;
        self.store.update(reminder).await
    }

    async fn delete_reminder(&self, reminder_id: i64) -> Result<usize> {
        self.store.delete(reminder_id).await
    }
}
