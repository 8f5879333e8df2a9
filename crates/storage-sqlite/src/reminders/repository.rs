use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use dhanrakshak_core::errors::{Error, Result, ValidationError};
use dhanrakshak_core::records::RecordRepositoryTrait;
use dhanrakshak_core::reminders::Reminder;

use super::model::{ReminderDB, NewReminderDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::reminders;

pub(crate) fn load_reminders(conn: &mut SqliteConnection) -> Result<Vec<Reminder>> {
    reminders::table
        .select(ReminderDB::as_select())
        .order(reminders::reminder_time.asc())
        .load::<ReminderDB>(conn)
        .map_err(StorageError::from)?
        .into_iter()
        .map(Reminder::try_from)
        .collect()
}

pub(crate) fn insert_reminder_rows(conn: &mut SqliteConnection, rows: Vec<Reminder>) -> Result<usize> {
    let mut inserted = 0;
    for row in rows {
        inserted += diesel::insert_into(reminders::table)
            .values(NewReminderDB::from(row))
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(inserted)
}

pub(crate) fn clear_reminders(conn: &mut SqliteConnection) -> Result<usize> {
    Ok(diesel::delete(reminders::table)
        .execute(conn)
        .map_err(StorageError::from)?)
}

pub struct ReminderRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ReminderRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RecordRepositoryTrait<Reminder> for ReminderRepository {
    fn list(&self) -> Result<Vec<Reminder>> {
        let mut conn = get_connection(&self.pool)?;
        load_reminders(&mut conn)
    }

    fn get_by_id(&self, reminder_id: i64) -> Result<Reminder> {
        let mut conn = get_connection(&self.pool)?;
        let row = reminders::table
            .select(ReminderDB::as_select())
            .find(reminder_id)
            .first::<ReminderDB>(&mut conn)
            .map_err(StorageError::from)?;
        Reminder::try_from(row)
    }

    async fn insert(&self, reminder: Reminder) -> Result<Reminder> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reminder> {
                let mut row = NewReminderDB::from(reminder);
                row.id = None;
                let created = diesel::insert_into(reminders::table)
                    .values(&row)
                    .returning(ReminderDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Reminder::try_from(created)
            })
            .await
    }

    async fn update(&self, reminder: Reminder) -> Result<Reminder> {
        let reminder_id = reminder
            .id
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("id".to_string())))?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reminder> {
                let row = ReminderDB::from_domain(reminder_id, reminder);
                let updated = diesel::update(reminders::table.find(reminder_id))
                    .set(&row)
                    .returning(ReminderDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Reminder::try_from(updated)
            })
            .await
    }

    async fn delete(&self, reminder_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(reminders::table.find(reminder_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn insert_many(&self, rows: Vec<Reminder>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_reminder_rows(conn, rows))
            .await
    }

    async fn clear(&self) -> Result<usize> {
        self.writer.exec(clear_reminders).await
    }
}
