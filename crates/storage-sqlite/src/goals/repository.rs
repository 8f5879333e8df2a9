use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use dhanrakshak_core::errors::{Error, Result, ValidationError};
use dhanrakshak_core::goals::Goal;
use dhanrakshak_core::records::RecordRepositoryTrait;

use super::model::{GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::goals;

pub(crate) fn load_goals(conn: &mut SqliteConnection) -> Result<Vec<Goal>> {
    Ok(goals::table
        .select(GoalDB::as_select())
        .order(goals::id.asc())
        .load::<GoalDB>(conn)
        .map_err(StorageError::from)?
        .into_iter()
        .map(Goal::from)
        .collect())
}

pub(crate) fn insert_goal_rows(conn: &mut SqliteConnection, rows: Vec<Goal>) -> Result<usize> {
    let mut inserted = 0;
    for row in rows {
        inserted += diesel::insert_into(goals::table)
            .values(NewGoalDB::from(row))
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(inserted)
}

pub(crate) fn clear_goals(conn: &mut SqliteConnection) -> Result<usize> {
    Ok(diesel::delete(goals::table)
        .execute(conn)
        .map_err(StorageError::from)?)
}

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RecordRepositoryTrait<Goal> for GoalRepository {
    fn list(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        load_goals(&mut conn)
    }

    fn get_by_id(&self, goal_id: i64) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        let row = goals::table
            .select(GoalDB::as_select())
            .find(goal_id)
            .first::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Goal::from(row))
    }

    async fn insert(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let mut row = NewGoalDB::from(goal);
                row.id = None;
                let created = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(created))
            })
            .await
    }

    async fn update(&self, goal: Goal) -> Result<Goal> {
        let goal_id = goal
            .id
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("id".to_string())))?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let row = GoalDB::from_domain(goal_id, goal);
                let updated = diesel::update(goals::table.find(goal_id))
                    .set(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(updated))
            })
            .await
    }

    async fn delete(&self, goal_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(goals::table.find(goal_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn insert_many(&self, rows: Vec<Goal>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_goal_rows(conn, rows))
            .await
    }

    async fn clear(&self) -> Result<usize> {
        self.writer.exec(clear_goals).await
    }
}
