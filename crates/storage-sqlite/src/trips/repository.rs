use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use dhanrakshak_core::errors::{Error, Result, ValidationError};
use dhanrakshak_core::records::RecordRepositoryTrait;
use dhanrakshak_core::trips::Trip;

use super::model::{TripDB, NewTripDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::trips;

pub(crate) fn load_trips(conn: &mut SqliteConnection) -> Result<Vec<Trip>> {
    Ok(trips::table
        .select(TripDB::as_select())
        .order(trips::start_date.asc())
        .load::<TripDB>(conn)
        .map_err(StorageError::from)?
        .into_iter()
        .map(Trip::from)
        .collect())
}

pub(crate) fn insert_trip_rows(conn: &mut SqliteConnection, rows: Vec<Trip>) -> Result<usize> {
    let mut inserted = 0;
    for row in rows {
        inserted += diesel::insert_into(trips::table)
            .values(NewTripDB::from(row))
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(inserted)
}

pub(crate) fn clear_trips(conn: &mut SqliteConnection) -> Result<usize> {
    Ok(diesel::delete(trips::table)
        .execute(conn)
        .map_err(StorageError::from)?)
}

pub struct TripRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TripRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RecordRepositoryTrait<Trip> for TripRepository {
    fn list(&self) -> Result<Vec<Trip>> {
        let mut conn = get_connection(&self.pool)?;
        load_trips(&mut conn)
    }

    fn get_by_id(&self, trip_id: i64) -> Result<Trip> {
        let mut conn = get_connection(&self.pool)?;
        let row = trips::table
            .select(TripDB::as_select())
            .find(trip_id)
            .first::<TripDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Trip::from(row))
    }

    async fn insert(&self, trip: Trip) -> Result<Trip> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trip> {
                let mut row = NewTripDB::from(trip);
                row.id = None;
                let created = diesel::insert_into(trips::table)
                    .values(&row)
                    .returning(TripDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Trip::from(created))
            })
            .await
    }

    async fn update(&self, trip: Trip) -> Result<Trip> {
        let trip_id = trip
            .id
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("id".to_string())))?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trip> {
                let row = TripDB::from_domain(trip_id, trip);
                let updated = diesel::update(trips::table.find(trip_id))
                    .set(&row)
                    .returning(TripDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Trip::from(updated))
            })
            .await
    }

    async fn delete(&self, trip_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(trips::table.find(trip_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn insert_many(&self, rows: Vec<Trip>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_trip_rows(conn, rows))
            .await
    }

    async fn clear(&self) -> Result<usize> {
        self.writer.exec(clear_trips).await
    }
}
