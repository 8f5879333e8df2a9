use std::sync::Arc;

use async_trait::async_trait;

use super::trips_model::{NewTrip, Trip, TripSummary};
use crate::errors::{DatabaseError, Error, Result};
use crate::records::{RecordRepositoryTrait, RecordService, RecordStore};
use crate::utils::time_utils::Clock;

#[async_trait]
pub trait TripServiceTrait: Send + Sync {
    fn load_trips(&self) -> Result<()>;
    fn get_trips(&self) -> Vec<Trip>;
    /// Trips not yet started, soonest first.
    fn get_upcoming_trips(&self) -> Vec<Trip>;
    fn get_ongoing_trips(&self) -> Vec<Trip>;
    /// Finished trips, most recently ended first.
    fn get_completed_trips(&self) -> Vec<Trip>;
    fn get_summary(&self) -> TripSummary;
    async fn create_trip(&self, new_trip: NewTrip) -> Result<Trip>;
    async fn update_trip(&self, trip: Trip) -> Result<Trip>;
    async fn add_expense(&self, trip_id: i64, amount: f64) -> Result<Trip>;
    async fn delete_trip(&self, trip_id: i64) -> Result<usize>;
}

pub struct TripService {
    store: RecordStore<Trip>,
    clock: Arc<dyn Clock>,
}

impl TripService {
    pub fn new(repository: Arc<dyn RecordRepositoryTrait<Trip>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RecordStore::new(repository),
            clock,
        }
    }
}

impl RecordService for TripService {
    type Record = Trip;

    fn record_store(&self) -> &RecordStore<Trip> {
        &self.store
    }
}

#[async_trait]
impl TripServiceTrait for TripService {
    fn load_trips(&self) -> Result<()> {
        self.store.load()
    }

    fn get_trips(&self) -> Vec<Trip> {
        self.store.list()
    }

    fn get_upcoming_trips(&self) -> Vec<Trip> {
        let now = self.clock.now_millis();
        let mut trips: Vec<Trip> = self
            .store
            .list()
            .into_iter()
            .filter(|t| t.start_date > now)
            .collect();
        trips.sort_by_key(|t| t.start_date);
        trips
    }

    fn get_ongoing_trips(&self) -> Vec<Trip> {
        let now = self.clock.now_millis();
        self.store
            .list()
            .into_iter()
            .filter(|t| t.start_date <= now && t.end_date >= now)
            .collect()
    }

    fn get_completed_trips(&self) -> Vec<Trip> {
        let now = self.clock.now_millis();
        let mut trips: Vec<Trip> = self
            .store
            .list()
            .into_iter()
            .filter(|t| t.end_date < now)
            .collect();
        trips.sort_by(|a, b| b.end_date.cmp(&a.end_date));
        trips
    }

    fn get_summary(&self) -> TripSummary {
        let trips = self.store.list();
        TripSummary {
            total_budget: trips.iter().map(|t| t.budget).sum(),
            total_spent: trips.iter().map(|t| t.spent).sum(),
        }
    }

    async fn create_trip(&self, new_trip: NewTrip) -> Result<Trip> {
        let trip = Trip {
            id: None,
            name: new_trip.name,
            destination: new_trip.destination,
            start_date: new_trip.start_date,
            end_date: new_trip.end_date,
            budget: new_trip.budget,
            spent: new_trip.spent,
            notes: new_trip.notes,
            created_at: self.clock.now_millis(),
        };
        self.store.create(trip).await
    }

    async fn update_trip(&self, trip: Trip) -> Result<Trip> {
        self.store.update(trip).await
    }

    async fn add_expense(&self, trip_id: i64, amount: f64) -> Result<Trip> {
        let mut trip = self.store.find(trip_id).ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!("Trip {}", trip_id)))
        })?;
        trip.spent += amount;
        self.store.update(trip).await
    }

    async fn delete_trip(&self, trip_id: i64) -> Result<usize> {
        self.store.delete(trip_id).await
    }
}
