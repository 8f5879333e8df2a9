//! Trips module - travel budgets and spending.

mod trips_model;
mod trips_service;

pub use trips_model::{NewTrip, Trip, TripSummary};
pub use trips_service::{TripService, TripServiceTrait};
