//! SQLite storage implementation for trips.

mod model;
mod repository;

pub use model::{TripDB, NewTripDB};
pub use repository::TripRepository;
pub(crate) use repository::{clear_trips, insert_trip_rows, load_trips};
