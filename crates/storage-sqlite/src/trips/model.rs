//! Database model for trips.

use diesel::prelude::*;

use dhanrakshak_core::trips::Trip;

#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::trips)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TripDB {
    pub id: i64,
    pub name: String,
    pub destination: String,
    pub start_date: i64,
    pub end_date: i64,
    pub budget: f64,
    pub spent: f64,
    pub notes: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::trips)]
pub struct NewTripDB {
    pub id: Option<i64>,
    pub name: String,
    pub destination: String,
    pub start_date: i64,
    pub end_date: i64,
    pub budget: f64,
    pub spent: f64,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl From<TripDB> for Trip {
    fn from(db: TripDB) -> Self {
        Self {
            id: Some(db.id),
            name: db.name,
            destination: db.destination,
            start_date: db.start_date,
            end_date: db.end_date,
            budget: db.budget,
            spent: db.spent,
            notes: db.notes,
            created_at: db.created_at,
        }
    }
}

impl From<Trip> for NewTripDB {
    fn from(domain: Trip) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            destination: domain.destination,
            start_date: domain.start_date,
            end_date: domain.end_date,
            budget: domain.budget,
            spent: domain.spent,
            notes: domain.notes,
            created_at: domain.created_at,
        }
    }
}

impl TripDB {
    pub fn from_domain(id: i64, domain: Trip) -> Self {
        Self {
            id,
            name: domain.name,
            destination: domain.destination,
            start_date: domain.start_date,
            end_date: domain.end_date,
            budget: domain.budget,
            spent: domain.spent,
            notes: domain.notes,
            created_at: domain.created_at,
        }
    }
}
