//! Database model for goals.

use diesel::prelude::*;

use dhanrakshak_core::goals::Goal;

#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct GoalDB {
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: i64,
    pub category: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
pub struct NewGoalDB {
    pub id: Option<i64>,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: i64,
    pub category: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: i64,
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: Some(db.id),
            name: db.name,
            target_amount: db.target_amount,
            current_amount: db.current_amount,
            target_date: db.target_date,
            category: db.category,
            icon: db.icon,
            color: db.color,
            created_at: db.created_at,
        }
    }
}

impl From<Goal> for NewGoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            target_amount: domain.target_amount,
            current_amount: domain.current_amount,
            target_date: domain.target_date,
            category: domain.category,
            icon: domain.icon,
            color: domain.color,
            created_at: domain.created_at,
        }
    }
}

impl GoalDB {
    pub fn from_domain(id: i64, domain: Goal) -> Self {
        Self {
            id,
            name: domain.name,
            target_amount: domain.target_amount,
            current_amount: domain.current_amount,
            target_date: domain.target_date,
            category: domain.category,
            icon: domain.icon,
            color: domain.color,
            created_at: domain.created_at,
        }
    }
}
