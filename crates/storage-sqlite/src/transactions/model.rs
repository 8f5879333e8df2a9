//! Database model for transactions.

use diesel::prelude::*;
use std::str::FromStr;

use dhanrakshak_core::transactions::{Transaction, TransactionType};
use dhanrakshak_core::Error;

#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: i64,
    pub amount: f64,
    pub transaction_type: String,
    pub category: String,
    pub description: String,
    pub date: i64,
    pub asset_id: Option<i64>,
    pub created_at: i64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub id: Option<i64>,
    pub amount: f64,
    pub transaction_type: String,
    pub category: String,
    pub description: String,
    pub date: i64,
    pub asset_id: Option<i64>,
    pub created_at: i64,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(db.id),
            amount: db.amount,
            transaction_type: TransactionType::from_str(&db.transaction_type)?,
            category: db.category,
            description: db.description,
            date: db.date,
            asset_id: db.asset_id,
            created_at: db.created_at,
        })
    }
}

impl From<Transaction> for NewTransactionDB {
    fn from(domain: Transaction) -> Self {
        Self {
            id: domain.id,
            amount: domain.amount,
            transaction_type: domain.transaction_type.as_str().to_string(),
            category: domain.category,
            description: domain.description,
            date: domain.date,
            asset_id: domain.asset_id,
            created_at: domain.created_at,
        }
    }
}

impl TransactionDB {
    pub fn from_domain(id: i64, domain: Transaction) -> Self {
        Self {
            id,
            amount: domain.amount,
            transaction_type: domain.transaction_type.as_str().to_string(),
            category: domain.category,
            description: domain.description,
            date: domain.date,
            asset_id: domain.asset_id,
            created_at: domain.created_at,
        }
    }
}
