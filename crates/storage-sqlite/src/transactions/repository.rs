use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use dhanrakshak_core::errors::{Error, Result, ValidationError};
use dhanrakshak_core::records::RecordRepositoryTrait;
use dhanrakshak_core::transactions::Transaction;

use super::model::{TransactionDB, NewTransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;

pub(crate) fn load_transactions(conn: &mut SqliteConnection) -> Result<Vec<Transaction>> {
    transactions::table
        .select(TransactionDB::as_select())
        .order(transactions::date.desc())
        .load::<TransactionDB>(conn)
        .map_err(StorageError::from)?
        .into_iter()
        .map(Transaction::try_from)
        .collect()
}

pub(crate) fn insert_transaction_rows(conn: &mut SqliteConnection, rows: Vec<Transaction>) -> Result<usize> {
    let mut inserted = 0;
    for row in rows {
        inserted += diesel::insert_into(transactions::table)
            .values(NewTransactionDB::from(row))
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(inserted)
}

pub(crate) fn clear_transactions(conn: &mut SqliteConnection) -> Result<usize> {
    Ok(diesel::delete(transactions::table)
        .execute(conn)
        .map_err(StorageError::from)?)
}

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RecordRepositoryTrait<Transaction> for TransactionRepository {
    fn list(&self) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        load_transactions(&mut conn)
    }

    fn get_by_id(&self, transaction_id: i64) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .select(TransactionDB::as_select())
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Transaction::try_from(row)
    }

    async fn insert(&self, transaction: Transaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let mut row = NewTransactionDB::from(transaction);
                row.id = None;
                let created = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Transaction::try_from(created)
            })
            .await
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let transaction_id = transaction
            .id
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("id".to_string())))?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let row = TransactionDB::from_domain(transaction_id, transaction);
                let updated = diesel::update(transactions::table.find(transaction_id))
                    .set(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Transaction::try_from(updated)
            })
            .await
    }

    async fn delete(&self, transaction_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(transactions::table.find(transaction_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn insert_many(&self, rows: Vec<Transaction>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_transaction_rows(conn, rows))
            .await
    }

    async fn clear(&self) -> Result<usize> {
        self.writer.exec(clear_transactions).await
    }
}
