use std::sync::Arc;

use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction, TransactionSummary, TransactionType};
use crate::errors::Result;
use crate::records::{RecordRepositoryTrait, RecordService, RecordStore};
use crate::utils::time_utils::{month_bounds_millis, Clock};

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn load_transactions(&self) -> Result<()>;
    /// Transactions ordered newest first by date.
    fn get_transactions(&self) -> Vec<Transaction>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction>;
    async fn delete_transaction(&self, transaction_id: i64) -> Result<usize>;
    /// Totals overall and for the current calendar month.
    fn get_summary(&self) -> TransactionSummary;
}

pub struct TransactionService {
    store: RecordStore<Transaction>,
    clock: Arc<dyn Clock>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn RecordRepositoryTrait<Transaction>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store: RecordStore::new(repository),
            clock,
        }
    }

    fn total(transactions: &[Transaction], kind: TransactionType) -> f64 {
        transactions
            .iter()
            .filter(|t| t.transaction_type == kind)
            .map(|t| t.amount)
            .sum()
    }
}

impl RecordService for TransactionService {
    type Record = Transaction;

    fn record_store(&self) -> &RecordStore<Transaction> {
        &self.store
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn load_transactions(&self) -> Result<()> {
        self.store.load()
    }

    fn get_transactions(&self) -> Vec<Transaction> {
        let mut transactions = self.store.list();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction {
            id: None,
            amount: new_transaction.amount,
            transaction_type: new_transaction.transaction_type,
            category: new_transaction.category,
            description: new_transaction.description,
            date: new_transaction.date,
            asset_id: new_transaction.asset_id,
            created_at: self.clock.now_millis(),
        };
        self.store.create(transaction).await
    }

    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        self.store.update(transaction).await
    }

    async fn delete_transaction(&self, transaction_id: i64) -> Result<usize> {
        self.store.delete(transaction_id).await
    }

    fn get_summary(&self) -> TransactionSummary {
        let transactions = self.store.list();
        let (month_start, month_end) = month_bounds_millis(self.clock.now());
        let this_month: Vec<Transaction> = transactions
            .iter()
            .filter(|t| t.date >= month_start && t.date < month_end)
            .cloned()
            .collect();

        let total_income = Self::total(&transactions, TransactionType::Credit);
        let total_expenses = Self::total(&transactions, TransactionType::Debit);

        TransactionSummary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            monthly_income: Self::total(&this_month, TransactionType::Credit),
            monthly_expenses: Self::total(&this_month, TransactionType::Debit),
        }
    }
}
