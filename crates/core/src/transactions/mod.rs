//! Transactions module - domain models and services.

mod transactions_model;
mod transactions_service;

pub use transactions_model::{NewTransaction, Transaction, TransactionSummary, TransactionType};
pub use transactions_service::{TransactionService, TransactionServiceTrait};
