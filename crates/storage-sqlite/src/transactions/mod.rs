//! SQLite storage implementation for transactions.

mod model;
mod repository;

pub use model::{TransactionDB, NewTransactionDB};
pub use repository::TransactionRepository;
pub(crate) use repository::{clear_transactions, insert_transaction_rows, load_transactions};
