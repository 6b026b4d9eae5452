//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionStore` trait and its SQLite implementation
//! - The `TransactionService` that validates input before it is stored
//! - Route handlers for the transaction API

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod service;
mod sqlite;
mod store;

pub use self::core::{Description, Transaction, TransactionBuilder, map_transaction_row};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{DeletedTransaction, delete_transaction_endpoint};
pub use list_endpoint::list_transactions_endpoint;
pub use service::{AmountInput, CreateTransaction, TransactionService, parse_date};
pub use sqlite::{SQLiteTransactionStore, create_transaction_table};
pub use store::TransactionStore;
