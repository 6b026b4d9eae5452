//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    BudgetConfig, Error,
    db::initialize,
    transaction::{SQLiteTransactionStore, TransactionService},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Creates, lists and deletes transactions in the database.
    pub transactions: TransactionService<SQLiteTransactionStore>,

    /// The spending limits used for the budget comparison.
    pub budget: BudgetConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, budget: BudgetConfig) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            transactions: TransactionService::new(SQLiteTransactionStore::new(connection)),
            budget,
        })
    }
}

impl FromRef<AppState> for TransactionService<SQLiteTransactionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.transactions.clone()
    }
}
