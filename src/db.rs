//! Opening and initializing the application's SQLite database.

use std::{path::Path, time::Duration};

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// How long a statement waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the database file at `path`, creating it if it does not exist.
///
/// Statements that find the database locked wait up to `busy_timeout` before
/// failing with [Error::StorageUnavailable].
///
/// # Errors
/// Returns [Error::StorageUnavailable] if the file cannot be opened.
pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Connection, Error> {
    let connection = Connection::open(path)?;
    connection.busy_timeout(busy_timeout)?;

    Ok(connection)
}

/// Create the tables for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
