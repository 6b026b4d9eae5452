//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{
    Category, Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionBuilder, TransactionStore, map_transaction_row},
};

/// Stores transactions in a SQLite database.
///
/// The `transaction` table must exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire the database lock: {error}");
            Error::StorageUnavailable("could not acquire the database lock".to_owned())
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the row violates a table constraint (e.g., a non-positive amount),
    /// - or [Error::StorageUnavailable] if there is some other SQL error.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "INSERT INTO \"transaction\" (amount, date, category, description)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, amount, date, category, description",
            )?
            .query_row(
                (
                    builder.amount,
                    builder.date,
                    builder.category,
                    builder.description.as_ref(),
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::StorageUnavailable] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "SELECT id, amount, date, category, description FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Retrieve all transactions, sorted by date descending then by ID.
    ///
    /// IDs are assigned in increasing order, so sorting by ID keeps
    /// same-day transactions in the order they were created.
    fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, amount, date, category, description FROM \"transaction\"
                 ORDER BY date DESC, id ASC",
            )?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Delete a transaction from the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::StorageUnavailable] there is some other SQL error.
    fn delete(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "DELETE FROM \"transaction\" WHERE id = :id
                 RETURNING id, amount, date, category, description",
            )?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::StorageUnavailable] there is some SQL error.
    fn count(&self) -> Result<u32, Error> {
        self.lock()?
            .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
                row.get(0)
            })
            .map_err(|error| error.into())
    }
}

/// Create the transaction table in the database.
///
/// The table constraints reject non-positive amounts, blank descriptions and
/// unknown categories, so invalid rows cannot be written even by code that
/// bypasses [TransactionService](crate::TransactionService).
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    let categories = Category::ALL
        .iter()
        .map(|category| format!("'{category}'"))
        .collect::<Vec<_>>()
        .join(", ");

    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                date TEXT NOT NULL,
                category TEXT NOT NULL CHECK (category IN ({categories})),
                description TEXT NOT NULL CHECK (length(trim(description)) > 0)
                )"
        ),
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Category, Error, ValidationError,
        db::initialize,
        transaction::{Description, SQLiteTransactionStore, Transaction, TransactionStore},
    };

    fn get_test_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn create_succeeds() {
        let store = get_test_store();

        let transaction = store
            .create(Transaction::build(
                12.3,
                date!(2025 - 10 - 05),
                Category::Utilities,
                Description::new("Power").unwrap(),
            ))
            .expect("Could not create transaction");

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.date, date!(2025 - 10 - 05));
        assert_eq!(transaction.category, Category::Utilities);
        assert_eq!(transaction.description, "Power");
    }

    #[test]
    fn create_rejects_non_positive_amount() {
        let store = get_test_store();

        let result = store.create(Transaction::build(
            0.0,
            date!(2025 - 10 - 05),
            Category::Other,
            Description::new("Nothing").unwrap(),
        ));

        assert!(
            matches!(
                result,
                Err(Error::Validation(ValidationError::ConstraintViolation(_)))
            ),
            "want constraint violation, got {result:?}"
        );
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn create_rejects_blank_description() {
        let store = get_test_store();

        let result = store.create(Transaction::build(
            1.0,
            date!(2025 - 10 - 05),
            Category::Other,
            Description::new_unchecked("   "),
        ));

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::ConstraintViolation(_)))
        ));
    }

    #[test]
    fn get_returns_created_transaction() {
        let store = get_test_store();
        let created = store
            .create(Transaction::build(
                5.0,
                date!(2025 - 01 - 01),
                Category::Entertainment,
                Description::new("Movie").unwrap(),
            ))
            .unwrap();

        let got = store.get(created.id);

        assert_eq!(got, Ok(created));
    }

    #[test]
    fn get_missing_transaction_is_not_found() {
        let store = get_test_store();

        assert_eq!(store.get(42), Err(Error::NotFound));
    }

    #[test]
    fn list_sorts_by_date_descending_then_insertion_order() {
        let store = get_test_store();
        let create = |amount: f64, date| {
            store
                .create(Transaction::build(
                    amount,
                    date,
                    Category::Groceries,
                    Description::new("Food").unwrap(),
                ))
                .unwrap()
        };
        let oldest = create(1.0, date!(2024 - 01 - 01));
        let newest = create(2.0, date!(2024 - 03 - 01));
        let same_day_first = create(3.0, date!(2024 - 02 - 01));
        let same_day_second = create(4.0, date!(2024 - 02 - 01));

        let got = store.list().unwrap();

        assert_eq!(got, vec![newest, same_day_first, same_day_second, oldest]);
    }

    #[test]
    fn delete_returns_removed_transaction() {
        let store = get_test_store();
        let transaction = store
            .create(Transaction::build(
                1.23,
                date!(2025 - 10 - 26),
                Category::Transportation,
                Description::new("Bus").unwrap(),
            ))
            .unwrap();

        let deleted = store.delete(transaction.id);

        assert_eq!(deleted, Ok(transaction.clone()));
        assert_eq!(store.get(transaction.id), Err(Error::NotFound));
        assert_eq!(store.delete(transaction.id), Err(Error::NotFound));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = get_test_store();
        let build = || {
            Transaction::build(
                1.0,
                date!(2025 - 10 - 26),
                Category::Other,
                Description::new("Thing").unwrap(),
            )
        };
        let first = store.create(build()).unwrap();
        store.delete(first.id).unwrap();

        let second = store.create(build()).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn get_count() {
        let store = get_test_store();
        let want_count: u32 = 20;
        for i in 1..=want_count {
            store
                .create(Transaction::build(
                    i as f64,
                    date!(2025 - 10 - 05),
                    Category::Other,
                    Description::new("Thing").unwrap(),
                ))
                .expect("Could not create transaction");
        }

        let got_count = store.count().expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
