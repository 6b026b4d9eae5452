//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionBuilder},
};

/// Handles the durable creation, retrieval and deletion of transactions.
///
/// Implementers must enforce the field invariants of a transaction at write
/// time: a positive amount and a non-empty description.
pub trait TransactionStore {
    /// Create a new transaction in the store and return it with its assigned ID.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to a stored transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve every transaction, newest date first.
    ///
    /// Transactions on the same date are returned in the order they were created.
    fn list(&self) -> Result<Vec<Transaction>, Error>;

    /// Remove a transaction from the store and return it.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to a stored transaction.
    fn delete(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Get the total number of stored transactions.
    fn count(&self) -> Result<u32, Error>;
}
