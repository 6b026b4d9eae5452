use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{SQLiteTransactionStore, Transaction, TransactionService},
};

/// The response body for a successful delete.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeletedTransaction {
    /// A confirmation for the client to display.
    pub message: String,
    /// The transaction that was removed.
    pub transaction: Transaction,
}

/// A route handler for deleting a transaction, responds with the deleted
/// transaction.
///
/// IDs are opaque to clients, so an ID that is not even well-formed is
/// reported the same as one that does not exist: `404 Not Found`.
pub async fn delete_transaction_endpoint(
    State(service): State<TransactionService<SQLiteTransactionStore>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<DeletedTransaction>, Error> {
    let id: TransactionId = transaction_id.parse().map_err(|_| Error::NotFound)?;

    let transaction = service.delete(id)?;

    Ok(Json(DeletedTransaction {
        message: "Transaction Deleted".to_owned(),
        transaction,
    }))
}
