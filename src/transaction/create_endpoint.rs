use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error, ValidationError,
    transaction::{CreateTransaction, SQLiteTransactionStore, Transaction, TransactionService},
};

/// A route handler for creating a new transaction, responds with the stored
/// transaction and `201 Created`.
///
/// A body that is not a JSON object is reported as a validation error so that
/// every client mistake gets a `400 Bad Request`.
pub async fn create_transaction_endpoint(
    State(service): State<TransactionService<SQLiteTransactionStore>>,
    payload: Result<Json<CreateTransaction>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let Json(request) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;

    let transaction = service.create(request)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
