//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A field of a new transaction was missing or invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The date of a new transaction could not be parsed as a calendar date.
    #[error("\"{0}\" is not a valid date, expected a date like 2024-03-01")]
    InvalidDate(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the transaction has not already been deleted.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The database could not be reached, a query failed or the database lock
    /// could not be acquired.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A budget limit was zero, negative or not a finite number.
    ///
    /// This is an input error from the caller of the aggregation functions.
    #[error("a budget must be a positive number, got {0}")]
    InvalidBudget(f64),

    /// The budget configuration could not be read, was not valid JSON, did
    /// not cover every category or held an invalid limit.
    #[error("invalid budget configuration: {0}")]
    InvalidBudgetConfig(String),
}

/// The reasons a new transaction may be rejected before it reaches the store.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// A required field was absent, null or blank.
    #[error("the field \"{0}\" is required")]
    MissingField(&'static str),

    /// The amount could not be read as a number.
    #[error("\"{0}\" is not a number")]
    AmountNotANumber(String),

    /// The amount was zero, negative or not finite.
    #[error("amount must be a positive number, got {0}")]
    NonPositiveAmount(f64),

    /// The description only contained whitespace.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The category is not one of the known categories.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),

    /// The request body was not a JSON object with the expected shape.
    #[error("could not read the request body: {0}")]
    MalformedBody(String),

    /// The store rejected a row that violated a table constraint.
    #[error("the transaction violates a storage constraint: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    /// The name of the request field that caused the error, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField(field) => Some(*field),
            ValidationError::AmountNotANumber(_) | ValidationError::NonPositiveAmount(_) => {
                Some("amount")
            }
            ValidationError::EmptyDescription => Some("description"),
            ValidationError::UnknownCategory(_) => Some("category"),
            ValidationError::MalformedBody(_) | ValidationError::ConstraintViolation(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_CHECK,
                },
                description,
            ) => ValidationError::ConstraintViolation(
                description.unwrap_or_else(|| "CHECK constraint failed".to_owned()),
            )
            .into(),
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::StorageUnavailable(error.to_string())
            }
        }
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// A human readable description of the error.
    pub error: String,
    /// The request field that caused the error, for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, field) = match &self {
            Error::Validation(error) => (StatusCode::BAD_REQUEST, error.field()),
            Error::InvalidDate(_) => (StatusCode::BAD_REQUEST, Some("date")),
            Error::NotFound => (StatusCode::NOT_FOUND, None),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                let body = ErrorBody {
                    error: "Server Error".to_owned(),
                    field: None,
                };
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
            field,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, ValidationError};

    #[test]
    fn maps_missing_row_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let response = Error::from(ValidationError::EmptyDescription).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_date_is_a_bad_request() {
        let response = Error::InvalidDate("not-a-date".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_errors_are_internal_server_errors() {
        let response = Error::StorageUnavailable("disk I/O error".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn reports_the_offending_field() {
        assert_eq!(
            ValidationError::NonPositiveAmount(-5.0).field(),
            Some("amount")
        );
        assert_eq!(
            ValidationError::MissingField("date").field(),
            Some("date")
        );
        assert_eq!(ValidationError::MalformedBody("eof".to_owned()).field(), None);
    }
}
