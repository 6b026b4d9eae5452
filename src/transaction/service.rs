//! Validates client input and delegates to a [TransactionStore].

use serde::Deserialize;
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
    format_description::well_known::Rfc3339,
};

use crate::{
    Category, Error, ValidationError,
    database_id::TransactionId,
    transaction::{Description, Transaction, TransactionBuilder, TransactionStore},
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The unvalidated fields of a transaction as sent by a client.
///
/// Every field is optional so that a missing field can be reported by name
/// instead of failing to deserialize the whole body.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct CreateTransaction {
    /// The amount spent, as a JSON number or a numeric string.
    pub amount: Option<AmountInput>,
    /// The date of the transaction, e.g. "2024-03-01".
    pub date: Option<String>,
    /// The name of the category, e.g. "groceries".
    pub category: Option<String>,
    /// What the money was spent on.
    pub description: Option<String>,
}

/// An amount as it may appear in a request body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `42.5`.
    Number(f64),
    /// A string holding a number, e.g. `"42.5"`, as sent by HTML forms.
    Text(String),
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_owned())
    }
}

impl CreateTransaction {
    /// Build a request from its four fields.
    pub fn new(
        amount: impl Into<AmountInput>,
        date: &str,
        category: &str,
        description: &str,
    ) -> Self {
        Self {
            amount: Some(amount.into()),
            date: Some(date.to_owned()),
            category: Some(category.to_owned()),
            description: Some(description.to_owned()),
        }
    }

    /// Check and normalize the fields of the request.
    ///
    /// # Errors
    /// This function will return a:
    /// - [ValidationError::MissingField] if a field is absent or blank,
    /// - [ValidationError::AmountNotANumber] or [ValidationError::NonPositiveAmount] for a bad amount,
    /// - [Error::InvalidDate] if the date is not a calendar date,
    /// - [ValidationError::UnknownCategory] if the category is not known,
    /// - or [ValidationError::EmptyDescription] if the description is blank.
    pub fn validate(self) -> Result<TransactionBuilder, Error> {
        let amount = self.amount.ok_or(ValidationError::MissingField("amount"))?;
        let date = required_text(self.date, "date")?;
        let category = required_text(self.category, "category")?;
        let description = self
            .description
            .ok_or(ValidationError::MissingField("description"))?;

        let amount = parse_amount(amount)?;
        let date = parse_date(&date)?;
        let category = category.parse::<Category>()?;
        let description = Description::new(&description)?;

        Ok(Transaction::build(amount, date, category, description))
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Coerce an amount to a number and check that it is positive.
fn parse_amount(amount: AmountInput) -> Result<f64, ValidationError> {
    let amount = match amount {
        AmountInput::Number(number) => number,
        AmountInput::Text(text) => {
            let text = text.trim();

            if text.is_empty() {
                return Err(ValidationError::MissingField("amount"));
            }

            text.parse::<f64>()
                .map_err(|_| ValidationError::AmountNotANumber(text.to_owned()))?
        }
    };

    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::NonPositiveAmount(amount))
    }
}

/// Parse a calendar date from `text`.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, in which case only the date
/// part (in the timestamp's own offset) is kept.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is neither.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();

    Date::parse(text, DATE_FORMAT)
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|date_time| date_time.date()))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// Exposes create, list and delete over a [TransactionStore], validating
/// input before anything is written.
#[derive(Debug, Clone)]
pub struct TransactionService<S> {
    store: S,
}

impl<S> TransactionService<S>
where
    S: TransactionStore,
{
    /// Create a service that persists transactions in `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate `request` and store it as a new transaction.
    ///
    /// The store is only written to if every field is valid.
    ///
    /// # Errors
    /// Returns the errors of [CreateTransaction::validate], or
    /// [Error::StorageUnavailable] if the store could not be written to.
    pub fn create(&self, request: CreateTransaction) -> Result<Transaction, Error> {
        let builder = request.validate()?;
        let transaction = self.store.create(builder)?;

        tracing::debug!(
            "Created transaction {} for {} in {}",
            transaction.id,
            transaction.amount,
            transaction.category
        );

        Ok(transaction)
    }

    /// Get every transaction, newest first.
    ///
    /// # Errors
    /// Returns [Error::StorageUnavailable] if the store could not be read.
    pub fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.store.list()
    }

    /// Delete the transaction with the ID `id` and return it.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no such transaction, or
    /// [Error::StorageUnavailable] if the store could not be written to.
    pub fn delete(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self.store.delete(id)?;

        tracing::debug!("Deleted transaction {id}");

        Ok(transaction)
    }

    /// The store the service writes to.
    pub fn store(&self) -> &S {
        &self.store
    }
}
