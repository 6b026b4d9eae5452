//! Defines the core data models for transactions.

use std::fmt::Display;

use rusqlite::Row;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Category, ValidationError, database_id::TransactionId};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// An expense, i.e. an event where money was spent.
///
/// To create a new `Transaction`, use [Transaction::build] and hand the
/// builder to a [TransactionStore](crate::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store.
    pub id: TransactionId,
    /// The amount of money spent, always positive.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The budget category the transaction counts towards.
    pub category: Category,
    /// A text description of what the transaction was for.
    pub description: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: f64,
        date: Date,
        category: Category,
        description: Description,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            category,
            description,
        }
    }
}

/// The fields of a transaction that has not been stored yet.
///
/// The amount is not checked here: the store rejects non-positive amounts
/// with a table constraint, and [TransactionService](crate::TransactionService)
/// rejects them before they reach the store.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The amount of money spent.
    pub amount: f64,

    /// The date when the transaction occurred.
    pub date: Date,

    /// The budget category of the transaction.
    pub category: Category,

    /// A human-readable description of the transaction.
    ///
    /// # Examples
    /// - `"Weekly shop"`
    /// - `"Power bill - March"`
    pub description: Description,
}

/// A validated, non-empty transaction description.
///
/// Leading and trailing whitespace is removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Create a description.
    ///
    /// # Errors
    ///
    /// This function will return an [ValidationError::EmptyDescription] if
    /// `text` is empty or only whitespace.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();

        if text.is_empty() {
            Err(ValidationError::EmptyDescription)
        } else {
            Ok(Self(text.to_owned()))
        }
    }

    /// Create a description without validation.
    ///
    /// The caller should ensure that the string is not empty. The store will
    /// still reject an empty description.
    #[cfg(test)]
    pub fn new_unchecked(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map a database row to a Transaction.
///
/// Expects the columns `id, amount, date, category, description` in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let category = row.get(3)?;
    let description = row.get(4)?;

    Ok(Transaction {
        id,
        amount,
        date,
        category,
        description,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{Category, Transaction, ValidationError, transaction::Description};

    #[test]
    fn description_is_trimmed() {
        let description = Description::new("  Market  ").unwrap();

        assert_eq!(description.as_ref(), "Market");
    }

    #[test]
    fn blank_description_is_rejected() {
        assert_eq!(
            Description::new(" \t\n"),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn serializes_date_as_iso_date_string() {
        let transaction = Transaction {
            id: 7,
            amount: 42.5,
            date: date!(2024 - 03 - 01),
            category: Category::Groceries,
            description: "Market".to_owned(),
        };

        let got = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            got,
            json!({
                "id": 7,
                "amount": 42.5,
                "date": "2024-03-01",
                "category": "groceries",
                "description": "Market",
            })
        );
    }
}
