//! The fixed set of categories transactions are bucketed into.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A spending category.
///
/// The declaration order is the canonical order used when listing totals
/// and budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Food and household supplies.
    Groceries,
    /// Power, water, internet and similar bills.
    Utilities,
    /// Going out, streaming, hobbies.
    Entertainment,
    /// Fuel, fares and vehicle costs.
    Transportation,
    /// Anything that does not fit elsewhere.
    Other,
}

impl Category {
    /// Every category in canonical order.
    pub const ALL: [Category; 5] = [
        Category::Groceries,
        Category::Utilities,
        Category::Entertainment,
        Category::Transportation,
        Category::Other,
    ];

    /// The lowercase name used in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Transportation => "transportation",
            Category::Other => "other",
        }
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parse a category name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();

        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_owned()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Category, ValidationError};

    #[test]
    fn parses_known_categories() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse(), Ok(category));
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(" Groceries ".parse(), Ok(Category::Groceries));
        assert_eq!("TRANSPORTATION".parse(), Ok(Category::Transportation));
    }

    #[test]
    fn parse_rejects_unknown_category() {
        assert_eq!(
            "rent".parse::<Category>(),
            Err(ValidationError::UnknownCategory("rent".to_owned()))
        );
    }

    #[test]
    fn canonical_order_matches_declaration_order() {
        let mut sorted = Category::ALL;
        sorted.sort();

        assert_eq!(sorted, Category::ALL);
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();

        assert_eq!(json, "\"entertainment\"");
    }
}
