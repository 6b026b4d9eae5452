//! Database ID type definition.

/// Alias for the integer type the store assigns to each transaction.
pub type TransactionId = i64;
