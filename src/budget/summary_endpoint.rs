use axum::{
    Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, BudgetConfig, Error,
    budget::{Summary, summarize},
    transaction::{SQLiteTransactionStore, TransactionService},
};

/// The state needed to summarize spending.
#[derive(Debug, Clone)]
pub struct SummaryState {
    transactions: TransactionService<SQLiteTransactionStore>,
    budget: BudgetConfig,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            budget: state.budget.clone(),
        }
    }
}

/// A route handler for the per-category totals and budget comparison of all
/// transactions.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
) -> Result<Json<Summary>, Error> {
    let transactions = state.transactions.list()?;
    let summary = summarize(&transactions, &state.budget)?;

    Ok(Json(summary))
}
