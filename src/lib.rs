//! Finance Tracker records spending transactions and compares them against
//! per-category budgets.
//!
//! This library provides a JSON REST API for creating, listing and deleting
//! transactions, and pure aggregation functions that derive per-category
//! totals and budget comparisons from them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod budget;
mod category;
mod database_id;
mod db;
mod endpoints;
mod error;
mod logging;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use budget::{
    BudgetConfig, BudgetRow, BudgetStatus, CategoryTotal, CategoryTotals, Summary,
    budget_comparison, category_totals, spent_fraction, summarize,
};
pub use category::Category;
pub use database_id::TransactionId;
pub use db::{DEFAULT_BUSY_TIMEOUT, initialize as initialize_db, open as open_db};
pub use endpoints::{SUMMARY_API, TRANSACTION, TRANSACTIONS_API, format_endpoint};
pub use error::{Error, ErrorBody, ValidationError};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    AmountInput, CreateTransaction, DeletedTransaction, Description, SQLiteTransactionStore,
    Transaction, TransactionBuilder, TransactionService, TransactionStore, parse_date,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
