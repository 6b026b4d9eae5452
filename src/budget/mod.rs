//! Budgets and the summaries derived from transactions.
//!
//! This module contains:
//! - The `BudgetConfig` holding a spending limit per category
//! - Pure aggregation functions for category totals and budget comparison
//! - The route handler that serves the summary as JSON

mod aggregation;
mod config;
mod summary_endpoint;

pub use aggregation::{
    BudgetRow, BudgetStatus, CategoryTotal, CategoryTotals, Summary, budget_comparison,
    category_totals, spent_fraction, summarize,
};
pub use config::BudgetConfig;
pub use summary_endpoint::get_summary_endpoint;
