//! Per-category totals and budget comparison.
//!
//! Every function here is pure: the results are recomputed from the full
//! transaction list on each call and nothing is cached.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{BudgetConfig, Category, Error, Transaction};

/// The total amount spent per category, in canonical category order.
pub type CategoryTotals = BTreeMap<Category, f64>;

/// Sums the amounts of `transactions` for each of `categories`.
///
/// Every requested category is present in the result. Categories without
/// transactions have a total of `0.0`, and transactions in categories that
/// were not requested are ignored.
pub fn category_totals(transactions: &[Transaction], categories: &[Category]) -> CategoryTotals {
    let mut totals: CategoryTotals = categories
        .iter()
        .map(|&category| (category, 0.0))
        .collect();

    for transaction in transactions {
        if let Some(total) = totals.get_mut(&transaction.category) {
            *total += transaction.amount;
        }
    }

    totals
}

/// How much was spent in a category compared to its budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    /// The category being compared.
    pub category: Category,
    /// The spending limit for the category.
    pub budget: f64,
    /// The sum of the transaction amounts in the category.
    pub spent: f64,
}

impl BudgetRow {
    /// Whether more was spent than budgeted.
    pub fn is_over(&self) -> bool {
        self.spent > self.budget
    }

    /// The fraction of the budget spent, see [spent_fraction].
    ///
    /// # Errors
    /// Returns [Error::InvalidBudget] if the budget is not positive.
    pub fn spent_fraction(&self) -> Result<f64, Error> {
        spent_fraction(self.spent, self.budget)
    }
}

/// Compares spending against `budgets` with one row per category.
///
/// Rows are in canonical category order regardless of the order of
/// `categories`, and duplicate categories produce a single row.
pub fn budget_comparison(
    transactions: &[Transaction],
    categories: &[Category],
    budgets: &BudgetConfig,
) -> Vec<BudgetRow> {
    category_totals(transactions, categories)
        .into_iter()
        .map(|(category, spent)| BudgetRow {
            category,
            budget: budgets.limit(category),
            spent,
        })
        .collect()
}

/// The fraction of `budget` that `spent` uses up, clamped to `[0, 1]`.
///
/// # Errors
/// Returns [Error::InvalidBudget] if `budget` is zero, negative or not finite.
pub fn spent_fraction(spent: f64, budget: f64) -> Result<f64, Error> {
    if !(budget.is_finite() && budget > 0.0) {
        return Err(Error::InvalidBudget(budget));
    }

    Ok((spent / budget).clamp(0.0, 1.0))
}

/// The spending in a single category, for pie charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category.
    pub category: Category,
    /// The amount spent in the category.
    pub spent: f64,
}

/// A [BudgetRow] with its derived progress and over-budget status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    /// The category being compared.
    pub category: Category,
    /// The spending limit for the category.
    pub budget: f64,
    /// The amount spent in the category.
    pub spent: f64,
    /// The fraction of the budget used, between 0 and 1.
    pub fraction: f64,
    /// Whether more was spent than budgeted.
    pub over: bool,
}

/// Everything a dashboard needs to draw the category breakdown and the
/// budget comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Spending per category in canonical order.
    pub totals: Vec<CategoryTotal>,
    /// Budget comparison per category in canonical order.
    pub budgets: Vec<BudgetStatus>,
    /// The amount spent across all categories.
    pub total_spent: f64,
    /// The sum of the limits across all categories.
    pub total_budget: f64,
}

/// Builds a [Summary] of `transactions` over every category.
///
/// # Errors
/// Returns [Error::InvalidBudget] if a budget is not positive, which cannot
/// happen for a [BudgetConfig] built through its constructors.
pub fn summarize(transactions: &[Transaction], budgets: &BudgetConfig) -> Result<Summary, Error> {
    let rows = budget_comparison(transactions, &Category::ALL, budgets);

    let totals = rows
        .iter()
        .map(|row| CategoryTotal {
            category: row.category,
            spent: row.spent,
        })
        .collect();

    let statuses = rows
        .iter()
        .map(|row| {
            Ok(BudgetStatus {
                category: row.category,
                budget: row.budget,
                spent: row.spent,
                fraction: row.spent_fraction()?,
                over: row.is_over(),
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(Summary {
        totals,
        budgets: statuses,
        total_spent: rows.iter().map(|row| row.spent).sum(),
        total_budget: rows.iter().map(|row| row.budget).sum(),
    })
}
