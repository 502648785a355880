//! Pure functions deriving presentation data from the expense collection.
//!
//! Nothing here mutates the store; callers recompute these views whenever
//! the collection or the selected filter changes.

use std::collections::BTreeMap;

use crate::{Category, CategoryFilter, Expense};

/// The expenses that pass `filter`, in collection order.
pub fn filter_expenses(expenses: &[Expense], filter: &CategoryFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| filter.matches(expense.category))
        .cloned()
        .collect()
}

/// The sum of every expense amount.
///
/// Always computed over the full collection, independent of any active
/// filter.
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// The amount spent per category.
///
/// Categories with no expenses are absent from the map rather than present
/// with a zero total.
pub fn total_by_category(expenses: &[Expense]) -> BTreeMap<Category, f64> {
    expenses
        .iter()
        .fold(BTreeMap::new(), |mut totals, expense| {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
            totals
        })
}

/// Order `expenses` for display: most recent date first.
///
/// The sort is stable, so expenses sharing a date keep their collection
/// order.
pub fn sort_for_display(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
    expenses
}
