//! This file defines the `Expense` type, the core type of the data layer,
//! along with the types for creating and patching expenses.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Category, Error};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The ID of an expense.
///
/// IDs are assigned by the repository when an expense is created and are
/// unique within the collection. Callers never choose them.
pub type ExpenseId = String;

/// One recorded spending event.
///
/// To create a new `Expense`, build a [NewExpense] and pass it to
/// [crate::ExpenseRepository::create], which assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// A short display name for what the money was spent on.
    pub title: String,
    /// The amount of money spent. Never negative.
    pub amount: f64,
    /// The kind of spending this expense records.
    pub category: Category,
    /// The calendar date the money was spent. Never in the future.
    #[serde(with = "iso_date")]
    pub date: Date,
}

impl Expense {
    /// Return a copy of this expense with `patch` applied.
    ///
    /// Fields left unset in the patch keep their current values. The ID is
    /// always preserved.
    pub fn merged(&self, patch: &ExpensePatch) -> Expense {
        Expense {
            id: self.id.clone(),
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            amount: patch.amount.unwrap_or(self.amount),
            category: patch.category.unwrap_or(self.category),
            date: patch.date.unwrap_or(self.date),
        }
    }

    /// Check the expense against the data-model invariants.
    ///
    /// # Errors
    /// This function will return an [Error::EmptyTitle], [Error::NegativeAmount]
    /// or [Error::FutureDate] if the corresponding invariant is violated.
    pub fn validate(&self) -> Result<(), Error> {
        validate_fields(&self.title, self.amount, self.date)
    }
}

fn validate_fields(title: &str, amount: f64, date: Date) -> Result<(), Error> {
    if title.trim().is_empty() {
        return Err(Error::EmptyTitle);
    }

    if amount < 0.0 {
        return Err(Error::NegativeAmount);
    }

    if date > OffsetDateTime::now_utc().date() {
        return Err(Error::FutureDate(date));
    }

    Ok(())
}

/// The details needed to create a new expense.
///
/// A `NewExpense` is valid by construction: [NewExpense::new] rejects empty
/// titles, negative amounts and future dates. It carries no ID because IDs
/// are assigned by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    title: String,
    amount: f64,
    category: Category,
    date: Date,
}

impl NewExpense {
    /// Create the details for a new expense.
    ///
    /// Surrounding whitespace is trimmed from `title`.
    ///
    /// # Errors
    /// This function will return an:
    /// - [Error::EmptyTitle] if `title` is empty or only whitespace,
    /// - [Error::NegativeAmount] if `amount` is less than zero,
    /// - or [Error::FutureDate] if `date` is later than today.
    pub fn new(title: &str, amount: f64, category: Category, date: Date) -> Result<Self, Error> {
        let title = title.trim();
        validate_fields(title, amount, date)?;

        Ok(Self {
            title: title.to_string(),
            amount,
            category,
            date,
        })
    }

    /// Attach a repository-assigned ID, producing the stored record.
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

/// A partial update to an expense.
///
/// Fields left as `None` keep their current value when the patch is merged
/// onto a stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    /// The replacement title, if any.
    pub title: Option<String>,
    /// The replacement amount, if any.
    pub amount: Option<f64>,
    /// The replacement category, if any.
    pub category: Option<Category>,
    /// The replacement date, if any.
    pub date: Option<Date>,
}

impl From<&Expense> for ExpensePatch {
    /// A full patch that replaces every field with the values of `expense`.
    fn from(expense: &Expense) -> Self {
        Self {
            title: Some(expense.title.clone()),
            amount: Some(expense.amount),
            category: Some(expense.category),
            date: Some(expense.date),
        }
    }
}

#[cfg(test)]
mod expense_tests {
    use time::{Duration, OffsetDateTime, macros::date};

    use crate::{Category, Error};

    use super::{Expense, ExpensePatch, NewExpense};

    #[test]
    fn new_fails_on_empty_title() {
        let result = NewExpense::new("   ", 9.99, Category::Food, date!(2026 - 02 - 01));

        assert_eq!(result, Err(Error::EmptyTitle));
    }

    #[test]
    fn new_fails_on_negative_amount() {
        let result = NewExpense::new("Refund", -4.20, Category::Other, date!(2026 - 02 - 01));

        assert_eq!(result, Err(Error::NegativeAmount));
    }

    #[test]
    fn new_fails_on_future_date() {
        let tomorrow = OffsetDateTime::now_utc()
            .date()
            .checked_add(Duration::days(1))
            .unwrap();

        let result = NewExpense::new("Time Machine", 1_000_000.0, Category::Other, tomorrow);

        assert_eq!(result, Err(Error::FutureDate(tomorrow)));
    }

    #[test]
    fn new_succeeds_on_today() {
        let today = OffsetDateTime::now_utc().date();

        let result = NewExpense::new("Lunch", 12.50, Category::Food, today);

        assert!(result.is_ok());
    }

    #[test]
    fn new_trims_title() {
        let new_expense =
            NewExpense::new("  Lunch  ", 12.50, Category::Food, date!(2026 - 02 - 01)).unwrap();

        assert_eq!(new_expense.into_expense("1".to_string()).title, "Lunch");
    }

    fn sample_expense() -> Expense {
        Expense {
            id: "42".to_string(),
            title: "Bus Fare".to_string(),
            amount: 3.50,
            category: Category::Transport,
            date: date!(2026 - 02 - 03),
        }
    }

    #[test]
    fn merged_keeps_id_and_unset_fields() {
        let expense = sample_expense();
        let patch = ExpensePatch {
            amount: Some(4.00),
            ..Default::default()
        };

        let merged = expense.merged(&patch);

        assert_eq!(merged.id, expense.id);
        assert_eq!(merged.amount, 4.00);
        assert_eq!(merged.title, expense.title);
        assert_eq!(merged.category, expense.category);
        assert_eq!(merged.date, expense.date);
    }

    #[test]
    fn full_patch_replaces_every_field() {
        let expense = sample_expense();
        let replacement = Expense {
            id: expense.id.clone(),
            title: "Train Fare".to_string(),
            amount: 7.00,
            category: Category::Transport,
            date: date!(2026 - 02 - 04),
        };

        let merged = expense.merged(&ExpensePatch::from(&replacement));

        assert_eq!(merged, replacement);
    }

    #[test]
    fn dates_serialize_as_iso_8601_strings() {
        let json = serde_json::to_string(&sample_expense()).unwrap();

        assert!(json.contains("\"date\":\"2026-02-03\""), "got {json}");

        let parsed: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_expense());
    }
}
