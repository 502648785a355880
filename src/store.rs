//! The expense store: the in-memory source of truth consumed by
//! presentation code.
//!
//! The store mediates between UI actions and the repository. Mutations are
//! write-through: the in-memory collection changes only after the repository
//! confirms the change, so the UI always reflects confirmed state rather
//! than a guess that could be rolled back.

use crate::{Error, Expense, ExpensePatch, ExpenseRepository, ExpenseStorage, NewExpense};

const FETCH_FAILED: &str = "Failed to fetch expenses. Please try again.";
const ADD_FAILED: &str = "Failed to add expense. Please try again.";
const UPDATE_FAILED: &str = "Failed to update expense. Please try again.";
const DELETE_FAILED: &str = "Failed to delete expense. Please try again.";

/// Holds the current expense collection along with the loading flag and
/// error slot the UI renders.
///
/// Each action method returns whether it succeeded. The error slot holds at
/// most one message and every action overwrites it, so a success always
/// clears a stale failure.
pub struct ExpenseStore<S> {
    repository: ExpenseRepository<S>,
    expenses: Vec<Expense>,
    loading: bool,
    error: Option<String>,
}

impl<S: ExpenseStorage> ExpenseStore<S> {
    /// Open a store over `repository` and perform the initial fetch.
    pub async fn open(repository: ExpenseRepository<S>) -> Self {
        let mut store = Self {
            repository,
            expenses: Vec::new(),
            loading: true,
            error: None,
        };

        store.refresh_expenses().await;

        store
    }

    /// The current expense collection.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Whether a fetch is in progress. The UI should disable interactions
    /// while this is true.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The user-facing message from the most recent failed action, or `None`
    /// after a success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Create `new_expense` and append the stored record to the collection.
    ///
    /// Returns whether the expense was added. On failure the collection is
    /// left untouched and [ExpenseStore::error] is set.
    pub async fn add_expense(&mut self, new_expense: NewExpense) -> bool {
        self.error = None;

        match self.repository.create(new_expense).await {
            Ok(expense) => {
                self.expenses.push(expense);
                true
            }
            Err(error) => {
                self.set_error(error, ADD_FAILED);
                false
            }
        }
    }

    /// Persist the edited `expense` and replace the matching record in the
    /// collection with the merged result.
    ///
    /// Returns whether the expense was updated. On failure the collection is
    /// left untouched and [ExpenseStore::error] is set; updating an ID that
    /// no longer exists surfaces "Expense not found".
    pub async fn update_expense(&mut self, expense: &Expense) -> bool {
        self.error = None;

        match self
            .repository
            .update(&expense.id, &ExpensePatch::from(expense))
            .await
        {
            Ok(updated) => {
                if let Some(existing) = self
                    .expenses
                    .iter_mut()
                    .find(|expense| expense.id == updated.id)
                {
                    *existing = updated;
                }
                true
            }
            Err(error) => {
                self.set_error(error, UPDATE_FAILED);
                false
            }
        }
    }

    /// Delete the expense with `id` and remove it from the collection.
    ///
    /// Returns whether the delete was confirmed. Deleting an ID that no
    /// longer exists still reports success.
    pub async fn delete_expense(&mut self, id: &str) -> bool {
        self.error = None;

        match self.repository.delete(id).await {
            Ok(deleted_id) => {
                self.expenses.retain(|expense| expense.id != deleted_id);
                true
            }
            Err(error) => {
                self.set_error(error, DELETE_FAILED);
                false
            }
        }
    }

    /// Replace the collection with a fresh fetch from the repository.
    ///
    /// [ExpenseStore::is_loading] is true for the duration of the fetch.
    /// Returns whether the fetch succeeded; on failure the previous
    /// collection is kept and [ExpenseStore::error] is set.
    pub async fn refresh_expenses(&mut self) -> bool {
        self.loading = true;
        self.error = None;

        let result = self.repository.get_all().await;
        self.loading = false;

        match result {
            Ok(expenses) => {
                self.expenses = expenses;
                true
            }
            Err(error) => {
                self.set_error(error, FETCH_FAILED);
                false
            }
        }
    }

    /// Record a failed action in the error slot.
    ///
    /// A missing expense is surfaced as-is; anything else is logged and
    /// replaced with the generic per-action message.
    fn set_error(&mut self, error: Error, fallback: &str) {
        self.error = match error {
            Error::NotFound => Some(error.to_string()),
            error => {
                tracing::error!("expense operation failed: {error}");
                Some(fallback.to_string())
            }
        };
    }
}
