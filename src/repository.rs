//! The expense repository: CRUD and query operations over the persistence
//! port, each simulating the latency of a call to a remote service.

use std::time::Duration;

use time::{Date, OffsetDateTime};

use crate::{Category, Error, Expense, ExpenseId, ExpensePatch, ExpenseStorage, NewExpense};

/// How long each repository operation waits before touching storage, standing
/// in for a real network boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// The delay for [ExpenseRepository::get_all], the heaviest call.
    pub get_all: Duration,
    /// The delay for create, update and delete.
    pub mutation: Duration,
    /// The delay for the read-only query operations.
    pub query: Duration,
}

impl Latency {
    /// No delay at all, for tests.
    pub fn none() -> Self {
        Self {
            get_all: Duration::ZERO,
            mutation: Duration::ZERO,
            query: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            get_all: Duration::from_millis(500),
            mutation: Duration::from_millis(300),
            query: Duration::from_millis(400),
        }
    }
}

/// CRUD and query operations for expenses.
///
/// Every operation is an independent round trip against the persistence
/// port: load the whole collection, change it, save the whole collection.
/// There is no batching and no transaction spanning calls, so when two
/// repositories share a storage location the last completed save wins.
pub struct ExpenseRepository<S> {
    storage: S,
    latency: Latency,
}

impl<S: ExpenseStorage> ExpenseRepository<S> {
    /// Create a repository over `storage` with the default latency.
    pub fn new(storage: S) -> Self {
        Self::with_latency(storage, Latency::default())
    }

    /// Create a repository over `storage` with a custom latency, e.g.
    /// [Latency::none] in tests.
    pub fn with_latency(storage: S, latency: Latency) -> Self {
        Self { storage, latency }
    }

    /// Fetch the whole expense collection.
    pub async fn get_all(&self) -> Result<Vec<Expense>, Error> {
        tokio::time::sleep(self.latency.get_all).await;

        Ok(self.storage.load())
    }

    /// Create an expense from `new_expense`, assign it a fresh ID and
    /// persist it.
    pub async fn create(&mut self, new_expense: NewExpense) -> Result<Expense, Error> {
        tokio::time::sleep(self.latency.mutation).await;

        let mut expenses = self.storage.load();
        let expense = new_expense.into_expense(next_id(&expenses));
        expenses.push(expense.clone());
        self.storage.save(&expenses);

        Ok(expense)
    }

    /// Merge `patch` onto the expense with `id` and persist the result.
    ///
    /// Fields left unset in the patch keep their current values, and the ID
    /// never changes.
    ///
    /// # Errors
    /// This function will return an [Error::NotFound] if no expense has `id`,
    /// or a validation error if the merged record would violate the expense
    /// invariants. Nothing is persisted in either case.
    pub async fn update(&mut self, id: &str, patch: &ExpensePatch) -> Result<Expense, Error> {
        tokio::time::sleep(self.latency.mutation).await;

        let mut expenses = self.storage.load();
        let Some(index) = expenses.iter().position(|expense| expense.id == id) else {
            return Err(Error::NotFound);
        };

        let merged = expenses[index].merged(patch);
        merged.validate()?;

        expenses[index] = merged.clone();
        self.storage.save(&expenses);

        Ok(merged)
    }

    /// Delete the expense with `id` and return the ID.
    ///
    /// Deleting an ID that does not exist is a successful no-op, so repeated
    /// deletes report success.
    pub async fn delete(&mut self, id: &str) -> Result<ExpenseId, Error> {
        tokio::time::sleep(self.latency.mutation).await;

        let mut expenses = self.storage.load();
        expenses.retain(|expense| expense.id != id);
        self.storage.save(&expenses);

        Ok(id.to_string())
    }

    /// Fetch the expenses with `category`, without mutating anything.
    pub async fn get_by_category(&self, category: Category) -> Result<Vec<Expense>, Error> {
        tokio::time::sleep(self.latency.query).await;

        Ok(self
            .storage
            .load()
            .into_iter()
            .filter(|expense| expense.category == category)
            .collect())
    }

    /// Fetch the expenses dated within `start..=end`, inclusive on both ends.
    pub async fn get_by_date_range(&self, start: Date, end: Date) -> Result<Vec<Expense>, Error> {
        tokio::time::sleep(self.latency.query).await;

        Ok(self
            .storage
            .load()
            .into_iter()
            .filter(|expense| start <= expense.date && expense.date <= end)
            .collect())
    }
}

/// A fresh ID derived from the current timestamp, bumped past any ID already
/// in the collection.
fn next_id(expenses: &[Expense]) -> ExpenseId {
    let mut timestamp = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

    while expenses.iter().any(|expense| expense.id == timestamp.to_string()) {
        timestamp += 1;
    }

    timestamp.to_string()
}

#[cfg(test)]
mod repository_tests {
    use time::macros::date;

    use crate::{
        Category, Error, ExpensePatch, ExpenseStorage, MemoryStorage, NewExpense, seed_expenses,
    };

    use super::{ExpenseRepository, Latency};

    fn repository() -> ExpenseRepository<MemoryStorage> {
        ExpenseRepository::with_latency(MemoryStorage::empty(), Latency::none())
    }

    fn new_expense() -> NewExpense {
        NewExpense::new("Coffee", 4.50, Category::Food, date!(2026 - 02 - 06)).unwrap()
    }

    #[tokio::test]
    async fn get_all_returns_seed_collection_on_first_fetch() {
        let repository = repository();

        let expenses = repository.get_all().await.unwrap();

        assert_eq!(expenses, seed_expenses());
    }

    #[tokio::test]
    async fn create_assigns_id_and_persists() {
        let mut repository = repository();

        let created = repository.create(new_expense()).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.title, "Coffee");
        assert_eq!(created.amount, 4.50);
        assert_eq!(created.category, Category::Food);
        assert_eq!(created.date, date!(2026 - 02 - 06));

        let expenses = repository.get_all().await.unwrap();
        assert_eq!(expenses.len(), seed_expenses().len() + 1);
        assert_eq!(expenses.last(), Some(&created));
    }

    #[tokio::test]
    async fn create_never_reuses_an_id() {
        let mut repository = repository();

        let first = repository.create(new_expense()).await.unwrap();
        let second = repository.create(new_expense()).await.unwrap();
        let third = repository.create(new_expense()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
        assert_ne!(first.id, third.id);
    }

    #[tokio::test]
    async fn update_merges_patch_and_keeps_unset_fields() {
        let mut repository = repository();
        let patch = ExpensePatch {
            amount: Some(90.00),
            ..Default::default()
        };

        let updated = repository.update("1", &patch).await.unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.amount, 90.00);
        assert_eq!(updated.title, "Grocery Shopping");
        assert_eq!(updated.category, Category::Food);
        assert_eq!(updated.date, date!(2026 - 02 - 08));

        let expenses = repository.get_all().await.unwrap();
        assert_eq!(expenses[0], updated);
    }

    #[tokio::test]
    async fn update_missing_expense_fails() {
        let mut repository = repository();

        let result = repository.update("999", &ExpensePatch::default()).await;

        assert_eq!(result, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn update_rejects_a_merge_that_breaks_the_invariants() {
        let mut repository = repository();
        let patch = ExpensePatch {
            amount: Some(-1.00),
            ..Default::default()
        };

        let result = repository.update("1", &patch).await;

        assert_eq!(result, Err(Error::NegativeAmount));
        assert_eq!(repository.get_all().await.unwrap(), seed_expenses());
    }

    #[tokio::test]
    async fn delete_removes_the_expense() {
        let mut repository = repository();

        let deleted_id = repository.delete("2").await.unwrap();

        assert_eq!(deleted_id, "2");
        let expenses = repository.get_all().await.unwrap();
        assert_eq!(expenses.len(), seed_expenses().len() - 1);
        assert!(expenses.iter().all(|expense| expense.id != "2"));
    }

    #[tokio::test]
    async fn delete_missing_expense_is_a_successful_noop() {
        let mut repository = repository();

        let result = repository.delete("999").await;

        assert_eq!(result, Ok("999".to_string()));
        assert_eq!(repository.get_all().await.unwrap(), seed_expenses());
    }

    #[tokio::test]
    async fn get_by_category_returns_only_matching_expenses() {
        let repository = repository();

        let expenses = repository.get_by_category(Category::Food).await.unwrap();

        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].title, "Grocery Shopping");
    }

    #[tokio::test]
    async fn get_by_date_range_includes_both_ends() {
        let repository = repository();

        let expenses = repository
            .get_by_date_range(date!(2026 - 02 - 05), date!(2026 - 02 - 08))
            .await
            .unwrap();

        // The seed expenses dated 2026-02-05 through 2026-02-08; the ride on
        // 2026-02-09 falls outside the range.
        let titles: Vec<&str> = expenses
            .iter()
            .map(|expense| expense.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["Grocery Shopping", "Movie Tickets", "Electric Bill"]
        );
    }

    #[tokio::test]
    async fn queries_do_not_mutate_the_collection() {
        let mut storage = MemoryStorage::empty();
        storage.save(&seed_expenses());
        let repository = ExpenseRepository::with_latency(storage, Latency::none());

        repository.get_by_category(Category::Bills).await.unwrap();
        repository
            .get_by_date_range(date!(2026 - 02 - 01), date!(2026 - 02 - 28))
            .await
            .unwrap();

        assert_eq!(repository.get_all().await.unwrap(), seed_expenses());
    }
}
