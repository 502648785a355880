//! Spendlog is a local-first data layer for tracking personal expenses.
//!
//! The crate is layered the way the data flows:
//! - [ExpenseStorage] is the persistence port, keeping the whole collection
//!   as a single JSON document under a fixed key.
//! - [ExpenseRepository] exposes CRUD and query operations over the port,
//!   simulating the latency of a remote service.
//! - [ExpenseStore] holds the in-memory collection plus loading and error
//!   state, and is the single source of truth for presentation code.
//! - [summary] derives filtered, totalled and sorted views from the store's
//!   collection.

#![warn(missing_docs)]

mod category;
mod expense;
mod repository;
mod storage;
mod store;
pub mod summary;

pub use category::{Category, CategoryFilter};
pub use expense::{Expense, ExpenseId, ExpensePatch, NewExpense};
pub use repository::{ExpenseRepository, Latency};
pub use storage::{ExpenseStorage, JsonFileStorage, MemoryStorage, STORAGE_KEY, seed_expenses};
pub use store::ExpenseStore;

use time::Date;

/// The errors that may occur in the expense data layer.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used for an expense title.
    #[error("expense titles must not be empty")]
    EmptyTitle,

    /// A negative amount was used for an expense.
    #[error("expense amounts must not be negative")]
    NegativeAmount,

    /// A date in the future was used for an expense.
    ///
    /// Expenses record spending that has already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A string did not name one of the fixed expense categories.
    #[error("{0} is not a recognised expense category")]
    UnknownCategory(String),

    /// There was no expense with the requested ID.
    #[error("Expense not found")]
    NotFound,
}
