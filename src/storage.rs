//! The persistence port: durable storage of the expense collection as a
//! single serialized document under a fixed key.
//!
//! Storage failures never reach the rest of the crate. A missing or
//! unparsable document falls back to the seed collection, and a failed write
//! is logged and swallowed, leaving the in-memory state authoritative for
//! the rest of the session.

use std::{fs, io::ErrorKind, path::PathBuf};

use time::macros::date;

use crate::{Category, Expense};

/// The fixed key the expense collection is stored under.
pub const STORAGE_KEY: &str = "expenses.json";

/// Durable storage of the expense collection.
///
/// The model is read-modify-write over the whole document: every mutation in
/// the layers above loads the entire collection, changes it and saves the
/// entire collection back. There are no partial writes and no versioning.
pub trait ExpenseStorage {
    /// Return the stored collection, or the [seed collection](seed_expenses)
    /// when nothing usable is stored.
    fn load(&self) -> Vec<Expense>;

    /// Serialize and store the whole collection, replacing any prior value.
    fn save(&mut self, expenses: &[Expense]);
}

/// The four sample expenses used when no stored collection exists.
pub fn seed_expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: "1".to_string(),
            title: "Grocery Shopping".to_string(),
            amount: 85.50,
            category: Category::Food,
            date: date!(2026 - 02 - 08),
        },
        Expense {
            id: "2".to_string(),
            title: "Uber Ride".to_string(),
            amount: 25.00,
            category: Category::Transport,
            date: date!(2026 - 02 - 09),
        },
        Expense {
            id: "3".to_string(),
            title: "Movie Tickets".to_string(),
            amount: 30.00,
            category: Category::Entertainment,
            date: date!(2026 - 02 - 07),
        },
        Expense {
            id: "4".to_string(),
            title: "Electric Bill".to_string(),
            amount: 120.00,
            category: Category::Bills,
            date: date!(2026 - 02 - 05),
        },
    ]
}

fn parse_or_seed(text: &str) -> Vec<Expense> {
    match serde_json::from_str(text) {
        Ok(expenses) => expenses,
        Err(error) => {
            tracing::error!(
                "could not parse the stored expense collection, using seed data: {error}"
            );
            seed_expenses()
        }
    }
}

/// Stores the collection in a JSON file named [STORAGE_KEY] inside a data
/// directory.
///
/// The directory is created on the first save if it does not exist.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage backed by `data_dir`/[STORAGE_KEY].
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join(STORAGE_KEY),
        }
    }
}

impl ExpenseStorage for JsonFileStorage {
    fn load(&self) -> Vec<Expense> {
        match fs::read_to_string(&self.path) {
            Ok(text) => parse_or_seed(&text),
            Err(error) if error.kind() == ErrorKind::NotFound => seed_expenses(),
            Err(error) => {
                tracing::error!(
                    "could not read {}, using seed data: {error}",
                    self.path.display()
                );
                seed_expenses()
            }
        }
    }

    fn save(&mut self, expenses: &[Expense]) {
        let text = match serde_json::to_string_pretty(expenses) {
            Ok(text) => text,
            Err(error) => {
                tracing::error!("could not serialize the expense collection: {error}");
                return;
            }
        };

        if let Some(data_dir) = self.path.parent() {
            if let Err(error) = fs::create_dir_all(data_dir) {
                tracing::error!("could not create {}: {error}", data_dir.display());
                return;
            }
        }

        if let Err(error) = fs::write(&self.path, text) {
            tracing::error!("could not write {}: {error}", self.path.display());
        }
    }
}

/// An in-memory stand-in for durable storage.
///
/// Keeps the serialized document in a cell instead of on disk, so tests can
/// exercise the layers above without filesystem side effects.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    stored: Option<String>,
}

impl MemoryStorage {
    /// Storage with no stored document, so the first load returns the seed
    /// collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Storage pre-populated with an arbitrary raw document, which may be
    /// unparsable on purpose.
    pub fn with_raw(text: &str) -> Self {
        Self {
            stored: Some(text.to_string()),
        }
    }
}

impl ExpenseStorage for MemoryStorage {
    fn load(&self) -> Vec<Expense> {
        match &self.stored {
            Some(text) => parse_or_seed(text),
            None => seed_expenses(),
        }
    }

    fn save(&mut self, expenses: &[Expense]) {
        match serde_json::to_string(expenses) {
            Ok(text) => self.stored = Some(text),
            Err(error) => {
                tracing::error!("could not serialize the expense collection: {error}");
            }
        }
    }
}
