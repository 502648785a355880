//! This file defines the fixed set of expense categories and the category
//! filter used by the summary views.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The kind of spending an expense records.
///
/// The set is fixed; user-defined categories are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, restaurants and takeaways.
    Food,
    /// Public transport, fuel and ride shares.
    Transport,
    /// Movies, concerts, games and the like.
    Entertainment,
    /// Clothes, gadgets and other purchases.
    Shopping,
    /// Rent, power, internet and other recurring bills.
    Bills,
    /// Anything that does not fit the other categories.
    Other,
}

impl Category {
    /// Every category, in display order.
    ///
    /// Form widgets should build their category pickers from this list.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    /// The display name of the category, e.g. "Food".
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a category name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "entertainment" => Ok(Category::Entertainment),
            "shopping" => Ok(Category::Shopping),
            "bills" => Ok(Category::Bills),
            "other" => Ok(Category::Other),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// Selects which expenses a filtered view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Pass every expense.
    All,
    /// Pass only expenses with the given category.
    Category(Category),
}

impl CategoryFilter {
    /// Whether an expense with `category` passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(wanted) => *wanted == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Category(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    /// Parse `"all"` or a category name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Category)
        }
    }
}
