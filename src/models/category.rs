//! Transaction categories
//!
//! The tracker knows a fixed set of categories. Names outside the set are
//! kept verbatim as `Category::Custom` so older or hand-edited data still
//! loads; front ends render those with a generic icon.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A spending or income category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Rent,
    Utilities,
    Transportation,
    Entertainment,
    Healthcare,
    Shopping,
    Education,
    Salary,
    Investment,
    Others,
    /// A name outside the known set, stored as entered
    Custom(String),
}

impl Category {
    /// Every known category, in the order front ends list them
    pub const KNOWN: [Category; 11] = [
        Category::Food,
        Category::Rent,
        Category::Utilities,
        Category::Transportation,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Education,
        Category::Salary,
        Category::Investment,
        Category::Others,
    ];

    /// Parse a category name, matching known names case-insensitively
    ///
    /// Returns `None` for a blank name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let known = Self::KNOWN
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .cloned();
        Some(known.unwrap_or_else(|| Category::Custom(name.to_string())))
    }

    /// Display name, identical to the persisted form
    pub fn name(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Salary => "Salary",
            Category::Investment => "Investment",
            Category::Others => "Others",
            Category::Custom(name) => name,
        }
    }

    /// Whether this is one of the fixed categories
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Custom(_))
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        // Persisted names are kept even when blank so a bad record does not
        // fail the whole list; validation happens on input, not on load.
        Category::parse(&name).unwrap_or(Category::Custom(name))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
