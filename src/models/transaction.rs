//! Transaction model
//!
//! A transaction is a signed amount with a description and a category. The
//! sign of the amount is the only record of whether it is income or an
//! expense.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Apply this kind's sign to an amount, ignoring the amount's own sign
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount.abs(),
            Self::Expense => -amount.abs(),
        }
    }

    /// Classify an amount by its sign; zero has no kind
    pub fn of(amount: Money) -> Option<Self> {
        if amount.is_positive() {
            Some(Self::Income)
        } else if amount.is_negative() {
            Some(Self::Expense)
        } else {
            None
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Stable identifier; records written before ids existed get a fresh one
    #[serde(default)]
    pub id: TransactionId,

    pub description: String,

    /// Signed amount (positive for income, negative for expense)
    pub amount: Money,

    pub category: Category,

    /// Set once when the transaction is first recorded
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction stamped with the current time
    pub fn new(description: impl Into<String>, amount: Money, category: Category) -> Self {
        Self {
            id: TransactionId::new(),
            description: description.into(),
            amount,
            category,
            created_at: Utc::now(),
        }
    }

    /// Build a transaction from validated input
    pub fn from_input(input: ValidatedInput) -> Self {
        Self::new(input.description, input.amount, input.category)
    }

    /// Replace the editable fields, keeping id and creation time
    pub fn apply(&mut self, input: ValidatedInput) {
        self.description = input.description;
        self.amount = input.amount;
        self.category = input.category;
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        TransactionKind::of(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.description, self.category, self.amount)
    }
}

/// Raw form input for a new or edited transaction
///
/// `amount` is kept as text so a non-numeric entry can be reported against
/// the amount field rather than failing earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub kind: TransactionKind,
}

impl TransactionInput {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            kind,
        }
    }

    /// Shorthand for an expense entry
    pub fn expense(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self::new(description, amount, category, TransactionKind::Expense)
    }

    /// Shorthand for an income entry
    pub fn income(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self::new(description, amount, category, TransactionKind::Income)
    }

    /// Prefill a form from an existing transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            description: txn.description.clone(),
            amount: txn.amount.abs().to_string(),
            category: txn.category.name().to_string(),
            kind: txn.kind().unwrap_or(TransactionKind::Expense),
        }
    }

    /// Check every field and normalize the amount's sign by `kind`
    ///
    /// Fields are checked in form order, so the first offending field is
    /// the one reported.
    pub fn validate(&self) -> Result<ValidatedInput, TransactionValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        let raw = self.amount.trim();
        if raw.is_empty() {
            return Err(TransactionValidationError::InvalidAmount(String::new()));
        }
        let amount = Money::parse(raw)
            .map_err(|_| TransactionValidationError::InvalidAmount(raw.to_string()))?;
        if !amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(raw.to_string()));
        }
        if !amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge(raw.to_string()));
        }

        let category = Category::parse(&self.category)
            .ok_or(TransactionValidationError::EmptyCategory)?;

        Ok(ValidatedInput {
            description: description.to_string(),
            amount: self.kind.signed(amount),
            category,
        })
    }
}

/// Input that passed validation, with its amount already signed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub description: String,
    pub amount: Money,
    pub category: Category,
}

/// Form field a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Description,
    Amount,
    Category,
}

/// Validation errors for transaction input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionValidationError {
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Amount '{0}' is not a number")]
    InvalidAmount(String),
    #[error("Amount '{0}' must be greater than zero")]
    NonPositiveAmount(String),
    #[error("Amount '{0}' is too large")]
    AmountTooLarge(String),
    #[error("Category cannot be empty")]
    EmptyCategory,
}

impl TransactionValidationError {
    /// The form field to highlight
    pub fn field(&self) -> InputField {
        match self {
            Self::EmptyDescription => InputField::Description,
            Self::InvalidAmount(_) | Self::NonPositiveAmount(_) | Self::AmountTooLarge(_) => {
                InputField::Amount
            }
            Self::EmptyCategory => InputField::Category,
        }
    }
}
