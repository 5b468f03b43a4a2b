//! Core data models for the budget tracker
//!
//! Transactions, their ids, categories, the money type used for every
//! amount and the month tags used by the rollover.

pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use category::Category;
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use month::MonthTag;
pub use transaction::{
    InputField, Transaction, TransactionInput, TransactionKind, TransactionValidationError,
    ValidatedInput,
};
