//! Display formatting for terminal output
//!
//! Turns transactions, summaries and chart slices into text. Amounts are
//! always formatted with the configured currency symbol.

pub mod summary;
pub mod transaction;

pub use summary::{format_chart, format_summary};
pub use transaction::{format_transaction_details, format_transaction_table};
