//! Export module for the budget tracker
//!
//! CSV export of the transaction list (spreadsheet-compatible).

pub mod csv;

pub use self::csv::export_transactions_csv;
