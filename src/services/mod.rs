//! Service layer for the budget tracker
//!
//! Pure aggregation and filtering over the transaction list, and the
//! ledger controller that owns the list and drives persistence.

pub mod filter;
pub mod ledger;
pub mod summary;

pub use filter::{filter, FilteredView, TransactionFilter};
pub use ledger::{
    EditSession, Ledger, LedgerUpdate, PersistenceWarning, Rollover, RolloverReport,
};
pub use summary::{
    chart_slices, summarize, CategoryTotal, CategoryTotals, ChartSlice, Summary, CHART_PALETTE,
};
