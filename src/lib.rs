//! budget-tracker - personal income and expense ledger
//!
//! This library provides the core of a personal budget tracker: an ordered
//! transaction ledger with durable local storage, and the pure aggregation
//! and filtering that turn it into balances, category totals and chart
//! slices.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, categories, ids)
//! - `storage`: Key/value backends and the transaction store
//! - `services`: Aggregation, filtering and the ledger controller
//! - `display`: Terminal formatting
//! - `export`: CSV export
//! - `cli`: Command handlers for the `budget` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::config::RolloverPolicy;
//! use budget_tracker::models::TransactionInput;
//! use budget_tracker::services::Ledger;
//! use budget_tracker::storage::MemoryBackend;
//!
//! let mut ledger = Ledger::open(MemoryBackend::new(), RolloverPolicy::Disabled);
//! let update = ledger.add_transaction(&TransactionInput::expense("Lunch", "500", "Food"))?;
//! println!("balance: {}", update.summary.balance);
//! ```

use std::sync::Once;

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};

static TRACING_INIT: Once = Once::new();

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "budget_tracker=warn";

/// Install the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` overrides the default filter. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
