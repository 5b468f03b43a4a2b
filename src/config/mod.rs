//! Configuration module for the budget tracker
//!
//! - Platform path resolution with an environment override
//! - User settings persistence, including the monthly rollover policy

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::{is_valid_date_format, RolloverPolicy, Settings, DEFAULT_DATE_FORMAT};
