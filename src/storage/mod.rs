//! Storage layer for the budget tracker
//!
//! Key/value backends with atomic file writes, and the transaction store
//! that keeps the in-memory list and its persisted copy in step.

pub mod backend;
pub mod file_io;
pub mod transactions;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use file_io::{read_if_exists, write_atomic};
pub use transactions::{TransactionStore, MONTH_KEY, TRANSACTIONS_KEY};

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Open the file-backed store under the configured data directory
pub fn open_file_store(paths: &BudgetPaths) -> Result<TransactionStore, BudgetError> {
    paths.ensure_directories()?;
    Ok(TransactionStore::open(FileBackend::new(paths.data_dir())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_file_store_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = open_file_store(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(store.is_empty());
    }
}
