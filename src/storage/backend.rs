//! Durable key/value backends
//!
//! The ledger persists a handful of string values under fixed keys, the
//! same shape as browser local storage. `FileBackend` keeps one JSON file
//! per key; `MemoryBackend` keeps everything in process and can be told to
//! refuse writes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{BudgetError, BudgetResult};

use super::file_io::{read_if_exists, write_atomic};

/// Abstraction over durable storage holding string values by key
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was stored
    fn read(&self, key: &str) -> BudgetResult<Option<String>>;

    /// Replace the value under `key` in a single step
    ///
    /// Failures are reported as `BudgetError::PersistenceUnavailable`.
    fn write(&self, key: &str, contents: &str) -> BudgetResult<()>;
}

/// Stores each key as `<data_dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> BudgetResult<Option<String>> {
        read_if_exists(self.path_for(key))
    }

    fn write(&self, key: &str, contents: &str) -> BudgetResult<()> {
        write_atomic(self.path_for(key), contents)
            .map_err(|e| BudgetError::PersistenceUnavailable(format!("{}: {}", key, e)))
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    values: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
    reject_writes: AtomicBool,
}

/// In-process backend; clones share the same underlying map
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing the write counter
    pub fn with_value(self, key: &str, contents: &str) -> Self {
        if let Ok(mut values) = self.state.values.write() {
            values.insert(key.to_string(), contents.to_string());
        }
        self
    }

    /// Make subsequent writes fail as if storage were full
    pub fn set_reject_writes(&self, reject: bool) {
        self.state.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.state.writes.load(Ordering::SeqCst)
    }

    /// Current raw value for a key
    pub fn raw(&self, key: &str) -> Option<String> {
        self.state
            .values
            .read()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> BudgetResult<Option<String>> {
        let values = self
            .state
            .values
            .read()
            .map_err(|e| BudgetError::Io(format!("Failed to acquire read lock: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> BudgetResult<()> {
        if self.state.reject_writes.load(Ordering::SeqCst) {
            return Err(BudgetError::PersistenceUnavailable(format!(
                "{}: storage quota exceeded",
                key
            )));
        }

        let mut values = self.state.values.write().map_err(|e| {
            BudgetError::PersistenceUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        values.insert(key.to_string(), contents.to_string());
        self.state.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
