//! Transaction store
//!
//! Owns the canonical ordered list of transactions and its persisted copy.
//! The list is never sorted here: order is whatever the caller built with
//! `prepend`, `append` and `replace_at`.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{MonthTag, Transaction, TransactionId};

use super::backend::StorageBackend;

/// Storage key for the transaction list
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Storage key for the month the ledger was last refreshed in
pub const MONTH_KEY: &str = "ledger_month";

/// Ordered transaction list backed by durable storage
pub struct TransactionStore {
    backend: Box<dyn StorageBackend>,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Create an empty store; nothing is read until `load`
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            transactions: Vec::new(),
        }
    }

    /// Create a store and load whatever is persisted
    pub fn open(backend: impl StorageBackend + 'static) -> Self {
        let mut store = Self::new(backend);
        store.load();
        store
    }

    /// Replace the in-memory list with the persisted one
    ///
    /// Never fails: missing, unreadable or malformed data yields an empty
    /// list and a warning in the log.
    pub fn load(&mut self) -> &[Transaction] {
        self.transactions = match self.backend.read(TRANSACTIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Option<Vec<Transaction>>>(&raw) {
                Ok(list) => dedupe_ids(list.unwrap_or_default()),
                Err(e) => {
                    warn!(error = %e, "persisted transactions are malformed; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read persisted transactions; starting empty");
                Vec::new()
            }
        };

        debug!(count = self.transactions.len(), "loaded transactions");
        &self.transactions
    }

    /// Serialize the full list and overwrite the persisted copy
    pub fn save(&self) -> BudgetResult<()> {
        let json = serde_json::to_string(&self.transactions)?;
        self.backend.write(TRANSACTIONS_KEY, &json)?;
        debug!(count = self.transactions.len(), "saved transactions");
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Current position of the transaction with this id
    pub fn position_of(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    pub fn get_by_id(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Add at the end of the list
    pub fn append(&mut self, txn: Transaction) {
        self.transactions.push(txn);
    }

    /// Add at the front of the list (newest first)
    pub fn prepend(&mut self, txn: Transaction) {
        self.transactions.insert(0, txn);
    }

    pub fn remove_at(&mut self, index: usize) -> BudgetResult<Transaction> {
        if index >= self.transactions.len() {
            return Err(BudgetError::index_out_of_range(index, self.transactions.len()));
        }
        Ok(self.transactions.remove(index))
    }

    /// Swap in a new record at `index`, returning the one it replaced
    pub fn replace_at(&mut self, index: usize, txn: Transaction) -> BudgetResult<Transaction> {
        let len = self.transactions.len();
        let slot = self
            .transactions
            .get_mut(index)
            .ok_or_else(|| BudgetError::index_out_of_range(index, len))?;
        Ok(std::mem::replace(slot, txn))
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    /// Month tag recorded by the last rollover check, if any
    pub fn load_month_tag(&self) -> Option<MonthTag> {
        match self.backend.read(MONTH_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(tag) => Some(tag),
                Err(e) => {
                    warn!(error = %e, "persisted month tag is malformed; ignoring it");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not read persisted month tag");
                None
            }
        }
    }

    pub fn save_month_tag(&self, tag: MonthTag) -> BudgetResult<()> {
        let json = serde_json::to_string(&tag)?;
        self.backend.write(MONTH_KEY, &json)
    }
}

/// Give a fresh id to any record whose id was already seen
fn dedupe_ids(mut list: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::with_capacity(list.len());
    for txn in &mut list {
        if !seen.insert(txn.id) {
            warn!(id = %txn.id, "duplicate transaction id in persisted data; reassigning");
            txn.id = TransactionId::new();
            seen.insert(txn.id);
        }
    }
    list
}
