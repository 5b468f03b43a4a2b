//! Ledger controller
//!
//! `Ledger` is the only thing that mutates the transaction store. Every
//! mutation is followed by a save, and every successful operation hands
//! back a freshly computed `Summary`.
//!
//! A failed save never fails the operation: the in-memory list stays
//! authoritative for the session and the caller gets a
//! `PersistenceWarning` to show.

use tracing::{debug, info, warn};

use crate::config::RolloverPolicy;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{MonthTag, Transaction, TransactionId, TransactionInput, ValidatedInput};
use crate::storage::{StorageBackend, TransactionStore};

use super::filter::{filter, FilteredView, TransactionFilter};
use super::summary::{summarize, Summary};

/// The transaction currently open for editing, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(TransactionId),
}

impl EditSession {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn target(&self) -> Option<TransactionId> {
        match self {
            Self::Idle => None,
            Self::Editing(id) => Some(*id),
        }
    }
}

/// A save that did not reach durable storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceWarning {
    pub message: String,
}

impl From<BudgetError> for PersistenceWarning {
    fn from(err: BudgetError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for PersistenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "changes kept in memory only: {}", self.message)
    }
}

/// Result of a successful ledger mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerUpdate {
    pub summary: Summary,
    /// Id of the transaction created, updated or deleted
    pub affected: Option<TransactionId>,
    pub warnings: Vec<PersistenceWarning>,
}

impl LedgerUpdate {
    pub fn is_persisted(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// What a month check did to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    /// Still the same month
    Unchanged,
    /// Month changed (or was never recorded); history kept
    Retagged,
    /// Month changed and the policy wiped the list
    Cleared { removed: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloverReport {
    pub rollover: Rollover,
    pub summary: Summary,
    pub warnings: Vec<PersistenceWarning>,
}

/// Owned transaction list plus the active edit session
pub struct Ledger {
    store: TransactionStore,
    edit: EditSession,
    policy: RolloverPolicy,
    month: Option<MonthTag>,
}

impl Ledger {
    /// Wrap an already loaded store
    pub fn new(store: TransactionStore, policy: RolloverPolicy) -> Self {
        let month = store.load_month_tag();
        Self {
            store,
            edit: EditSession::Idle,
            policy,
            month,
        }
    }

    /// Load the ledger persisted in `backend`
    pub fn open(backend: impl StorageBackend + 'static, policy: RolloverPolicy) -> Self {
        Self::new(TransactionStore::open(backend), policy)
    }

    /// All transactions, newest first
    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.store.get_by_id(id)
    }

    pub fn summary(&self) -> Summary {
        summarize(self.store.transactions())
    }

    pub fn filtered(&self, criteria: &TransactionFilter) -> FilteredView<'_> {
        filter(self.store.transactions(), criteria)
    }

    pub fn policy(&self) -> RolloverPolicy {
        self.policy
    }

    pub fn month_tag(&self) -> Option<MonthTag> {
        self.month
    }

    pub fn edit_session(&self) -> EditSession {
        self.edit
    }

    /// Current list position of the transaction being edited
    pub fn edit_position(&self) -> Option<usize> {
        self.edit.target().and_then(|id| self.store.position_of(id))
    }

    /// The transaction being edited
    pub fn editing(&self) -> Option<&Transaction> {
        self.edit.target().and_then(|id| self.store.get_by_id(id))
    }

    /// Resolve a full id or a unique short prefix ("txn-1a2b3c4d")
    pub fn find_id(&self, identifier: &str) -> Option<TransactionId> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.store.get_by_id(id).map(|t| t.id);
        }

        let needle = identifier.trim();
        let needle = needle.strip_prefix("txn-").unwrap_or(needle).to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let mut matches = self
            .transactions()
            .iter()
            .filter(|t| t.id.as_uuid().simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Some(txn.id),
            _ => None,
        }
    }

    /// Record a new transaction, or finish the active edit
    ///
    /// With no edit open the transaction goes to the front of the list.
    /// With an edit open the edited transaction is rewritten in place and
    /// the session closes.
    pub fn add_transaction(&mut self, input: &TransactionInput) -> BudgetResult<LedgerUpdate> {
        let validated = input.validate()?;

        if let Some(id) = self.edit.target() {
            return self.apply_update(id, validated);
        }

        let txn = Transaction::from_input(validated);
        let id = txn.id;
        debug!(%id, amount = %txn.amount, category = %txn.category, "adding transaction");
        self.store.prepend(txn);

        Ok(self.finish(Some(id)))
    }

    /// Rewrite the editable fields of a transaction, keeping id, creation
    /// time and list position
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        input: &TransactionInput,
    ) -> BudgetResult<LedgerUpdate> {
        let validated = input.validate()?;
        self.apply_update(id, validated)
    }

    fn apply_update(
        &mut self,
        id: TransactionId,
        validated: ValidatedInput,
    ) -> BudgetResult<LedgerUpdate> {
        let index = match self.store.position_of(id) {
            Some(index) => index,
            None => {
                if self.edit.target() == Some(id) {
                    self.edit = EditSession::Idle;
                }
                return Err(BudgetError::transaction_not_found(id.to_string()));
            }
        };

        let mut updated = self.store.transactions()[index].clone();
        updated.apply(validated);
        self.store.replace_at(index, updated)?;
        debug!(%id, index, "updated transaction");

        if self.edit.target() == Some(id) {
            self.edit = EditSession::Idle;
        }

        Ok(self.finish(Some(id)))
    }

    /// Open the transaction at `index` for editing
    pub fn begin_edit(&mut self, index: usize) -> BudgetResult<&Transaction> {
        let len = self.store.len();
        let id = self
            .store
            .get(index)
            .map(|t| t.id)
            .ok_or_else(|| BudgetError::index_out_of_range(index, len))?;
        self.begin_edit_by_id(id)
    }

    pub fn begin_edit_by_id(&mut self, id: TransactionId) -> BudgetResult<&Transaction> {
        let txn = self
            .store
            .get_by_id(id)
            .ok_or_else(|| BudgetError::transaction_not_found(id.to_string()))?;
        self.edit = EditSession::Editing(id);
        debug!(%id, "editing transaction");
        Ok(txn)
    }

    /// Close the edit session without saving; safe to call when idle
    pub fn cancel_edit(&mut self) {
        self.edit = EditSession::Idle;
    }

    /// Remove the transaction at `index`
    ///
    /// The caller is responsible for having confirmed the deletion.
    pub fn delete_transaction(&mut self, index: usize) -> BudgetResult<LedgerUpdate> {
        let removed = self.store.remove_at(index)?;
        Ok(self.after_delete(removed))
    }

    pub fn delete_by_id(&mut self, id: TransactionId) -> BudgetResult<LedgerUpdate> {
        let index = self
            .store
            .position_of(id)
            .ok_or_else(|| BudgetError::transaction_not_found(id.to_string()))?;
        self.delete_transaction(index)
    }

    fn after_delete(&mut self, removed: Transaction) -> LedgerUpdate {
        debug!(id = %removed.id, "deleted transaction");
        // The session follows the id, so deleting some other row needs no
        // adjustment; only losing the edited row ends the session.
        if self.edit.target() == Some(removed.id) {
            self.edit = EditSession::Idle;
        }
        self.finish(Some(removed.id))
    }

    /// Delete every transaction
    pub fn clear_all(&mut self) -> LedgerUpdate {
        let removed = self.store.len();
        self.store.clear();
        self.edit = EditSession::Idle;
        info!(removed, "cleared all transactions");
        self.finish(None)
    }

    /// Apply the rollover policy when `now` is a different month from `current`
    ///
    /// The month tag is updated whenever the months differ; the list is
    /// only cleared under `RolloverPolicy::ClearOnNewMonth`.
    pub fn monthly_rollover(&mut self, current: MonthTag, now: MonthTag) -> RolloverReport {
        if current == now {
            let warnings = if self.month == Some(now) {
                Vec::new()
            } else {
                self.record_month(now).into_iter().collect()
            };
            return RolloverReport {
                rollover: Rollover::Unchanged,
                summary: self.summary(),
                warnings,
            };
        }

        let mut warnings = Vec::new();
        let rollover = if self.policy.clears_history() {
            let removed = self.store.len();
            self.store.clear();
            self.edit = EditSession::Idle;
            info!(%current, %now, removed, "new month; history cleared");
            warnings.extend(self.persist());
            Rollover::Cleared { removed }
        } else {
            debug!(%current, %now, "new month; history kept");
            Rollover::Retagged
        };

        warnings.extend(self.record_month(now));

        RolloverReport {
            rollover,
            summary: self.summary(),
            warnings,
        }
    }

    /// Per-refresh month check against the stored month tag
    ///
    /// The first refresh ever only records the month.
    pub fn refresh(&mut self, now: MonthTag) -> RolloverReport {
        match self.month {
            Some(current) => self.monthly_rollover(current, now),
            None => RolloverReport {
                rollover: Rollover::Retagged,
                warnings: self.record_month(now).into_iter().collect(),
                summary: self.summary(),
            },
        }
    }

    fn record_month(&mut self, now: MonthTag) -> Option<PersistenceWarning> {
        self.month = Some(now);
        match self.store.save_month_tag(now) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "could not persist month tag");
                Some(e.into())
            }
        }
    }

    fn persist(&self) -> Option<PersistenceWarning> {
        match self.store.save() {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "could not persist transactions; continuing in memory");
                Some(e.into())
            }
        }
    }

    fn finish(&self, affected: Option<TransactionId>) -> LedgerUpdate {
        LedgerUpdate {
            warnings: self.persist().into_iter().collect(),
            summary: self.summary(),
            affected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use crate::storage::{MemoryBackend, MONTH_KEY, TRANSACTIONS_KEY};

    fn ledger() -> (Ledger, MemoryBackend) {
        let backend = MemoryBackend::new();
        (Ledger::open(backend.clone(), RolloverPolicy::Disabled), backend)
    }

    fn add(ledger: &mut Ledger, description: &str, amount: &str) -> TransactionId {
        ledger
            .add_transaction(&TransactionInput::expense(description, amount, "Food"))
            .unwrap()
            .affected
            .unwrap()
    }

    /// Five expenses; index 0 is "e" (newest), index 4 is "a"
    fn ledger_with_five() -> (Ledger, MemoryBackend) {
        let (mut ledger, backend) = ledger();
        for name in ["a", "b", "c", "d", "e"] {
            add(&mut ledger, name, "10");
        }
        (ledger, backend)
    }

    fn month(year: i32, month: u32) -> MonthTag {
        MonthTag::new(year, month).unwrap()
    }

    #[test]
    fn test_lunch_and_salary_scenario() {
        let (mut ledger, _) = ledger();
        ledger
            .add_transaction(&TransactionInput::expense("Lunch", "500", "Food"))
            .unwrap();
        let update = ledger
            .add_transaction(&TransactionInput::income("Salary", "50000", "Salary"))
            .unwrap();

        assert_eq!(update.summary.income, Money::from_major(50000));
        assert_eq!(update.summary.expenses, Money::from_major(500));
        assert_eq!(update.summary.balance, Money::from_major(49500));
        assert_eq!(update.summary.category_totals.len(), 1);
        assert_eq!(
            update.summary.category_totals.get(&Category::Food),
            Some(Money::from_major(500))
        );
        assert!(update.is_persisted());
    }

    #[test]
    fn test_new_transactions_go_first() {
        let (ledger, _) = ledger_with_five();
        let names: Vec<_> = ledger
            .transactions()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(names, ["e", "d", "c", "b", "a"]);
    }

    #[test]
    fn test_empty_description_is_rejected_without_write() {
        let (mut ledger, backend) = ledger();
        let err = ledger
            .add_transaction(&TransactionInput::income("", "100", "Food"))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(ledger.is_empty());
        assert_eq!(backend.write_count(), 0);
        assert_eq!(backend.raw(TRANSACTIONS_KEY), None);
    }

    #[test]
    fn test_invalid_input_during_edit_keeps_session() {
        let (mut ledger, backend) = ledger_with_five();
        let writes = backend.write_count();
        ledger.begin_edit(2).unwrap();

        let err = ledger
            .add_transaction(&TransactionInput::expense("c", "zero", "Food"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.edit_position(), Some(2));
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn test_every_mutation_persists() {
        let (mut ledger, backend) = ledger();
        let id = add(&mut ledger, "Lunch", "500");
        assert_eq!(backend.write_count(), 1);

        ledger
            .update_transaction(id, &TransactionInput::expense("Dinner", "700", "Food"))
            .unwrap();
        assert_eq!(backend.write_count(), 2);

        ledger.delete_by_id(id).unwrap();
        assert_eq!(backend.write_count(), 3);

        ledger.clear_all();
        assert_eq!(backend.write_count(), 4);

        let reloaded = Ledger::open(backend, RolloverPolicy::Disabled);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_persisted_state_matches_memory() {
        let (mut ledger, backend) = ledger_with_five();
        ledger.delete_transaction(1).unwrap();

        let reloaded = Ledger::open(backend, RolloverPolicy::Disabled);
        assert_eq!(reloaded.transactions(), ledger.transactions());
    }

    #[test]
    fn test_edit_via_add_preserves_identity_and_position() {
        let (mut ledger, _) = ledger_with_five();
        let original = ledger.transactions()[2].clone();

        let prefill = TransactionInput::from_transaction(ledger.begin_edit(2).unwrap());
        assert_eq!(prefill.description, "c");

        let update = ledger
            .add_transaction(&TransactionInput::income("c (refund)", "25", "Shopping"))
            .unwrap();

        assert_eq!(ledger.len(), 5);
        assert_eq!(update.affected, Some(original.id));
        let edited = &ledger.transactions()[2];
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.description, "c (refund)");
        assert_eq!(edited.amount, Money::from_major(25));
        assert_eq!(edited.category, Category::Shopping);
        assert_eq!(ledger.edit_session(), EditSession::Idle);
    }

    #[test]
    fn test_begin_edit_out_of_range() {
        let (mut ledger, _) = ledger_with_five();
        assert!(ledger.begin_edit(5).unwrap_err().is_not_found());
        assert_eq!(ledger.edit_session(), EditSession::Idle);
        assert!(ledger
            .begin_edit_by_id(TransactionId::new())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_cancel_edit_is_idempotent() {
        let (mut ledger, _) = ledger_with_five();
        ledger.begin_edit(0).unwrap();
        ledger.cancel_edit();
        assert_eq!(ledger.edit_session(), EditSession::Idle);
        ledger.cancel_edit();
        assert_eq!(ledger.edit_session(), EditSession::Idle);

        // With no session, add inserts a new transaction again
        add(&mut ledger, "f", "1");
        assert_eq!(ledger.len(), 6);
    }

    #[test]
    fn test_delete_below_edit_shifts_position() {
        let (mut ledger, _) = ledger_with_five();
        let target = ledger.begin_edit(3).unwrap().id;

        ledger.delete_transaction(1).unwrap();

        assert_eq!(ledger.edit_position(), Some(2));
        assert_eq!(ledger.edit_session(), EditSession::Editing(target));
        assert_eq!(ledger.editing().unwrap().description, "b");

        ledger
            .add_transaction(&TransactionInput::expense("b edited", "11", "Food"))
            .unwrap();
        assert_eq!(ledger.transactions()[2].description, "b edited");
        assert_eq!(ledger.transactions()[2].id, target);
    }

    #[test]
    fn test_delete_edited_transaction_ends_session() {
        let (mut ledger, _) = ledger_with_five();
        ledger.begin_edit(2).unwrap();

        ledger.delete_transaction(2).unwrap();

        assert_eq!(ledger.edit_session(), EditSession::Idle);
        assert_eq!(ledger.edit_position(), None);
        // The next add creates a new transaction instead of editing
        add(&mut ledger, "new", "5");
        assert_eq!(ledger.len(), 5);
        assert_eq!(ledger.transactions()[0].description, "new");
    }

    #[test]
    fn test_delete_above_edit_leaves_position() {
        let (mut ledger, _) = ledger_with_five();
        ledger.begin_edit(1).unwrap();

        ledger.delete_transaction(3).unwrap();

        assert_eq!(ledger.edit_position(), Some(1));
        assert_eq!(ledger.editing().unwrap().description, "d");
    }

    #[test]
    fn test_delete_out_of_range() {
        let (mut ledger, backend) = ledger_with_five();
        let writes = backend.write_count();
        assert!(ledger.delete_transaction(9).unwrap_err().is_not_found());
        assert!(ledger
            .delete_by_id(TransactionId::new())
            .unwrap_err()
            .is_not_found());
        assert_eq!(ledger.len(), 5);
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn test_delete_from_filtered_view_targets_right_record() {
        let (mut ledger, _) = ledger();
        add(&mut ledger, "Rent", "1000");
        ledger
            .add_transaction(&TransactionInput::income("Salary", "5000", "Salary"))
            .unwrap();
        add(&mut ledger, "Lunch", "50");

        let id = ledger
            .filtered(&TransactionFilter::new().search("rent"))
            .id_at(0)
            .unwrap();
        ledger.delete_by_id(id).unwrap();

        let names: Vec<_> = ledger
            .transactions()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(names, ["Lunch", "Salary"]);
    }

    #[test]
    fn test_clear_all_scenario() {
        let (mut ledger, backend) = ledger();
        add(&mut ledger, "a", "1");
        add(&mut ledger, "b", "2");
        add(&mut ledger, "c", "3");
        ledger.begin_edit(1).unwrap();

        let update = ledger.clear_all();

        assert!(ledger.is_empty());
        assert_eq!(ledger.edit_session(), EditSession::Idle);
        assert_eq!(update.summary, Summary::default());
        assert_eq!(backend.raw(TRANSACTIONS_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_save_failure_is_a_warning() {
        let (mut ledger, backend) = ledger();
        add(&mut ledger, "saved", "1");
        backend.set_reject_writes(true);

        let update = ledger
            .add_transaction(&TransactionInput::expense("unsaved", "2", "Food"))
            .unwrap();

        assert!(!update.is_persisted());
        assert_eq!(update.warnings.len(), 1);
        assert_eq!(ledger.len(), 2);
        assert_eq!(update.summary.expenses, Money::from_major(3));

        // Ledger keeps working in memory
        ledger.delete_transaction(0).unwrap();
        assert_eq!(ledger.len(), 1);

        backend.set_reject_writes(false);
        let recovered = ledger.clear_all();
        assert!(recovered.is_persisted());
    }

    #[test]
    fn test_find_id_by_full_and_short_form() {
        let (mut ledger, _) = ledger();
        let id = add(&mut ledger, "Lunch", "5");

        assert_eq!(ledger.find_id(&id.to_string()), Some(id));
        assert_eq!(ledger.find_id(&id.short()), Some(id));
        assert_eq!(ledger.find_id(&TransactionId::new().to_string()), None);
        assert_eq!(ledger.find_id(""), None);
    }

    #[test]
    fn test_rollover_disabled_keeps_history() {
        let (mut ledger, backend) = ledger_with_five();
        let report = ledger.monthly_rollover(month(2026, 9), month(2026, 10));

        assert_eq!(report.rollover, Rollover::Retagged);
        assert_eq!(ledger.len(), 5);
        assert_eq!(ledger.month_tag(), Some(month(2026, 10)));
        assert!(backend.raw(MONTH_KEY).is_some());
    }

    #[test]
    fn test_rollover_clears_on_new_month() {
        let backend = MemoryBackend::new();
        let mut ledger = Ledger::open(backend.clone(), RolloverPolicy::ClearOnNewMonth);
        add(&mut ledger, "a", "1");
        add(&mut ledger, "b", "2");
        ledger.begin_edit(0).unwrap();

        let report = ledger.monthly_rollover(month(2026, 9), month(2026, 10));

        assert_eq!(report.rollover, Rollover::Cleared { removed: 2 });
        assert!(ledger.is_empty());
        assert_eq!(ledger.edit_session(), EditSession::Idle);
        assert!(report.warnings.is_empty());

        let reloaded = Ledger::open(backend, RolloverPolicy::ClearOnNewMonth);
        assert!(reloaded.is_empty());
        assert_eq!(reloaded.month_tag(), Some(month(2026, 10)));
    }

    #[test]
    fn test_rollover_same_month_is_noop() {
        let backend = MemoryBackend::new();
        let mut ledger = Ledger::open(backend.clone(), RolloverPolicy::ClearOnNewMonth);
        add(&mut ledger, "a", "1");
        ledger.refresh(month(2026, 10));
        let writes = backend.write_count();

        let report = ledger.monthly_rollover(month(2026, 10), month(2026, 10));

        assert_eq!(report.rollover, Rollover::Unchanged);
        assert_eq!(ledger.len(), 1);
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn test_same_month_tag_from_caller_is_persisted() {
        let backend = MemoryBackend::new();
        let mut ledger = Ledger::open(backend.clone(), RolloverPolicy::Disabled);
        assert_eq!(ledger.month_tag(), None);

        let report = ledger.monthly_rollover(month(2026, 10), month(2026, 10));

        assert_eq!(report.rollover, Rollover::Unchanged);
        assert!(report.warnings.is_empty());
        assert_eq!(ledger.month_tag(), Some(month(2026, 10)));
        let reopened = Ledger::open(backend, RolloverPolicy::Disabled);
        assert_eq!(reopened.month_tag(), Some(month(2026, 10)));
    }

    #[test]
    fn test_edit_through_add_rejects_then_accepts() {
        let (mut ledger, backend) = ledger_with_five();
        let target = ledger.begin_edit(1).unwrap().id;
        let writes = backend.write_count();

        let err = ledger
            .add_transaction(&TransactionInput::expense("d", "1e3", "Food"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(backend.write_count(), writes);

        let update = ledger
            .add_transaction(&TransactionInput::expense("d", "1,000", "Food"))
            .unwrap();
        assert_eq!(update.affected, Some(target));
        assert_eq!(backend.write_count(), writes + 1);
        assert_eq!(ledger.transactions()[1].amount, Money::from_major(-1000));
    }

    #[test]
    fn test_large_incomes_do_not_overflow() {
        let (mut ledger, backend) = ledger();
        let max = Money::MAX_AMOUNT.to_string();
        for _ in 0..3 {
            ledger
                .add_transaction(&TransactionInput::income("big", max.as_str(), "Salary"))
                .unwrap();
        }

        let too_big = ledger
            .add_transaction(&TransactionInput::income("bigger", "90000000000000000", "Salary"))
            .unwrap_err();
        assert!(too_big.is_validation());

        let summary = ledger.summary();
        assert_eq!(summary.income.cents(), Money::MAX_AMOUNT.cents() * 3);

        let reloaded = Ledger::open(backend, RolloverPolicy::Disabled);
        assert_eq!(reloaded.transactions(), ledger.transactions());
    }

    #[test]
    fn test_refresh_uses_stored_month() {
        let backend = MemoryBackend::new();
        let mut ledger = Ledger::open(backend.clone(), RolloverPolicy::ClearOnNewMonth);
        add(&mut ledger, "a", "1");

        // First refresh only records the month
        let first = ledger.refresh(month(2026, 10));
        assert_eq!(first.rollover, Rollover::Retagged);
        assert_eq!(ledger.len(), 1);

        let same = ledger.refresh(month(2026, 10));
        assert_eq!(same.rollover, Rollover::Unchanged);

        // A fresh session picks up the stored tag
        let mut reopened = Ledger::open(backend, RolloverPolicy::ClearOnNewMonth);
        let next = reopened.refresh(month(2026, 11));
        assert_eq!(next.rollover, Rollover::Cleared { removed: 1 });
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_rollover_across_years_with_same_month_number() {
        let backend = MemoryBackend::new();
        let mut ledger = Ledger::open(backend, RolloverPolicy::ClearOnNewMonth);
        add(&mut ledger, "a", "1");

        let report = ledger.monthly_rollover(month(2025, 10), month(2026, 10));
        assert_eq!(report.rollover, Rollover::Cleared { removed: 1 });
    }
}
