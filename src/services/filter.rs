//! Transaction filtering for list views
//!
//! Filters borrow from the full list and never reorder it. A filtered view
//! maps its positions back to transactions by id, since positions in the
//! view do not line up with positions in the store.

use crate::models::{Category, Transaction, TransactionId, TransactionKind};

/// Criteria for narrowing the transaction list; all set criteria must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description; empty matches all
    pub search_text: String,
    pub category: Option<Category>,
    pub kind: Option<TransactionKind>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.category.is_none() && self.kind.is_none()
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_search(txn) && self.matches_category(txn) && self.matches_kind(txn)
    }

    fn matches_search(&self, txn: &Transaction) -> bool {
        self.search_text.is_empty()
            || txn
                .description
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }

    fn matches_category(&self, txn: &Transaction) -> bool {
        self.category.as_ref().map_or(true, |c| &txn.category == c)
    }

    fn matches_kind(&self, txn: &Transaction) -> bool {
        match self.kind {
            None => true,
            Some(TransactionKind::Income) => txn.amount.is_positive(),
            Some(TransactionKind::Expense) => txn.amount.is_negative(),
        }
    }
}

/// Transactions that passed a filter, in their original relative order
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    items: Vec<&'a Transaction>,
}

impl<'a> FilteredView<'a> {
    pub fn as_slice(&self) -> &[&'a Transaction] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&'a Transaction> {
        self.items.get(position).copied()
    }

    /// Identity of the transaction shown at `position`
    pub fn id_at(&self, position: usize) -> Option<TransactionId> {
        self.get(position).map(|t| t.id)
    }

    pub fn ids(&self) -> Vec<TransactionId> {
        self.items.iter().map(|t| t.id).collect()
    }

    /// Clone the surviving transactions into an owned list
    pub fn to_owned_list(&self) -> Vec<Transaction> {
        self.items.iter().map(|t| (*t).clone()).collect()
    }
}

impl<'a> IntoIterator for FilteredView<'a> {
    type Item = &'a Transaction;
    type IntoIter = std::vec::IntoIter<&'a Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Keep the transactions matching every criterion in `criteria`
pub fn filter<'a>(transactions: &'a [Transaction], criteria: &TransactionFilter) -> FilteredView<'a> {
    FilteredView {
        items: transactions.iter().filter(|t| criteria.matches(t)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn txn(description: &str, major: i64, category: Category) -> Transaction {
        Transaction::new(description, Money::from_major(major), category)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("Lunch at cafe", -500, Category::Food),
            txn("Monthly salary", 50000, Category::Salary),
            txn("Groceries", -2300, Category::Food),
            txn("LUNCH refund", 500, Category::Food),
            txn("Bus fare", -80, Category::Transportation),
        ]
    }

    fn descriptions(view: &FilteredView<'_>) -> Vec<String> {
        view.iter().map(|t| t.description.clone()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let list = sample();
        let view = filter(&list, &TransactionFilter::new());
        assert_eq!(view.len(), list.len());
        assert!(TransactionFilter::new().is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let list = sample();
        let view = filter(&list, &TransactionFilter::new().search("lunch"));
        assert_eq!(descriptions(&view), ["Lunch at cafe", "LUNCH refund"]);
    }

    #[test]
    fn test_category_exact_match() {
        let list = sample();
        let view = filter(&list, &TransactionFilter::new().category(Category::Food));
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|t| t.category == Category::Food));
    }

    #[test]
    fn test_kind_filters_by_sign() {
        let list = sample();
        let income = filter(&list, &TransactionFilter::new().kind(TransactionKind::Income));
        assert_eq!(descriptions(&income), ["Monthly salary", "LUNCH refund"]);

        let expense = filter(&list, &TransactionFilter::new().kind(TransactionKind::Expense));
        assert!(expense.iter().all(|t| t.amount.is_negative()));
        assert_eq!(expense.len(), 3);
    }

    #[test]
    fn test_criteria_are_anded() {
        let list = sample();
        let criteria = TransactionFilter::new()
            .search("lunch")
            .category(Category::Food)
            .kind(TransactionKind::Expense);
        let view = filter(&list, &criteria);
        assert_eq!(descriptions(&view), ["Lunch at cafe"]);
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let list = sample();
        let view = filter(&list, &TransactionFilter::new().category(Category::Food));

        let mut cursor = list.iter();
        for kept in view.iter() {
            assert!(cursor.any(|t| t.id == kept.id));
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let list = sample();
        let criteria = TransactionFilter::new().search("a").kind(TransactionKind::Expense);
        let once = filter(&list, &criteria).to_owned_list();
        let twice = filter(&once, &criteria).to_owned_list();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_id_at_maps_back_to_store() {
        let list = sample();
        let view = filter(&list, &TransactionFilter::new().kind(TransactionKind::Income));

        let id = view.id_at(1).unwrap();
        let position = list.iter().position(|t| t.id == id).unwrap();
        assert_eq!(position, 3);
        assert_eq!(view.id_at(2), None);
    }

    #[test]
    fn test_no_match_is_empty() {
        let list = sample();
        let view = filter(&list, &TransactionFilter::new().search("rent"));
        assert!(view.is_empty());
        assert!(view.ids().is_empty());
    }
}
