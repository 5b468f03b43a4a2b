//! Aggregation of transactions into totals and chart data
//!
//! Everything here is a pure function of the transaction list. Totals are
//! recomputed from scratch on every call; nothing is cached or updated
//! incrementally.

use std::f64::consts::TAU;

use crate::models::{Category, Money, Transaction};

/// Fill colors for chart slices, reused cyclically
pub const CHART_PALETTE: [&str; 5] = ["#4CAF50", "#FF9800", "#F44336", "#2196F3", "#9C27B0"];

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    /// Sum of absolute expense amounts (always non-negative)
    pub total: Money,
    pub transaction_count: usize,
}

/// Expense totals per category, in the order each category first appears
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    fn add(&mut self, category: &Category, amount: Money) {
        match self.entries.iter_mut().find(|e| &e.category == category) {
            Some(entry) => {
                entry.total += amount;
                entry.transaction_count += 1;
            }
            None => self.entries.push(CategoryTotal {
                category: category.clone(),
                total: amount,
                transaction_count: 1,
            }),
        }
    }

    pub fn get(&self, category: &Category) -> Option<Money> {
        self.entries
            .iter()
            .find(|e| &e.category == category)
            .map(|e| e.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all categories
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.total).sum()
    }
}

/// Derived totals for a transaction list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    /// Sum of positive amounts
    pub income: Money,
    /// Sum of absolute negative amounts
    pub expenses: Money,
    /// `income - expenses`
    pub balance: Money,
    /// Expenses only; income never contributes
    pub category_totals: CategoryTotals,
}

/// Compute income, expenses, balance and per-category expense totals
pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Money::zero();
    let mut expenses = Money::zero();
    let mut category_totals = CategoryTotals::default();

    for txn in transactions {
        if txn.amount.is_positive() {
            income += txn.amount;
        } else if txn.amount.is_negative() {
            let spent = txn.amount.abs();
            expenses += spent;
            category_totals.add(&txn.category, spent);
        }
    }

    Summary {
        income,
        expenses,
        balance: income - expenses,
        category_totals,
    }
}

/// One wedge of the category pie chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub category: Category,
    pub value: Money,
    /// Radians, measured from the start of the first slice
    pub start_angle: f64,
    /// Radians covered by this slice
    pub sweep_angle: f64,
    /// Share of the total, 0-100
    pub percentage: f64,
    pub color: &'static str,
}

impl ChartSlice {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }
}

/// Lay out category totals as consecutive pie slices
///
/// Returns no slices when there is nothing to draw.
pub fn chart_slices(totals: &CategoryTotals) -> Vec<ChartSlice> {
    let total = totals.total();
    if !total.is_positive() {
        return Vec::new();
    }
    let total = total.as_f64();

    let mut start_angle = 0.0;
    totals
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let share = entry.total.as_f64() / total;
            let slice = ChartSlice {
                category: entry.category.clone(),
                value: entry.total,
                start_angle,
                sweep_angle: share * TAU,
                percentage: share * 100.0,
                color: CHART_PALETTE[i % CHART_PALETTE.len()],
            };
            start_angle += slice.sweep_angle;
            slice
        })
        .collect()
}
