//! Summary and chart formatting
//!
//! Text renderings of the balance header, the per-category breakdown and
//! the category chart.

use crate::services::{ChartSlice, Summary};

const BAR_WIDTH: usize = 30;

/// Format income, expenses and balance
pub fn format_summary(summary: &Summary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Balance:  {:>16}\n",
        summary.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Income:   {:>16}\n",
        summary.income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Expenses: {:>16}\n",
        summary.expenses.format_with_symbol(symbol)
    ));

    if !summary.category_totals.is_empty() {
        output.push_str("\nSpending by category:\n");
        for entry in summary.category_totals.iter() {
            output.push_str(&format!(
                "  {:16} {:>16} ({})\n",
                entry.category.name(),
                entry.total.format_with_symbol(symbol),
                entry.transaction_count
            ));
        }
    }

    output
}

/// Format chart slices as horizontal bars, one per category
pub fn format_chart(slices: &[ChartSlice], symbol: &str) -> String {
    if slices.is_empty() {
        return "No expenses to chart.\n".to_string();
    }

    let mut output = String::new();
    for slice in slices {
        let filled = ((slice.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        output.push_str(&format!(
            "{:16} {}{} {:>5.1}% {:>16} {}\n",
            slice.category.name(),
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH.saturating_sub(filled)),
            slice.percentage,
            slice.value.format_with_symbol(symbol),
            slice.color
        ));
    }

    output
}
