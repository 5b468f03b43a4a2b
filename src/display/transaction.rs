//! Transaction display formatting
//!
//! Formats the transaction list as a table and single transactions as a
//! detail block for terminal output.

use chrono::{DateTime, Local, Utc};
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::{is_valid_date_format, DEFAULT_DATE_FORMAT};
use crate::models::Transaction;

/// One row of the transaction table
#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format transactions as a table, numbered from 1 in list order
pub fn format_transaction_table<'a, I>(transactions: I, symbol: &str, date_format: &str) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let rows: Vec<TransactionRow> = transactions
        .into_iter()
        .enumerate()
        .map(|(i, txn)| TransactionRow {
            position: i + 1,
            id: txn.id.short(),
            date: format_timestamp(&txn.created_at, date_format),
            description: truncate(&txn.description, 32),
            category: txn.category.to_string(),
            amount: txn.amount.format_with_symbol(symbol),
        })
        .collect();

    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()));
    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "Date:        {}\n",
        format_timestamp(&txn.created_at, date_format)
    ));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    if let Some(kind) = txn.kind() {
        output.push_str(&format!("Type:        {}\n", kind));
    }

    output
}

/// Format a timestamp in local time; an unusable format falls back to the default
fn format_timestamp(instant: &DateTime<Utc>, date_format: &str) -> String {
    let date_format = if is_valid_date_format(date_format) {
        date_format
    } else {
        DEFAULT_DATE_FORMAT
    };
    instant.with_timezone(&Local).format(date_format).to_string()
}

/// Truncate a string to a maximum length, adding an ellipsis if needed
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
