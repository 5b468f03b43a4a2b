//! CSV export
//!
//! Writes the transaction list in list order, one row per transaction.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Transaction;

const HEADER: [&str; 6] = ["ID", "Description", "Category", "Type", "Amount", "Created At"];

/// Export transactions to CSV
///
/// Amounts are written signed with two decimals and no currency symbol so
/// spreadsheets read them as numbers.
pub fn export_transactions_csv<'a, I, W>(transactions: I, writer: W) -> BudgetResult<usize>
where
    I: IntoIterator<Item = &'a Transaction>,
    W: Write,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;

    let mut count = 0;
    for txn in transactions {
        let kind = txn.kind().map(|k| k.to_string()).unwrap_or_default();
        csv.write_record([
            txn.id.to_string(),
            txn.description.clone(),
            txn.category.to_string(),
            kind,
            txn.amount.to_string(),
            txn.created_at.to_rfc3339(),
        ])?;
        count += 1;
    }

    csv.flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(count)
}
