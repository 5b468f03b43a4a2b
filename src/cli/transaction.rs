//! Transaction CLI commands
//!
//! Implements CLI commands for recording, listing, editing and deleting
//! transactions.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_summary, format_transaction_details, format_transaction_table};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, TransactionId, TransactionInput, TransactionKind};
use crate::services::{Ledger, PersistenceWarning, TransactionFilter};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// What the money was for
        description: String,
        /// Amount without sign (e.g. "500" or "1,250.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Record as income (default is expense)
        #[arg(short, long, conflicts_with = "expense")]
        income: bool,
        /// Record as expense
        #[arg(short, long)]
        expense: bool,
    },
    /// List transactions, newest first
    List {
        /// Case-insensitive text to look for in descriptions
        #[arg(short, long)]
        search: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only income or only expenses
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionKind>,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID or list position
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID or list position
        id: String,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// Make it income
        #[arg(short, long, conflicts_with = "expense")]
        income: bool,
        /// Make it an expense
        #[arg(short, long)]
        expense: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID or list position
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Delete every transaction
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    ledger: &mut Ledger,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgetResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            category,
            income,
            expense: _,
        } => {
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            let input = TransactionInput::new(description, amount, category, kind);
            let update = ledger.add_transaction(&input)?;
            report_warnings(&update.warnings);

            if let Some(txn) = update.affected.and_then(|id| ledger.get(id)) {
                println!("Added transaction:");
                print!("{}", format_transaction_details(txn, symbol, &settings.date_format));
            }
            println!();
            print!("{}", format_summary(&update.summary, symbol));
        }

        TransactionCommands::List {
            search,
            category,
            kind,
            limit,
        } => {
            let mut criteria = TransactionFilter::new();
            if let Some(text) = search {
                criteria = criteria.search(text);
            }
            if let Some(category) = category.as_deref().and_then(Category::parse) {
                criteria = criteria.category(category);
            }
            if let Some(kind) = kind {
                criteria = criteria.kind(kind);
            }

            let view = ledger.filtered(&criteria);
            let shown = limit.unwrap_or(view.len());
            print!(
                "{}",
                format_transaction_table(
                    view.iter().take(shown),
                    symbol,
                    &settings.date_format
                )
            );
            if shown < view.len() {
                println!("Showing {} of {} transactions", shown, view.len());
            }
        }

        TransactionCommands::Show { id } => {
            let id = resolve_transaction(ledger, &id)?;
            if let Some(txn) = ledger.get(id) {
                print!("{}", format_transaction_details(txn, symbol, &settings.date_format));
            }
        }

        TransactionCommands::Edit {
            id,
            description,
            amount,
            category,
            income,
            expense,
        } => {
            let id = resolve_transaction(ledger, &id)?;
            let mut input = TransactionInput::from_transaction(ledger.begin_edit_by_id(id)?);

            if let Some(description) = description {
                input.description = description;
            }
            if let Some(amount) = amount {
                input.amount = amount;
            }
            if let Some(category) = category {
                input.category = category;
            }
            if income {
                input.kind = TransactionKind::Income;
            } else if expense {
                input.kind = TransactionKind::Expense;
            }

            let result = ledger.add_transaction(&input);
            ledger.cancel_edit();
            let update = result?;
            report_warnings(&update.warnings);

            if let Some(txn) = ledger.get(id) {
                println!("Updated transaction:");
                print!("{}", format_transaction_details(txn, symbol, &settings.date_format));
            }
        }

        TransactionCommands::Delete { id, force } => {
            let id = resolve_transaction(ledger, &id)?;

            if !force {
                if let Some(txn) = ledger.get(id) {
                    println!("About to delete transaction:");
                    print!("{}", format_transaction_details(txn, symbol, &settings.date_format));
                }
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let update = ledger.delete_by_id(id)?;
            report_warnings(&update.warnings);
            println!("Deleted transaction: {}", id.short());
            println!();
            print!("{}", format_summary(&update.summary, symbol));
        }

        TransactionCommands::Clear { force } => {
            if !force {
                println!(
                    "About to delete all {} transactions. This cannot be undone.",
                    ledger.len()
                );
                println!("Use --force to confirm");
                return Ok(());
            }

            let removed = ledger.len();
            let update = ledger.clear_all();
            report_warnings(&update.warnings);
            println!("Deleted {} transactions", removed);
        }
    }

    Ok(())
}

/// Resolve a full id, a short `txn-` id or a 1-based list position
pub fn resolve_transaction(ledger: &Ledger, identifier: &str) -> BudgetResult<TransactionId> {
    if let Ok(position) = identifier.trim().parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| ledger.transactions().get(index))
            .map(|t| t.id)
            .ok_or_else(|| BudgetError::index_out_of_range(position, ledger.len()));
    }

    ledger
        .find_id(identifier)
        .ok_or_else(|| BudgetError::transaction_not_found(identifier))
}

pub(crate) fn report_warnings(warnings: &[PersistenceWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RolloverPolicy;
    use crate::storage::MemoryBackend;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::open(MemoryBackend::new(), RolloverPolicy::Disabled);
        for name in ["a", "b", "c"] {
            ledger
                .add_transaction(&TransactionInput::expense(name, "10", "Food"))
                .unwrap();
        }
        ledger
    }

    #[test]
    fn test_resolve_by_position() {
        let ledger = ledger();
        let id = resolve_transaction(&ledger, "1").unwrap();
        assert_eq!(ledger.get(id).unwrap().description, "c");
        assert!(resolve_transaction(&ledger, "0").unwrap_err().is_not_found());
        assert!(resolve_transaction(&ledger, "4").unwrap_err().is_not_found());
    }

    #[test]
    fn test_resolve_by_id() {
        let ledger = ledger();
        let target = ledger.transactions()[1].id;
        assert_eq!(resolve_transaction(&ledger, &target.short()).unwrap(), target);
        assert_eq!(resolve_transaction(&ledger, &target.to_string()).unwrap(), target);
        assert!(resolve_transaction(&ledger, "txn-zzzz").is_err());
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let mut ledger = ledger();
        let settings = Settings::default();
        let target = ledger.transactions()[2].id;

        handle_transaction_command(
            &mut ledger,
            &settings,
            TransactionCommands::Edit {
                id: target.to_string(),
                description: None,
                amount: Some("42".into()),
                category: None,
                income: false,
                expense: false,
            },
        )
        .unwrap();

        let edited = ledger.get(target).unwrap();
        assert_eq!(edited.description, "a");
        assert_eq!(edited.amount, crate::models::Money::from_major(-42));
        assert_eq!(ledger.transactions()[2].id, target);
    }

    #[test]
    fn test_failed_edit_closes_session() {
        let mut ledger = ledger();
        let settings = Settings::default();

        let err = handle_transaction_command(
            &mut ledger,
            &settings,
            TransactionCommands::Edit {
                id: "2".into(),
                description: Some("  ".into()),
                amount: None,
                category: None,
                income: false,
                expense: false,
            },
        )
        .unwrap_err();

        assert!(err.is_validation());
        assert!(!ledger.edit_session().is_active());
    }

    #[test]
    fn test_delete_requires_force() {
        let mut ledger = ledger();
        let settings = Settings::default();

        handle_transaction_command(
            &mut ledger,
            &settings,
            TransactionCommands::Delete {
                id: "1".into(),
                force: false,
            },
        )
        .unwrap();
        assert_eq!(ledger.len(), 3);

        handle_transaction_command(
            &mut ledger,
            &settings,
            TransactionCommands::Delete {
                id: "1".into(),
                force: true,
            },
        )
        .unwrap();
        assert_eq!(ledger.len(), 2);
    }
}
