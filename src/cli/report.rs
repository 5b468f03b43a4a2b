//! Report CLI commands
//!
//! Balance summary, category chart and CSV export.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_chart, format_summary};
use crate::error::{BudgetError, BudgetResult};
use crate::export::export_transactions_csv;
use crate::services::{chart_slices, Ledger};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Show income, expenses, balance and spending by category
    Summary,
    /// Show the spending-by-category chart
    Chart,
    /// Export all transactions to CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    ledger: &Ledger,
    settings: &Settings,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary => {
            print!("{}", format_summary(&ledger.summary(), symbol));
        }

        ReportCommands::Chart => {
            let summary = ledger.summary();
            print!(
                "{}",
                format_chart(&chart_slices(&summary.category_totals), symbol)
            );
        }

        ReportCommands::Export { output } => match output {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    BudgetError::Export(format!("cannot create {}: {}", path.display(), e))
                })?;
                let count = export_transactions_csv(ledger.transactions(), BufWriter::new(file))?;
                println!("Exported {} transactions to {}", count, path.display());
            }
            None => {
                export_transactions_csv(ledger.transactions(), io::stdout().lock())?;
            }
        },
    }

    Ok(())
}
