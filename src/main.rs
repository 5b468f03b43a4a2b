use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_tracker::cli::{
    handle_report_command, handle_transaction_command, ReportCommands, TransactionCommands,
};
use budget_tracker::config::{BudgetPaths, RolloverPolicy, Settings};
use budget_tracker::models::MonthTag;
use budget_tracker::services::{Ledger, Rollover};
use budget_tracker::storage::open_file_store;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Personal budget tracker",
    long_about = "Record income and expenses, search your history and see \
                  where the money goes, all stored locally."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config {
        /// Set the currency prefix used when printing amounts
        #[arg(long)]
        currency: Option<String>,
        /// Set the monthly rollover policy (disabled, clear-on-new-month)
        #[arg(long)]
        rollover: Option<RolloverPolicy>,
    },
}

fn main() -> Result<()> {
    budget_tracker::init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut ledger = Ledger::new(open_file_store(&paths)?, settings.rollover_policy);
    let report = ledger.refresh(MonthTag::current());
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
    if let Rollover::Cleared { removed } = report.rollover {
        println!("New month: cleared {} transactions from last month", removed);
    }

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&mut ledger, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&ledger, &settings, cmd)?;
        }
        Some(Commands::Config { currency, rollover }) => {
            if currency.is_some() || rollover.is_some() {
                if let Some(currency) = currency {
                    settings.currency_symbol = currency;
                }
                if let Some(rollover) = rollover {
                    settings.rollover_policy = rollover;
                }
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            println!("Budget Tracker Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {:?}", settings.currency_symbol);
            println!("  Rollover policy: {:?}", settings.rollover_policy);
            println!("  Date format:     {}", settings.date_format);
            if let Some(month) = ledger.month_tag() {
                println!("  Current month:   {}", month);
            }
        }
        None => {
            println!("Budget Tracker - personal income and expense ledger");
            println!();
            println!("Run 'budget --help' for usage information.");
        }
    }

    Ok(())
}
