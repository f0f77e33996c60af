mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::lease::{JournalEntriesArgs, LeaseArgs, PresentValueArgs};

/// ASC 842 lease accounting calculations
#[derive(Parser)]
#[command(
    name = "lease842",
    version,
    about = "ASC 842 lease accounting calculations",
    long_about = "A CLI for ASC 842 lessee accounting with decimal precision. \
                  Computes lease metrics, month-by-month amortization schedules \
                  and balanced journal entries from a set of lease terms."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log pipeline progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lease term, present value, initial liability and ROU asset
    LeaseMetrics(LeaseArgs),
    /// Month-by-month liability and ROU asset schedule
    AmortizationSchedule(LeaseArgs),
    /// Initial recognition and monthly journal entries
    JournalEntries(JournalEntriesArgs),
    /// Full analysis: metrics, schedule, journal entries and totals
    LeaseAnalysis(LeaseArgs),
    /// Present value of a fixed monthly payment stream
    PresentValue(PresentValueArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::LeaseMetrics(args) => commands::lease::run_lease_metrics(args),
        Commands::AmortizationSchedule(args) => commands::lease::run_amortization_schedule(args),
        Commands::JournalEntries(args) => commands::lease::run_journal_entries(args),
        Commands::LeaseAnalysis(args) => commands::lease::run_lease_analysis(args),
        Commands::PresentValue(args) => commands::lease::run_present_value(args),
        Commands::Version => {
            println!("lease842 {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
