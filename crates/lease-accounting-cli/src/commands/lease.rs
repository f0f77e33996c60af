use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use lease_accounting_core::lease_accounting::{
    amortization_schedule_from_metrics, analyze_lease, calculate_lease_metrics,
    generate_journal_entries, present_value, validate_lease_terms, LeaseTerms,
};
use lease_accounting_core::ledger::{regenerate_journal_entries, InMemoryJournalStore};

use crate::input;

/// Lease terms, from flags, a JSON file or piped stdin
#[derive(Args)]
pub struct LeaseArgs {
    /// Lease name
    #[arg(long)]
    pub name: Option<String>,

    /// Commencement date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), after the start date
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Fixed monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Annual discount rate (e.g. 0.05 for 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Rent paid before commencement
    #[arg(long)]
    pub prepaid_rent: Option<Decimal>,

    /// Initial direct costs
    #[arg(long)]
    pub initial_direct_costs: Option<Decimal>,

    /// Lease incentives receivable
    #[arg(long)]
    pub lease_incentives: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for journal entry generation
#[derive(Args)]
pub struct JournalEntriesArgs {
    #[command(flatten)]
    pub lease: LeaseArgs,

    /// Emit storage records (generated id + this lease id) instead of bare entries
    #[arg(long)]
    pub lease_id: Option<String>,
}

/// Arguments for a standalone present value calculation
#[derive(Args)]
pub struct PresentValueArgs {
    /// Fixed monthly payment
    #[arg(long)]
    pub payment: Decimal,

    /// Annual discount rate (e.g. 0.05 for 5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Number of monthly periods
    #[arg(long)]
    pub periods: u32,
}

pub fn run_lease_metrics(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args)?;
    let metrics = calculate_lease_metrics(&terms)?;
    tracing::debug!(
        term_months = metrics.term_months,
        liability = %metrics.initial_lease_liability,
        "lease metrics computed"
    );
    Ok(serde_json::to_value(metrics)?)
}

pub fn run_amortization_schedule(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args)?;
    let metrics = calculate_lease_metrics(&terms)?;
    let schedule = amortization_schedule_from_metrics(&terms, &metrics)?;
    tracing::debug!(rows = schedule.len(), "amortization schedule built");
    Ok(serde_json::to_value(schedule)?)
}

pub fn run_journal_entries(
    args: JournalEntriesArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args.lease)?;

    if let Some(lease_id) = args.lease_id {
        let mut store = InMemoryJournalStore::new();
        let stored = regenerate_journal_entries(&mut store, &lease_id, &terms)?;
        tracing::debug!(lease_id = %lease_id, entries = stored.len(), "journal records generated");
        return Ok(serde_json::to_value(stored)?);
    }

    let entries = generate_journal_entries(&terms)?;
    tracing::debug!(entries = entries.len(), "journal entries generated");
    Ok(serde_json::to_value(entries)?)
}

pub fn run_lease_analysis(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args)?;
    let result = analyze_lease(&terms)?;
    for warning in &result.warnings {
        tracing::warn!(lease = %terms.lease_name, "{warning}");
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_present_value(args: PresentValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pv = present_value(args.payment, args.rate, args.periods)?;
    Ok(json!({
        "present_value": pv,
        "monthly_payment": args.payment,
        "annual_discount_rate": args.rate,
        "periods": args.periods,
    }))
}

/// Read terms from `--input`, stdin or flags, then apply the input rules
/// before anything reaches the engine.
fn resolve_terms(args: LeaseArgs) -> Result<LeaseTerms, Box<dyn std::error::Error>> {
    let terms: LeaseTerms = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin_json()? {
        piped
    } else {
        LeaseTerms {
            lease_name: args.name.ok_or("--name is required (or provide --input)")?,
            start_date: args.start.ok_or("--start is required (or provide --input)")?,
            end_date: args.end.ok_or("--end is required (or provide --input)")?,
            monthly_payment: args
                .payment
                .ok_or("--payment is required (or provide --input)")?,
            annual_discount_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            prepaid_rent: args.prepaid_rent.unwrap_or(Decimal::ZERO),
            initial_direct_costs: args.initial_direct_costs.unwrap_or(Decimal::ZERO),
            lease_incentives: args.lease_incentives.unwrap_or(Decimal::ZERO),
        }
    };

    validate_lease_terms(&terms)?;
    tracing::debug!(lease = %terms.lease_name, start = %terms.start_date, end = %terms.end_date, "lease terms accepted");
    Ok(terms)
}
