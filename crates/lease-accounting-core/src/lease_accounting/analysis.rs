//! Full pipeline run for one lease: metrics, schedule, journal entries and
//! summary totals wrapped in the standard computation envelope.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::{amortization_schedule_from_metrics, ScheduleRow};
use super::journal::{journal_entries_for, JournalEntry};
use super::terms::LeaseTerms;
use super::valuation::{calculate_lease_metrics, LeaseMetrics};
use crate::error::LeaseAccountingError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LeaseResult;

/// Totals over the whole schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseSummary {
    /// Undiscounted sum of all payments
    pub total_lease_payments: Money,
    /// Sum of monthly interest expense
    pub total_interest_expense: Money,
    /// Sum of monthly ROU amortization
    pub total_rou_amortization: Money,
    /// Liability left after the final month
    pub residual_lease_liability: Money,
    /// ROU asset left after the final month
    pub residual_rou_asset: Money,
    /// Initial entry plus two per month
    pub journal_entry_count: usize,
}

/// Everything the engine produces for one snapshot of lease terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseAnalysis {
    pub lease_name: String,
    pub metrics: LeaseMetrics,
    pub summary: LeaseSummary,
    pub amortization_schedule: Vec<ScheduleRow>,
    pub journal_entries: Vec<JournalEntry>,
}

/// Run the complete ASC 842 pipeline for a lessee.
pub fn analyze_lease(terms: &LeaseTerms) -> LeaseResult<ComputationOutput<LeaseAnalysis>> {
    let start = Instant::now();

    let metrics = calculate_lease_metrics(terms)?;
    let schedule = amortization_schedule_from_metrics(terms, &metrics)?;
    let journal_entries = journal_entries_for(terms, &metrics, &schedule);
    let summary = summarize(&schedule, journal_entries.len())?;
    let warnings = collect_warnings(terms, &metrics, &schedule, &summary);

    let analysis = LeaseAnalysis {
        lease_name: terms.lease_name.clone(),
        metrics,
        summary,
        amortization_schedule: schedule,
        journal_entries,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "ASC 842 lessee measurement: ordinary-annuity PV, effective-interest liability, straight-line ROU",
        terms,
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn summarize(schedule: &[ScheduleRow], journal_entry_count: usize) -> LeaseResult<LeaseSummary> {
    let last = schedule.last();
    Ok(LeaseSummary {
        total_lease_payments: checked_total(schedule, "total_lease_payments", |r| r.payment)?,
        total_interest_expense: checked_total(schedule, "total_interest_expense", |r| {
            r.interest_expense
        })?,
        total_rou_amortization: checked_total(schedule, "total_rou_amortization", |r| {
            r.rou_asset_amortization
        })?,
        residual_lease_liability: last.map_or(Decimal::ZERO, |r| r.ending_lease_liability),
        residual_rou_asset: last.map_or(Decimal::ZERO, |r| r.ending_rou_asset),
        journal_entry_count,
    })
}

fn checked_total(
    schedule: &[ScheduleRow],
    field: &str,
    amount: impl Fn(&ScheduleRow) -> Money,
) -> LeaseResult<Money> {
    schedule
        .iter()
        .try_fold(Decimal::ZERO, |acc, row| acc.checked_add(amount(row)))
        .ok_or_else(|| LeaseAccountingError::InvalidInput {
            field: field.to_string(),
            reason: "Schedule total overflows".into(),
        })
}

fn collect_warnings(
    terms: &LeaseTerms,
    metrics: &LeaseMetrics,
    schedule: &[ScheduleRow],
    summary: &LeaseSummary,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if terms.monthly_payment.is_zero() {
        warnings.push("Monthly payment is zero; no lease liability is recognized".to_string());
    }
    if !summary.residual_lease_liability.is_zero() {
        warnings.push(format!(
            "Lease liability of {} remains after the final month due to cent rounding",
            summary.residual_lease_liability
        ));
    }
    if metrics.initial_right_of_use_asset < Decimal::ZERO {
        warnings.push(format!(
            "Lease incentives exceed the ROU basis; initial ROU asset is {}",
            metrics.initial_right_of_use_asset
        ));
    }
    if let Some(last) = schedule.last() {
        let recognized = last.beginning_rou_asset - last.ending_rou_asset;
        if last.ending_rou_asset.is_zero() && recognized < last.rou_asset_amortization {
            warnings.push(format!(
                "Final month ROU amortization of {} exceeds the remaining asset of {}; balance floored at zero",
                last.rou_asset_amortization, last.beginning_rou_asset
            ));
        }
    }

    warnings
}
