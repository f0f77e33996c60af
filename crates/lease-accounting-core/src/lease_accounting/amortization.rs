//! Month-by-month amortization: effective-interest method for the lease
//! liability, straight-line for the right-of-use asset.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::term::schedule_date;
use super::terms::LeaseTerms;
use super::valuation::{calculate_lease_metrics, LeaseMetrics};
use crate::error::LeaseAccountingError;
use crate::time_value::monthly_rate;
use crate::types::{round_to_cents, Money};
use crate::LeaseResult;

/// A single month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month number (1-indexed)
    pub month: u32,
    /// Start date advanced by `month - 1` months
    pub date: NaiveDate,
    /// Lease liability at start of month
    pub beginning_lease_liability: Money,
    /// Interest on the beginning liability
    pub interest_expense: Money,
    /// Payment made this month
    pub payment: Money,
    /// Payment less interest
    pub principal: Money,
    /// Lease liability at end of month, floored at zero
    pub ending_lease_liability: Money,
    /// ROU asset at start of month
    pub beginning_rou_asset: Money,
    /// Straight-line ROU amortization for the month
    pub rou_asset_amortization: Money,
    /// ROU asset at end of month, floored at zero
    pub ending_rou_asset: Money,
}

/// Build the full schedule for a lease, one row per month of the term.
pub fn build_amortization_schedule(terms: &LeaseTerms) -> LeaseResult<Vec<ScheduleRow>> {
    let metrics = calculate_lease_metrics(terms)?;
    amortization_schedule_from_metrics(terms, &metrics)
}

/// Build the schedule from metrics the caller already holds.
///
/// Every amount is rounded to cents before it is carried into the next
/// month, so the final liability settles near zero rather than exactly on it.
pub fn amortization_schedule_from_metrics(
    terms: &LeaseTerms,
    metrics: &LeaseMetrics,
) -> LeaseResult<Vec<ScheduleRow>> {
    if metrics.term_months == 0 {
        return Err(LeaseAccountingError::DegenerateTerm { term_months: 0 });
    }

    let rate = monthly_rate(terms.annual_discount_rate);
    let payment = terms.monthly_payment;
    let rou_amortization = metrics.monthly_amortization_expense;

    let mut schedule = Vec::with_capacity(metrics.term_months as usize);
    let mut liability = metrics.initial_lease_liability;
    let mut rou = metrics.initial_right_of_use_asset;

    for month in 1..=metrics.term_months {
        let interest = round_to_cents(liability * rate);
        let principal = round_to_cents(payment - interest);
        let ending_liability = round_to_cents(liability - principal).max(Decimal::ZERO);
        let ending_rou = round_to_cents(rou - rou_amortization).max(Decimal::ZERO);

        schedule.push(ScheduleRow {
            month,
            date: schedule_date(terms.start_date, month)?,
            beginning_lease_liability: liability,
            interest_expense: interest,
            payment,
            principal,
            ending_lease_liability: ending_liability,
            beginning_rou_asset: rou,
            rou_asset_amortization: rou_amortization,
            ending_rou_asset: ending_rou,
        });

        liability = ending_liability;
        rou = ending_rou;
    }

    Ok(schedule)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
