//! Initial measurement: present value of the payment stream, lease
//! liability and right-of-use asset at commencement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::term::term_in_months;
use super::terms::LeaseTerms;
use crate::error::LeaseAccountingError;
use crate::time_value::{annuity_present_value, monthly_rate};
use crate::types::{round_to_cents, Money, Rate};
use crate::LeaseResult;

/// Summary measurements derived from one snapshot of lease terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseMetrics {
    /// Lease term in whole months
    pub term_months: u32,
    /// PV of the monthly payments, discounted at the monthly rate
    pub present_value_of_lease_payments: Money,
    /// Lease liability at commencement (equals the PV)
    pub initial_lease_liability: Money,
    /// ROU asset at commencement
    pub initial_right_of_use_asset: Money,
    /// Straight-line ROU amortization per month
    pub monthly_amortization_expense: Money,
}

/// Present value of `periods` end-of-month payments, rounded to cents.
///
/// The annual rate must lie in [0, 1]; outside that range, or when the
/// compounding factor cannot be represented, the rate is rejected.
pub fn present_value(payment: Money, annual_rate: Rate, periods: u32) -> LeaseResult<Money> {
    if annual_rate < Decimal::ZERO || annual_rate > Decimal::ONE {
        return Err(LeaseAccountingError::InvalidRate {
            rate: annual_rate,
            reason: "Annual discount rate must be between 0 and 1".into(),
        });
    }

    // Report the annual rate the caller passed, not the derived monthly one
    let pv = annuity_present_value(monthly_rate(annual_rate), periods, payment).map_err(
        |e| match e {
            LeaseAccountingError::InvalidRate { reason, .. } => LeaseAccountingError::InvalidRate {
                rate: annual_rate,
                reason,
            },
            other => other,
        },
    )?;
    Ok(round_to_cents(pv))
}

/// Resolve the term, discount the payments and derive the initial balances.
pub fn calculate_lease_metrics(terms: &LeaseTerms) -> LeaseResult<LeaseMetrics> {
    let resolved = term_in_months(terms.start_date, terms.end_date);
    if resolved <= 0 {
        return Err(LeaseAccountingError::DegenerateTerm {
            term_months: resolved,
        });
    }
    let term_months = resolved as u32;

    let pv = present_value(
        terms.monthly_payment,
        terms.annual_discount_rate,
        term_months,
    )?;
    let initial_lease_liability = pv;

    let initial_right_of_use_asset = initial_lease_liability
        .checked_add(terms.prepaid_rent)
        .and_then(|v| v.checked_add(terms.initial_direct_costs))
        .and_then(|v| v.checked_sub(terms.lease_incentives))
        .map(round_to_cents)
        .ok_or_else(|| LeaseAccountingError::InvalidInput {
            field: "initial_right_of_use_asset".into(),
            reason: "Liability plus prepaid rent and direct costs overflows".into(),
        })?;
    let monthly_amortization_expense =
        round_to_cents(initial_right_of_use_asset / Decimal::from(term_months));

    Ok(LeaseMetrics {
        term_months,
        present_value_of_lease_payments: pv,
        initial_lease_liability,
        initial_right_of_use_asset,
        monthly_amortization_expense,
    })
}
