//! Lease terms record and the input rules a write path enforces before
//! handing terms to the engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LeaseAccountingError;
use crate::types::{Money, Rate};
use crate::LeaseResult;

const MAX_LEASE_NAME_CHARS: usize = 100;

/// Lease terms as captured at inception. The engine only reads this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseTerms {
    /// Display name of the lease
    pub lease_name: String,
    /// Commencement date
    pub start_date: NaiveDate,
    /// Final date of the lease (strictly after commencement)
    pub end_date: NaiveDate,
    /// Fixed payment made at the end of every month
    pub monthly_payment: Money,
    /// Annual discount rate (incremental borrowing rate), 0.05 = 5%
    pub annual_discount_rate: Rate,
    /// Rent paid before commencement
    #[serde(default)]
    pub prepaid_rent: Money,
    /// Initial direct costs paid in cash at commencement
    #[serde(default)]
    pub initial_direct_costs: Money,
    /// Incentives receivable from the lessor
    #[serde(default)]
    pub lease_incentives: Money,
}

impl LeaseTerms {
    /// Terms with no prepaid rent, direct costs or incentives.
    pub fn new(
        lease_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        monthly_payment: Money,
        annual_discount_rate: Rate,
    ) -> Self {
        Self {
            lease_name: lease_name.into(),
            start_date,
            end_date,
            monthly_payment,
            annual_discount_rate,
            prepaid_rent: Decimal::ZERO,
            initial_direct_costs: Decimal::ZERO,
            lease_incentives: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Business rules a caller applies before invoking the engine.
///
/// The calculation functions never call this themselves; they assume the
/// rules already hold.
pub fn validate_lease_terms(terms: &LeaseTerms) -> LeaseResult<()> {
    let name = terms.lease_name.trim();
    if name.is_empty() {
        return Err(LeaseAccountingError::InvalidInput {
            field: "lease_name".into(),
            reason: "Lease name is required".into(),
        });
    }
    if name.chars().count() > MAX_LEASE_NAME_CHARS {
        return Err(LeaseAccountingError::InvalidInput {
            field: "lease_name".into(),
            reason: format!("Lease name must be at most {MAX_LEASE_NAME_CHARS} characters"),
        });
    }
    if terms.end_date <= terms.start_date {
        return Err(LeaseAccountingError::InvalidInput {
            field: "end_date".into(),
            reason: "End date must be after start date".into(),
        });
    }
    if terms.monthly_payment <= Decimal::ZERO {
        return Err(LeaseAccountingError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment must be positive".into(),
        });
    }
    if terms.annual_discount_rate < Decimal::ZERO || terms.annual_discount_rate > Decimal::ONE {
        return Err(LeaseAccountingError::InvalidInput {
            field: "annual_discount_rate".into(),
            reason: "Discount rate must be between 0 and 1".into(),
        });
    }

    let optional_costs = [
        ("prepaid_rent", terms.prepaid_rent),
        ("initial_direct_costs", terms.initial_direct_costs),
        ("lease_incentives", terms.lease_incentives),
    ];
    for (field, value) in optional_costs {
        if value < Decimal::ZERO {
            return Err(LeaseAccountingError::InvalidInput {
                field: field.into(),
                reason: "Amount cannot be negative".into(),
            });
        }
    }

    Ok(())
}
