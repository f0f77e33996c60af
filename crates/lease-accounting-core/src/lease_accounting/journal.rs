//! Double-entry journal entries for initial recognition and each month of
//! the amortization schedule.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amortization::{amortization_schedule_from_metrics, ScheduleRow};
use super::terms::LeaseTerms;
use super::valuation::{calculate_lease_metrics, LeaseMetrics};
use crate::types::Money;
use crate::LeaseResult;

/// Largest debit/credit difference still treated as balanced.
pub const BALANCE_TOLERANCE: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The event a journal entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalEntryType {
    InitialRecognition,
    MonthlyAmortization,
    /// Reserved for lease modifications; never produced by this engine.
    Remeasurement,
}

/// Ledger accounts touched by lease postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaseAccount {
    #[serde(rename = "Right-of-Use Asset")]
    RightOfUseAsset,
    #[serde(rename = "Lease Liability")]
    LeaseLiability,
    #[serde(rename = "Prepaid Rent")]
    PrepaidRent,
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "Lease Incentives Receivable")]
    LeaseIncentivesReceivable,
    #[serde(rename = "Interest Expense")]
    InterestExpense,
    #[serde(rename = "Amortization Expense - ROU Asset")]
    AmortizationExpense,
    #[serde(rename = "Accumulated Amortization - ROU Asset")]
    AccumulatedAmortization,
}

impl LeaseAccount {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RightOfUseAsset => "Right-of-Use Asset",
            Self::LeaseLiability => "Lease Liability",
            Self::PrepaidRent => "Prepaid Rent",
            Self::Cash => "Cash",
            Self::LeaseIncentivesReceivable => "Lease Incentives Receivable",
            Self::InterestExpense => "Interest Expense",
            Self::AmortizationExpense => "Amortization Expense - ROU Asset",
            Self::AccumulatedAmortization => "Accumulated Amortization - ROU Asset",
        }
    }
}

impl fmt::Display for LeaseAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One debit or credit line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub account: LeaseAccount,
    pub amount: Money,
}

impl AccountEntry {
    pub fn new(account: LeaseAccount, amount: Money) -> Self {
        Self { account, amount }
    }
}

/// A ledger posting. Debits and credits keep their insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub entry_type: JournalEntryType,
    pub description: String,
    pub debits: Vec<AccountEntry>,
    pub credits: Vec<AccountEntry>,
}

impl JournalEntry {
    fn new(date: NaiveDate, entry_type: JournalEntryType, description: String) -> Self {
        Self {
            date,
            entry_type,
            description,
            debits: Vec::new(),
            credits: Vec::new(),
        }
    }

    fn debit(mut self, account: LeaseAccount, amount: Money) -> Self {
        self.debits.push(AccountEntry::new(account, amount));
        self
    }

    fn credit(mut self, account: LeaseAccount, amount: Money) -> Self {
        self.credits.push(AccountEntry::new(account, amount));
        self
    }

    fn debit_if_positive(self, account: LeaseAccount, amount: Money) -> Self {
        if amount > Decimal::ZERO {
            self.debit(account, amount)
        } else {
            self
        }
    }

    fn credit_if_positive(self, account: LeaseAccount, amount: Money) -> Self {
        if amount > Decimal::ZERO {
            self.credit(account, amount)
        } else {
            self
        }
    }

    pub fn total_debits(&self) -> Money {
        self.debits.iter().map(|d| d.amount).sum()
    }

    pub fn total_credits(&self) -> Money {
        self.credits.iter().map(|c| c.amount).sum()
    }

    /// Debits equal credits within [`BALANCE_TOLERANCE`].
    pub fn is_balanced(&self) -> bool {
        (self.total_debits() - self.total_credits()).abs() <= BALANCE_TOLERANCE
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Commencement entry recognizing the ROU asset and lease liability.
///
/// Debits: ROU asset, then incentives receivable. Credits: lease liability,
/// then prepaid rent, then cash for initial direct costs. Optional lines are
/// only written for positive amounts.
pub fn initial_recognition_entry(terms: &LeaseTerms, metrics: &LeaseMetrics) -> JournalEntry {
    JournalEntry::new(
        terms.start_date,
        JournalEntryType::InitialRecognition,
        format!("Initial recognition of lease: {}", terms.lease_name),
    )
    .debit(
        LeaseAccount::RightOfUseAsset,
        metrics.initial_right_of_use_asset,
    )
    .debit_if_positive(
        LeaseAccount::LeaseIncentivesReceivable,
        terms.lease_incentives,
    )
    .credit(LeaseAccount::LeaseLiability, metrics.initial_lease_liability)
    .credit_if_positive(LeaseAccount::PrepaidRent, terms.prepaid_rent)
    .credit_if_positive(LeaseAccount::Cash, terms.initial_direct_costs)
}

/// Two entries per schedule row: interest and payment, then ROU amortization.
pub fn monthly_entries(terms: &LeaseTerms, schedule: &[ScheduleRow]) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(schedule.len() * 2);

    for row in schedule {
        entries.push(
            JournalEntry::new(
                row.date,
                JournalEntryType::MonthlyAmortization,
                format!(
                    "Month {}: lease payment and interest - {}",
                    row.month, terms.lease_name
                ),
            )
            .debit(LeaseAccount::InterestExpense, row.interest_expense)
            .debit(LeaseAccount::LeaseLiability, row.principal)
            .credit(LeaseAccount::Cash, row.payment),
        );

        entries.push(
            JournalEntry::new(
                row.date,
                JournalEntryType::MonthlyAmortization,
                format!(
                    "Month {}: ROU asset amortization - {}",
                    row.month, terms.lease_name
                ),
            )
            .debit(LeaseAccount::AmortizationExpense, row.rou_asset_amortization)
            .credit(
                LeaseAccount::AccumulatedAmortization,
                row.rou_asset_amortization,
            ),
        );
    }

    entries
}

/// The initial recognition entry followed by every monthly entry.
pub fn generate_journal_entries(terms: &LeaseTerms) -> LeaseResult<Vec<JournalEntry>> {
    let metrics = calculate_lease_metrics(terms)?;
    let schedule = amortization_schedule_from_metrics(terms, &metrics)?;
    Ok(journal_entries_for(terms, &metrics, &schedule))
}

pub(crate) fn journal_entries_for(
    terms: &LeaseTerms,
    metrics: &LeaseMetrics,
    schedule: &[ScheduleRow],
) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(1 + schedule.len() * 2);
    entries.push(initial_recognition_entry(terms, metrics));
    entries.extend(monthly_entries(terms, schedule));
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn office_lease() -> LeaseTerms {
        LeaseTerms {
            lease_name: "HQ Office".into(),
            start_date: date(2024, 1, 1),
            end_date: date(2026, 12, 31),
            monthly_payment: dec!(5000),
            annual_discount_rate: dec!(0.05),
            prepaid_rent: dec!(1000),
            initial_direct_costs: dec!(500),
            lease_incentives: dec!(2000),
        }
    }

    fn accounts(lines: &[AccountEntry]) -> Vec<LeaseAccount> {
        lines.iter().map(|l| l.account).collect()
    }

    // -----------------------------------------------------------------------
    // 1. Initial recognition
    // -----------------------------------------------------------------------
    #[test]
    fn test_initial_entry_with_all_optional_lines() {
        let terms = office_lease();
        let metrics = calculate_lease_metrics(&terms).unwrap();
        let entry = initial_recognition_entry(&terms, &metrics);

        assert_eq!(entry.entry_type, JournalEntryType::InitialRecognition);
        assert_eq!(entry.date, terms.start_date);
        assert_eq!(
            entry.debits,
            vec![
                AccountEntry::new(LeaseAccount::RightOfUseAsset, dec!(162023.63)),
                AccountEntry::new(LeaseAccount::LeaseIncentivesReceivable, dec!(2000)),
            ]
        );
        assert_eq!(
            entry.credits,
            vec![
                AccountEntry::new(LeaseAccount::LeaseLiability, dec!(162523.63)),
                AccountEntry::new(LeaseAccount::PrepaidRent, dec!(1000)),
                AccountEntry::new(LeaseAccount::Cash, dec!(500)),
            ]
        );
        assert!(entry.is_balanced());
        assert!(entry.description.contains("HQ Office"));
    }

    #[test]
    fn test_initial_entry_omits_zero_optional_lines() {
        let mut terms = office_lease();
        terms.prepaid_rent = Decimal::ZERO;
        terms.initial_direct_costs = Decimal::ZERO;
        terms.lease_incentives = Decimal::ZERO;
        let metrics = calculate_lease_metrics(&terms).unwrap();
        let entry = initial_recognition_entry(&terms, &metrics);

        assert_eq!(accounts(&entry.debits), vec![LeaseAccount::RightOfUseAsset]);
        assert_eq!(accounts(&entry.credits), vec![LeaseAccount::LeaseLiability]);
        assert_eq!(entry.total_debits(), entry.total_credits());
    }

    #[test]
    fn test_initial_entry_prepaid_only() {
        let mut terms = office_lease();
        terms.initial_direct_costs = Decimal::ZERO;
        terms.lease_incentives = Decimal::ZERO;
        let metrics = calculate_lease_metrics(&terms).unwrap();
        let entry = initial_recognition_entry(&terms, &metrics);

        assert_eq!(
            accounts(&entry.credits),
            vec![LeaseAccount::LeaseLiability, LeaseAccount::PrepaidRent]
        );
        assert!(entry.is_balanced());
    }

    // -----------------------------------------------------------------------
    // 2. Monthly entries
    // -----------------------------------------------------------------------
    #[test]
    fn test_monthly_entries_two_per_row_in_order() {
        let terms = office_lease();
        let metrics = calculate_lease_metrics(&terms).unwrap();
        let schedule = amortization_schedule_from_metrics(&terms, &metrics).unwrap();
        let entries = monthly_entries(&terms, &schedule);

        assert_eq!(entries.len(), 70);

        let payment = &entries[0];
        assert_eq!(
            accounts(&payment.debits),
            vec![LeaseAccount::InterestExpense, LeaseAccount::LeaseLiability]
        );
        assert_eq!(accounts(&payment.credits), vec![LeaseAccount::Cash]);
        assert_eq!(payment.debits[0].amount, dec!(677.18));
        assert_eq!(payment.debits[1].amount, dec!(4322.82));
        assert_eq!(payment.credits[0].amount, dec!(5000));
        assert!(payment.description.starts_with("Month 1:"));

        let amortization = &entries[1];
        assert_eq!(
            accounts(&amortization.debits),
            vec![LeaseAccount::AmortizationExpense]
        );
        assert_eq!(
            accounts(&amortization.credits),
            vec![LeaseAccount::AccumulatedAmortization]
        );
        assert_eq!(amortization.total_debits(), dec!(4629.25));
        assert_eq!(amortization.date, schedule[0].date);
    }

    #[test]
    fn test_every_entry_balanced() {
        let entries = generate_journal_entries(&office_lease()).unwrap();
        for entry in &entries {
            assert!(
                entry.is_balanced(),
                "{} unbalanced: Dr {} Cr {}",
                entry.description,
                entry.total_debits(),
                entry.total_credits()
            );
        }
    }

    #[test]
    fn test_generated_count_is_two_per_month_plus_initial() {
        let entries = generate_journal_entries(&office_lease()).unwrap();
        assert_eq!(entries.len(), 2 * 35 + 1);
        assert_eq!(entries[0].entry_type, JournalEntryType::InitialRecognition);
        assert!(entries[1..]
            .iter()
            .all(|e| e.entry_type == JournalEntryType::MonthlyAmortization));
    }

    #[test]
    fn test_no_remeasurement_entries_generated() {
        let entries = generate_journal_entries(&office_lease()).unwrap();
        assert!(!entries
            .iter()
            .any(|e| e.entry_type == JournalEntryType::Remeasurement));
    }

    // -----------------------------------------------------------------------
    // 3. Serialization
    // -----------------------------------------------------------------------
    #[test]
    fn test_entry_serializes_with_account_labels() {
        let terms = office_lease();
        let metrics = calculate_lease_metrics(&terms).unwrap();
        let value = serde_json::to_value(initial_recognition_entry(&terms, &metrics)).unwrap();

        assert_eq!(value["entry_type"], "initial_recognition");
        assert_eq!(value["debits"][0]["account"], "Right-of-Use Asset");
        assert_eq!(value["debits"][1]["account"], "Lease Incentives Receivable");
    }

    #[test]
    fn test_account_display_matches_label() {
        assert_eq!(
            LeaseAccount::AccumulatedAmortization.to_string(),
            "Accumulated Amortization - ROU Asset"
        );
    }

    #[test]
    fn test_is_balanced_tolerance() {
        let entry = JournalEntry::new(
            date(2024, 1, 1),
            JournalEntryType::Remeasurement,
            "tolerance".into(),
        )
        .debit(LeaseAccount::RightOfUseAsset, dec!(100.01))
        .credit(LeaseAccount::LeaseLiability, dec!(100));
        assert!(entry.is_balanced());

        let off = entry.credit(LeaseAccount::Cash, dec!(-0.01));
        assert!(!off.is_balanced());
    }
}
