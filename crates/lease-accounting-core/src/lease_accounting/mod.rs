//! ASC 842 lessee accounting.
//!
//! Four stages run strictly forward: the term resolver turns dates into a
//! whole-month term, valuation discounts the payments into the initial
//! liability and ROU asset, the amortization engine walks the term month by
//! month, and the journal generator turns the result into balanced postings.

pub mod amortization;
pub mod analysis;
pub mod journal;
pub mod term;
pub mod terms;
pub mod valuation;

pub use amortization::{amortization_schedule_from_metrics, build_amortization_schedule, ScheduleRow};
pub use analysis::{analyze_lease, LeaseAnalysis, LeaseSummary};
pub use journal::{
    generate_journal_entries, initial_recognition_entry, monthly_entries, AccountEntry,
    JournalEntry, JournalEntryType, LeaseAccount, BALANCE_TOLERANCE,
};
pub use term::term_in_months;
pub use terms::{validate_lease_terms, LeaseTerms};
pub use valuation::{calculate_lease_metrics, present_value, LeaseMetrics};
