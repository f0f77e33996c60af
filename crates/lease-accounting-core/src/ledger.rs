//! Persistence seam for generated journal entries.
//!
//! The engine never stores anything itself. A caller that keeps entries
//! implements [`JournalStore`] and regenerates through
//! [`regenerate_journal_entries`], which hands the complete fresh set to the
//! store in a single replace call.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::lease_accounting::journal::{generate_journal_entries, JournalEntry};
use crate::lease_accounting::terms::LeaseTerms;
use crate::LeaseResult;

/// A journal entry as persisted: generated id plus the owning lease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredJournalEntry {
    pub id: Uuid,
    pub lease_id: String,
    #[serde(flatten)]
    pub entry: JournalEntry,
}

/// Storage for journal entries, keyed by lease identifier.
pub trait JournalStore {
    /// Delete every entry stored for `lease_id` and insert `entries` as one
    /// atomic operation. Implementations serialize writes per lease.
    fn replace_lease_entries(
        &mut self,
        lease_id: &str,
        entries: Vec<StoredJournalEntry>,
    ) -> LeaseResult<()>;

    /// Entries currently stored for `lease_id`, in insertion order.
    fn lease_entries(&self, lease_id: &str) -> LeaseResult<Vec<StoredJournalEntry>>;
}

/// Recompute all entries for a lease and replace whatever was stored before.
///
/// Nothing is written when the engine rejects the terms.
pub fn regenerate_journal_entries<S: JournalStore + ?Sized>(
    store: &mut S,
    lease_id: &str,
    terms: &LeaseTerms,
) -> LeaseResult<Vec<StoredJournalEntry>> {
    let stored: Vec<StoredJournalEntry> = generate_journal_entries(terms)?
        .into_iter()
        .map(|entry| StoredJournalEntry {
            id: Uuid::new_v4(),
            lease_id: lease_id.to_string(),
            entry,
        })
        .collect();

    store.replace_lease_entries(lease_id, stored.clone())?;
    Ok(stored)
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// HashMap-backed store. Replacing swaps the whole vector for a lease, so a
/// reader never sees a half-written set.
#[derive(Debug, Default)]
pub struct InMemoryJournalStore {
    entries: HashMap<String, Vec<StoredJournalEntry>>,
}

impl InMemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leases with stored entries.
    pub fn lease_count(&self) -> usize {
        self.entries.len()
    }
}

impl JournalStore for InMemoryJournalStore {
    fn replace_lease_entries(
        &mut self,
        lease_id: &str,
        entries: Vec<StoredJournalEntry>,
    ) -> LeaseResult<()> {
        if entries.is_empty() {
            self.entries.remove(lease_id);
        } else {
            self.entries.insert(lease_id.to_string(), entries);
        }
        Ok(())
    }

    fn lease_entries(&self, lease_id: &str) -> LeaseResult<Vec<StoredJournalEntry>> {
        Ok(self.entries.get(lease_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeaseAccountingError;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    fn lease(end: NaiveDate) -> LeaseTerms {
        LeaseTerms::new(
            "Retail Unit 4",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end,
            dec!(2500),
            dec!(0.08),
        )
    }

    #[test]
    fn test_regenerate_stores_all_entries() {
        let mut store = InMemoryJournalStore::new();
        let terms = lease(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let stored = regenerate_journal_entries(&mut store, "lease-1", &terms).unwrap();

        assert_eq!(stored.len(), 25);
        assert_eq!(store.lease_entries("lease-1").unwrap(), stored);
        assert!(stored.iter().all(|s| s.lease_id == "lease-1"));

        let ids: HashSet<Uuid> = stored.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), stored.len());
    }

    #[test]
    fn test_regenerate_replaces_previous_set() {
        let mut store = InMemoryJournalStore::new();
        let long = lease(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let short = lease(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());

        let first = regenerate_journal_entries(&mut store, "lease-1", &long).unwrap();
        let second = regenerate_journal_entries(&mut store, "lease-1", &short).unwrap();

        let current = store.lease_entries("lease-1").unwrap();
        assert_eq!(current.len(), 13);
        assert_eq!(current, second);
        assert!(current.iter().all(|s| !first.iter().any(|f| f.id == s.id)));
    }

    #[test]
    fn test_regenerate_leaves_other_leases_alone() {
        let mut store = InMemoryJournalStore::new();
        let terms = lease(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        regenerate_journal_entries(&mut store, "lease-1", &terms).unwrap();
        regenerate_journal_entries(&mut store, "lease-2", &terms).unwrap();
        regenerate_journal_entries(&mut store, "lease-1", &terms).unwrap();

        assert_eq!(store.lease_count(), 2);
        assert_eq!(store.lease_entries("lease-2").unwrap().len(), 25);
    }

    #[test]
    fn test_rejected_terms_keep_existing_entries() {
        let mut store = InMemoryJournalStore::new();
        let good = lease(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        regenerate_journal_entries(&mut store, "lease-1", &good).unwrap();

        let same_month = lease(NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        let err = regenerate_journal_entries(&mut store, "lease-1", &same_month).unwrap_err();

        assert!(matches!(err, LeaseAccountingError::DegenerateTerm { .. }));
        assert_eq!(store.lease_entries("lease-1").unwrap().len(), 25);
    }

    #[test]
    fn test_unknown_lease_has_no_entries() {
        let store = InMemoryJournalStore::new();
        assert!(store.lease_entries("missing").unwrap().is_empty());
    }

    #[test]
    fn test_stored_entry_flattens_journal_fields() {
        let mut store = InMemoryJournalStore::new();
        let terms = lease(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let stored = regenerate_journal_entries(&mut store, "lease-9", &terms).unwrap();
        let value = serde_json::to_value(&stored[0]).unwrap();

        assert_eq!(value["lease_id"], "lease-9");
        assert_eq!(value["entry_type"], "initial_recognition");
        assert!(value["id"].is_string());
    }
}
