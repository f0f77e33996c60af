pub mod error;
pub mod lease_accounting;
pub mod time_value;
pub mod types;

#[cfg(feature = "ledger")]
pub mod ledger;

pub use error::LeaseAccountingError;
pub use types::*;

/// Standard result type for all lease accounting operations
pub type LeaseResult<T> = Result<T, LeaseAccountingError>;
