use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaseAccountingError {
    #[error("Degenerate lease term: {term_months} whole months leaves nothing to amortize")]
    DegenerateTerm { term_months: i32 },

    #[error("Invalid discount rate {rate}: {reason}")]
    InvalidRate { rate: Decimal, reason: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LeaseAccountingError {
    fn from(e: serde_json::Error) -> Self {
        LeaseAccountingError::SerializationError(e.to_string())
    }
}
