use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Number of fractional digits carried between pipeline stages.
pub const CENT_SCALE: u32 = 2;

/// Round a monetary amount to whole cents, halves away from zero.
pub fn round_to_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit, cents midpoint away from zero".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_to_cents_half_away_from_zero() {
        assert_eq!(round_to_cents(dec!(677.185)), dec!(677.19));
        assert_eq!(round_to_cents(dec!(677.1818)), dec!(677.18));
        assert_eq!(round_to_cents(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn test_round_to_cents_keeps_whole_amounts() {
        assert_eq!(round_to_cents(dec!(5000)), dec!(5000));
    }

    #[test]
    fn test_with_metadata_envelope() {
        let out = with_metadata("test", &serde_json::json!({"a": 1}), vec![], 7, dec!(1.23));
        assert_eq!(out.result, dec!(1.23));
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.assumptions["a"], 1);
        assert_eq!(
            out.metadata.precision,
            "rust_decimal_128bit, cents midpoint away from zero"
        );
    }
}
