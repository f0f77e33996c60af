use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LeaseAccountingError;
use crate::types::{Money, Rate};
use crate::LeaseResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Nominal monthly rate for an annual rate compounded monthly (annual / 12).
pub fn monthly_rate(annual_rate: Rate) -> Rate {
    annual_rate / MONTHS_PER_YEAR
}

/// Present value of an ordinary annuity (payments at the end of each period).
///
/// PV = pmt * (1 - (1 + r)^-n) / r, or pmt * n when r is zero.
/// The result is unrounded; callers decide where the cent boundary is.
pub fn annuity_present_value(
    periodic_rate: Rate,
    periods: u32,
    payment: Money,
) -> LeaseResult<Money> {
    if periodic_rate.is_zero() {
        return payment
            .checked_mul(Decimal::from(periods))
            .ok_or_else(|| LeaseAccountingError::InvalidInput {
                field: "monthly_payment".into(),
                reason: format!("Undiscounted total of {periods} payments overflows"),
            });
    }

    let one_plus_r = Decimal::ONE + periodic_rate;
    if one_plus_r <= Decimal::ZERO {
        return Err(LeaseAccountingError::InvalidRate {
            rate: periodic_rate,
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    let factor = one_plus_r
        .checked_powu(u64::from(periods))
        .ok_or_else(|| LeaseAccountingError::InvalidRate {
            rate: periodic_rate,
            reason: format!("Compounding factor overflows over {periods} periods"),
        })?;

    let discount = Decimal::ONE
        .checked_div(factor)
        .ok_or_else(|| LeaseAccountingError::InvalidRate {
            rate: periodic_rate,
            reason: "Discount factor underflows".into(),
        })?;

    let annuity_factor = (Decimal::ONE - discount) / periodic_rate;
    payment
        .checked_mul(annuity_factor)
        .ok_or_else(|| LeaseAccountingError::InvalidRate {
            rate: periodic_rate,
            reason: "Present value overflows".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(0.12)), dec!(0.01));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_annuity_pv_basic() {
        // 100 * (1 - 1/1.08^10) / 0.08 = 671.008...
        let result = annuity_present_value(dec!(0.08), 10, dec!(100)).unwrap();
        assert!((result - dec!(671.0081)).abs() < dec!(0.001));
    }

    #[test]
    fn test_annuity_pv_zero_rate() {
        let result = annuity_present_value(Decimal::ZERO, 24, dec!(1500)).unwrap();
        assert_eq!(result, dec!(36000));
    }

    #[test]
    fn test_annuity_pv_zero_periods() {
        let result = annuity_present_value(dec!(0.01), 0, dec!(1500)).unwrap();
        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn test_annuity_pv_zero_rate_overflowing_total() {
        let err = annuity_present_value(Decimal::ZERO, 12, dec!(70000000000000000000000000000))
            .unwrap_err();
        assert!(matches!(
            err,
            LeaseAccountingError::InvalidInput { ref field, .. } if field == "monthly_payment"
        ));
    }

    #[test]
    fn test_annuity_pv_overflowing_factor() {
        let err = annuity_present_value(dec!(1.0), 200, dec!(100)).unwrap_err();
        assert!(matches!(err, LeaseAccountingError::InvalidRate { .. }));
    }
}
