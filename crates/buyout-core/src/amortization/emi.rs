use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Nominal annual rate, e.g. 12 for 12% p.a.
    pub annual_rate_percent: Percent,
    pub tenure_months: Months,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_percent: Percent, tenure_months: Months) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_months,
        }
    }

    pub fn with_tenure(&self, tenure_months: Months) -> Self {
        Self {
            tenure_months,
            ..self.clone()
        }
    }

    pub fn with_rate(&self, annual_rate_percent: Percent) -> Self {
        Self {
            annual_rate_percent,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub tenure_months: Months,
    pub monthly_emi: Money,
    pub total_interest: Money,
    pub total_repayment: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly periodic rate for a nominal annual percentage: `rate / 12 / 100`.
pub fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT
}

/// Equated monthly installment on a reducing balance, rounded half-up to a
/// whole rupee.
///
/// `EMI = P·r·(1+r)^n / ((1+r)^n − 1)`, evaluated as `P·r / (1 − (1+r)^−n)`.
/// A zero rate degenerates to `P / n`.
pub fn calculate_emi(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_months: Months,
) -> BuyoutFinanceResult<Money> {
    validate_terms(principal, annual_rate_percent, tenure_months)?;
    Ok(round_rupees(unrounded_emi(
        principal,
        annual_rate_percent,
        tenure_months,
    )?))
}

/// EMI together with total repayment and total interest.
pub fn calculate_amortization(terms: &LoanTerms) -> BuyoutFinanceResult<AmortizationOutput> {
    let monthly_emi = calculate_emi(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_months,
    )?;
    let total_repayment = monthly_emi
        .checked_mul(Decimal::from(terms.tenure_months))
        .ok_or_else(too_large)?;

    Ok(AmortizationOutput {
        principal: terms.principal,
        annual_rate_percent: terms.annual_rate_percent,
        tenure_months: terms.tenure_months,
        monthly_emi,
        total_interest: total_repayment - terms.principal,
        total_repayment,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn validate_terms(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_months: Months,
) -> BuyoutFinanceResult<()> {
    if principal <= Decimal::ZERO {
        return Err(BuyoutFinanceError::invalid(
            "principal",
            "Principal must be positive.",
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(BuyoutFinanceError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative.",
        ));
    }
    if tenure_months == 0 {
        return Err(BuyoutFinanceError::invalid(
            "tenure_months",
            "Tenure must be at least 1 month.",
        ));
    }
    Ok(())
}

fn unrounded_emi(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_months: Months,
) -> BuyoutFinanceResult<Money> {
    let n = Decimal::from(tenure_months);
    let r = monthly_rate(annual_rate_percent);

    if r.is_zero() {
        return Ok(principal / n);
    }

    let periodic_interest = principal.checked_mul(r).ok_or_else(too_large)?;

    // (1+r)^n past the Decimal range means (1+r)^-n is below its resolution,
    // so the installment is interest-only in the limit.
    let annuity = match (Decimal::ONE + r).checked_powu(u64::from(tenure_months)) {
        Some(growth) => Decimal::ONE - Decimal::ONE / growth,
        None => Decimal::ONE,
    };

    // A rate too small to move (1+r)^n at 28 digits behaves like zero.
    if annuity.is_zero() {
        return Ok(principal / n);
    }

    periodic_interest.checked_div(annuity).ok_or_else(too_large)
}

/// Overflow anywhere in the EMI arithmetic traces back to the principal.
pub(crate) fn too_large() -> BuyoutFinanceError {
    BuyoutFinanceError::invalid("principal", "Principal is too large to amortize.")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_emi_twelve_percent_one_year() {
        // 300k * 0.01 * 1.01^12 / (1.01^12 - 1) = 26654.64
        let emi = calculate_emi(dec!(300_000), dec!(12), 12).unwrap();
        assert_eq!(emi, dec!(26655));
    }

    #[test]
    fn test_emi_calculator_table_values() {
        assert_eq!(calculate_emi(dec!(300_000), dec!(12), 6).unwrap(), dec!(51765));
        assert_eq!(calculate_emi(dec!(300_000), dec!(12), 24).unwrap(), dec!(14122));
    }

    #[test]
    fn test_emi_non_round_rate() {
        // 200k at 14% over 18 months = 12383.03
        assert_eq!(calculate_emi(dec!(200_000), dec!(14), 18).unwrap(), dec!(12383));
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        assert_eq!(calculate_emi(dec!(120_000), dec!(0), 12).unwrap(), dec!(10_000));
        // 100k / 7 = 14285.71 -> 14286
        assert_eq!(calculate_emi(dec!(100_000), dec!(0), 7).unwrap(), dec!(14286));
    }

    #[test]
    fn test_zero_rate_very_long_tenure() {
        let emi = calculate_emi(dec!(1_000_000), dec!(0), 10_000).unwrap();
        assert_eq!(emi, dec!(100));
    }

    #[test]
    fn test_extreme_tenure_converges_to_interest_only() {
        // 1.02^100000 overflows; the installment tends to P * r = 2000.
        let emi = calculate_emi(dec!(100_000), dec!(24), 100_000).unwrap();
        assert_eq!(emi, dec!(2000));
    }

    #[test]
    fn test_single_month_tenure() {
        // One installment repays principal plus one month of interest.
        assert_eq!(calculate_emi(dec!(50_000), dec!(12), 1).unwrap(), dec!(50_500));
    }

    #[test]
    fn test_amortization_totals() {
        let out = calculate_amortization(&LoanTerms::new(dec!(300_000), dec!(12), 12)).unwrap();
        assert_eq!(out.monthly_emi, dec!(26655));
        assert_eq!(out.total_repayment, dec!(319_860));
        assert_eq!(out.total_interest, dec!(19_860));
    }

    #[test]
    fn test_principal_near_decimal_max_is_rejected() {
        let err = calculate_amortization(&LoanTerms::new(Decimal::MAX, dec!(12), 12)).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_half_max_principal_still_prices() {
        let half = Decimal::MAX / dec!(2);
        assert!(calculate_emi(half, dec!(0), 12).is_ok());
    }

    #[test]
    fn test_negligible_rate_prices_like_zero() {
        let emi = calculate_emi(dec!(120_000), dec!(0.00000000000000000000000012), 12).unwrap();
        assert_eq!(emi, dec!(10_000));
    }

    #[test]
    fn test_zero_rate_emi_can_round_to_zero() {
        // 100 / 300 = 0.33 rounds to nothing; the schedule's last
        // installment carries the whole principal.
        let out = calculate_amortization(&LoanTerms::new(dec!(100), dec!(0), 300)).unwrap();
        assert_eq!(out.monthly_emi, Decimal::ZERO);
        assert_eq!(out.total_repayment, Decimal::ZERO);
        assert_eq!(out.total_interest, dec!(-100));
    }

    #[test]
    fn test_tiny_rate_rounding_can_undershoot_principal() {
        // 1000 at 0.01% over 3 months is 333.34 a month before rounding.
        let out = calculate_amortization(&LoanTerms::new(dec!(1000), dec!(0.01), 3)).unwrap();
        assert_eq!(out.monthly_emi, dec!(333));
        assert_eq!(out.total_repayment, dec!(999));
    }

    #[test]
    fn test_invalid_principal() {
        let err = calculate_emi(Decimal::ZERO, dec!(12), 12).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
        let err = calculate_emi(dec!(-5), dec!(12), 12).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_invalid_rate_and_tenure() {
        let err = calculate_emi(dec!(1000), dec!(-1), 12).unwrap_err();
        assert_eq!(err.field(), Some("annual_rate_percent"));
        let err = calculate_emi(dec!(1000), dec!(12), 0).unwrap_err();
        assert_eq!(err.field(), Some("tenure_months"));
    }

    #[test]
    fn test_with_tenure_keeps_other_terms() {
        let base = LoanTerms::new(dec!(10_000), dec!(13), 12);
        let alt = base.with_tenure(24);
        assert_eq!(alt.principal, base.principal);
        assert_eq!(alt.annual_rate_percent, base.annual_rate_percent);
        assert_eq!(alt.tenure_months, 24);
    }
}
