use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

/// EMI above this share of monthly income is flagged to the reviewer.
pub const HIGH_RATIO_THRESHOLD_PERCENT: Percent = dec!(40);

/// EMI below this share of monthly salary is shown as affordable.
pub const AFFORDABLE_RATIO_PERCENT: Percent = dec!(30);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// `emi / monthly_income * 100`.
pub fn emi_to_income_ratio_percent(emi: Money, monthly_income: Money) -> BuyoutFinanceResult<Percent> {
    if monthly_income <= Decimal::ZERO {
        return Err(BuyoutFinanceError::invalid(
            "monthly_income",
            "Monthly income must be positive.",
        ));
    }
    if emi < Decimal::ZERO {
        return Err(BuyoutFinanceError::invalid(
            "proposed_emi",
            "EMI cannot be negative.",
        ));
    }
    emi.checked_div(monthly_income)
        .and_then(|share| share.checked_mul(dec!(100)))
        .ok_or_else(|| {
            BuyoutFinanceError::invalid("proposed_emi", "EMI is too large relative to income.")
        })
}

/// Same ratio against an annual income, spread over twelve months.
pub fn emi_to_annual_income_ratio_percent(
    emi: Money,
    annual_income: Money,
) -> BuyoutFinanceResult<Percent> {
    if annual_income <= Decimal::ZERO {
        return Err(BuyoutFinanceError::invalid(
            "annual_income",
            "Annual income must be positive.",
        ));
    }
    emi_to_income_ratio_percent(emi, annual_income / MONTHS_PER_YEAR)
}

pub fn exceeds_high_ratio(ratio_percent: Percent) -> bool {
    ratio_percent > HIGH_RATIO_THRESHOLD_PERCENT
}

pub fn is_affordable(ratio_percent: Percent) -> bool {
    ratio_percent < AFFORDABLE_RATIO_PERCENT
}
