use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

/// Salary-days convention: a month is always 30 days, whatever the calendar.
pub const DAYS_PER_MONTH: Decimal = dec!(30);

/// Notice periods offered by the calculator form.
pub const STANDARD_NOTICE_PERIODS: [Days; 4] = [30, 60, 90, 120];

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryProfile {
    pub monthly_salary: Money,
    pub notice_period_days: Days,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyoutOutput {
    /// Whole rupees, rounded half-up.
    pub buyout_amount: Money,
    /// Monthly salary over 30 days, shown to the paisa.
    pub daily_salary: Money,
    pub monthly_salary: Money,
    pub notice_period_days: Days,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amount owed to the current employer to waive `notice_period_days` of notice.
pub fn calculate_buyout(
    monthly_salary: Money,
    notice_period_days: Days,
) -> BuyoutFinanceResult<BuyoutOutput> {
    if monthly_salary <= Decimal::ZERO {
        return Err(BuyoutFinanceError::invalid(
            "monthly_salary",
            "Monthly salary must be positive.",
        ));
    }
    if notice_period_days == 0 {
        return Err(BuyoutFinanceError::invalid(
            "notice_period_days",
            "Notice period must be at least 1 day.",
        ));
    }

    // Multiply before dividing so 1/30 never gets truncated at 28 digits.
    let salary_days = monthly_salary
        .checked_mul(Decimal::from(notice_period_days))
        .ok_or_else(|| {
            BuyoutFinanceError::invalid("monthly_salary", "Monthly salary is too large.")
        })?;
    let buyout_amount = round_rupees(salary_days / DAYS_PER_MONTH);
    let daily_salary = monthly_salary / DAYS_PER_MONTH;

    Ok(BuyoutOutput {
        buyout_amount,
        daily_salary: round_paise(daily_salary),
        monthly_salary,
        notice_period_days,
    })
}

pub fn calculate_buyout_for(profile: &SalaryProfile) -> BuyoutFinanceResult<BuyoutOutput> {
    calculate_buyout(profile.monthly_salary, profile.notice_period_days)
}

/// Dashboard preview from an annual CTC: monthly salary is `ctc / 12`.
pub fn calculate_buyout_from_annual_ctc(
    annual_ctc: Money,
    notice_period_days: Days,
) -> BuyoutFinanceResult<BuyoutOutput> {
    if annual_ctc <= Decimal::ZERO {
        return Err(BuyoutFinanceError::invalid(
            "annual_ctc",
            "Annual CTC must be positive.",
        ));
    }
    calculate_buyout(annual_ctc / MONTHS_PER_YEAR, notice_period_days)
}

pub fn is_standard_notice_period(days: Days) -> bool {
    STANDARD_NOTICE_PERIODS.contains(&days)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
