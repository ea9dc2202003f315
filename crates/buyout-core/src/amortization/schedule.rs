use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::emi::{calculate_emi, monthly_rate, too_large, LoanTerms};
use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

/// Longest schedule that will be enumerated row by row (100 years).
/// EMI and totals have no such limit.
pub const MAX_SCHEDULE_MONTHS: Months = 1200;

/// A single month of the repayment schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: Months,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub monthly_emi: Money,
    pub rows: Vec<ScheduleRow>,
    /// Sum of the interest column.
    pub total_interest: Money,
    /// Sum of the installment column, including the final adjustment.
    pub total_repayment: Money,
}

/// Enumerate the reducing-balance repayment schedule month by month.
///
/// Each month's interest is charged on the opening balance and rounded to
/// paise. Installments are the rounded EMI except the last, which absorbs
/// the rounding residue so the loan closes at exactly zero.
pub fn build_schedule(terms: &LoanTerms) -> BuyoutFinanceResult<AmortizationSchedule> {
    if terms.tenure_months > MAX_SCHEDULE_MONTHS {
        return Err(BuyoutFinanceError::invalid(
            "tenure_months",
            format!("A schedule covers at most {MAX_SCHEDULE_MONTHS} months."),
        ));
    }
    let monthly_emi = calculate_emi(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_months,
    )?;
    let r = monthly_rate(terms.annual_rate_percent);

    let mut rows = Vec::with_capacity(terms.tenure_months as usize);
    let mut balance = terms.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_repayment = Decimal::ZERO;

    for month in 1..=terms.tenure_months {
        let opening = balance;
        let interest = round_paise(opening * r);

        let payoff = opening.checked_add(interest).ok_or_else(too_large)?;
        let mut installment = if month == terms.tenure_months {
            payoff
        } else {
            monthly_emi
        };
        let mut principal = installment - interest;

        // Upward EMI rounding can retire the loan a month or two early.
        if principal > opening {
            principal = opening;
            installment = payoff;
        }

        balance = opening - principal;
        total_interest = total_interest.checked_add(interest).ok_or_else(too_large)?;
        total_repayment = total_repayment
            .checked_add(installment)
            .ok_or_else(too_large)?;

        rows.push(ScheduleRow {
            month,
            opening_balance: opening,
            installment,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    Ok(AmortizationSchedule {
        terms: terms.clone(),
        monthly_emi,
        rows,
        total_interest,
        total_repayment,
    })
}

/// [`build_schedule`] wrapped in the standard computation envelope.
pub fn build_schedule_report(
    terms: &LoanTerms,
) -> BuyoutFinanceResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = build_schedule(terms)?;

    let early_close = schedule
        .rows
        .iter()
        .position(|row| row.closing_balance.is_zero())
        .map(|idx| idx + 1)
        .filter(|closed_at| *closed_at < schedule.rows.len());
    if schedule.monthly_emi.is_zero() {
        warnings.push(
            "EMI rounds to zero rupees; the final installment repays the whole principal."
                .into(),
        );
    }
    if let Some(closed_at) = early_close {
        warnings.push(format!(
            "Rounded EMI retires the loan in month {closed_at}; later installments are zero."
        ));
    }

    tracing::debug!(
        principal = %terms.principal,
        rate = %terms.annual_rate_percent,
        tenure = terms.tenure_months,
        "built amortization schedule"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "interest_basis": "opening balance, monthly rate = annual / 12 / 100",
        "interest_rounding": "half-up to paise",
        "final_installment": "adjusted to close balance at zero",
    });

    Ok(with_metadata(
        "Reducing-balance amortization schedule",
        &assumptions,
        warnings,
        elapsed,
        schedule,
    ))
}
