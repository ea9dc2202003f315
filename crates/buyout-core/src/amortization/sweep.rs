use serde::{Deserialize, Serialize};

use super::emi::{calculate_amortization, LoanTerms};
use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

/// Tenures a lender can pick when approving a loan.
pub const APPROVAL_TENURES: [Months; 6] = [6, 9, 12, 15, 18, 24];

/// Tenures offered on the candidate's buyout calculator.
pub const CALCULATOR_TENURES: [Months; 5] = [6, 12, 18, 24, 36];

/// Tenures in the quick EMI table next to a buyout figure.
pub const QUICK_TENURES: [Months; 3] = [6, 12, 24];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRow {
    pub tenure_months: Months,
    pub annual_rate_percent: Percent,
    pub monthly_emi: Money,
    pub total_interest: Money,
    pub total_repayment: Money,
}

/// Two-way EMI table: `matrix[i][j]` is the EMI at `rates[i]` over `tenures[j]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiGrid {
    pub principal: Money,
    pub rates: Vec<Percent>,
    pub tenures: Vec<Months>,
    pub matrix: Vec<Vec<Money>>,
}

/// Re-price the base loan over each alternate tenure, keeping principal and rate.
pub fn tenure_sweep(base: &LoanTerms, tenures: &[Months]) -> BuyoutFinanceResult<Vec<SweepRow>> {
    if tenures.is_empty() {
        return Err(BuyoutFinanceError::invalid(
            "tenures",
            "At least one tenure is required for a sweep.",
        ));
    }
    tenures
        .iter()
        .map(|&tenure| sweep_row(&base.with_tenure(tenure)))
        .collect()
}

/// Re-price the base loan at each alternate rate, keeping principal and tenure.
pub fn rate_sweep(base: &LoanTerms, rates: &[Percent]) -> BuyoutFinanceResult<Vec<SweepRow>> {
    if rates.is_empty() {
        return Err(BuyoutFinanceError::invalid(
            "rates",
            "At least one rate is required for a sweep.",
        ));
    }
    rates
        .iter()
        .map(|&rate| sweep_row(&base.with_rate(rate)))
        .collect()
}

pub fn emi_grid(
    principal: Money,
    rates: &[Percent],
    tenures: &[Months],
) -> BuyoutFinanceResult<EmiGrid> {
    if rates.is_empty() {
        return Err(BuyoutFinanceError::invalid(
            "rates",
            "At least one rate is required for a grid.",
        ));
    }
    if tenures.is_empty() {
        return Err(BuyoutFinanceError::invalid(
            "tenures",
            "At least one tenure is required for a grid.",
        ));
    }

    let matrix = rates
        .iter()
        .map(|&rate| {
            let row = tenure_sweep(&LoanTerms::new(principal, rate, tenures[0]), tenures)?;
            Ok(row.into_iter().map(|cell| cell.monthly_emi).collect())
        })
        .collect::<BuyoutFinanceResult<Vec<Vec<Money>>>>()?;

    Ok(EmiGrid {
        principal,
        rates: rates.to_vec(),
        tenures: tenures.to_vec(),
        matrix,
    })
}

fn sweep_row(terms: &LoanTerms) -> BuyoutFinanceResult<SweepRow> {
    let out = calculate_amortization(terms)?;
    Ok(SweepRow {
        tenure_months: out.tenure_months,
        annual_rate_percent: out.annual_rate_percent,
        monthly_emi: out.monthly_emi,
        total_interest: out.total_interest,
        total_repayment: out.total_repayment,
    })
}
