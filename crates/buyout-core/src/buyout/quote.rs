use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::calculator::{calculate_buyout, is_standard_notice_period, BuyoutOutput};
use crate::amortization::sweep::tenure_sweep;
use crate::amortization::{LoanTerms, QUICK_TENURES};
use crate::risk::affordability::{emi_to_income_ratio_percent, is_affordable};
use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

/// Rate the calculator quotes when no lender has priced the loan yet.
pub const DEFAULT_QUOTE_RATE_PERCENT: Percent = dec!(12);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyoutQuoteInput {
    pub monthly_salary: Money,
    pub notice_period_days: Days,
    /// Defaults to 12% p.a.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate_percent: Option<Percent>,
    /// Defaults to 6, 12 and 24 months.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenures: Option<Vec<Months>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiOption {
    pub tenure_months: Months,
    pub annual_rate_percent: Percent,
    pub monthly_emi: Money,
    pub total_interest: Money,
    pub total_repayment: Money,
    /// EMI as a share of monthly salary, one decimal place.
    pub emi_to_salary_percent: Percent,
    pub affordable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyoutQuote {
    pub buyout: BuyoutOutput,
    pub emi_options: Vec<EmiOption>,
}

/// Buyout figure plus an EMI table for financing it, as the calculator form
/// shows it.
pub fn quote_buyout_financing(
    input: &BuyoutQuoteInput,
) -> BuyoutFinanceResult<ComputationOutput<BuyoutQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let buyout = calculate_buyout(input.monthly_salary, input.notice_period_days)?;
    if buyout.buyout_amount.is_zero() {
        return Err(BuyoutFinanceError::invalid(
            "monthly_salary",
            "Buyout rounds to zero rupees; there is nothing to finance.",
        ));
    }

    if !is_standard_notice_period(input.notice_period_days) {
        warnings.push(format!(
            "Notice period of {} days is outside the standard 30/60/90/120 options.",
            input.notice_period_days
        ));
    }

    let rate = input
        .annual_rate_percent
        .unwrap_or(DEFAULT_QUOTE_RATE_PERCENT);
    let tenures = input
        .tenures
        .clone()
        .unwrap_or_else(|| QUICK_TENURES.to_vec());

    let base = LoanTerms::new(buyout.buyout_amount, rate, tenures.first().copied().unwrap_or(1));
    let rows = tenure_sweep(&base, &tenures)?;

    let emi_options = rows
        .into_iter()
        .map(|row| {
            let ratio = emi_to_income_ratio_percent(row.monthly_emi, input.monthly_salary)?;
            Ok(EmiOption {
                tenure_months: row.tenure_months,
                annual_rate_percent: row.annual_rate_percent,
                monthly_emi: row.monthly_emi,
                total_interest: row.total_interest,
                total_repayment: row.total_repayment,
                emi_to_salary_percent: round_percent(ratio),
                affordable: is_affordable(ratio),
            })
        })
        .collect::<BuyoutFinanceResult<Vec<EmiOption>>>()?;

    if emi_options.iter().all(|opt| !opt.affordable) {
        warnings.push("No quoted tenure keeps the EMI under 30% of monthly salary.".into());
    }

    tracing::debug!(
        buyout = %buyout.buyout_amount,
        options = emi_options.len(),
        "quoted buyout financing"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "days_per_month": 30,
        "annual_rate_percent": rate.to_string(),
        "tenures": tenures,
        "rounding": "half-up to whole rupees",
    });

    Ok(with_metadata(
        "Notice-period buyout with reducing-balance EMI options",
        &assumptions,
        warnings,
        elapsed,
        BuyoutQuote {
            buyout,
            emi_options,
        },
    ))
}
