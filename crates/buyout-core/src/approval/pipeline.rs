use serde::{Deserialize, Serialize};

use super::workflow::{ApplicationStatus, LoanApplication};
use crate::risk::{classify, RiskCategory};
use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

/// Counts behind the lender dashboard tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub total: usize,
    pub pending: usize,
    pub under_review: usize,
    pub approved: usize,
    pub rejected: usize,
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    pub requested_amount: Money,
    /// Requested amount on applications still awaiting a decision.
    pub open_amount: Money,
}

/// Tally applications by status and risk. Applications without an attached
/// assessment are classified on their score.
pub fn summarize_pipeline(applications: &[LoanApplication]) -> BuyoutFinanceResult<PipelineSummary> {
    let mut summary = PipelineSummary::default();

    for application in applications {
        summary.total += 1;
        match application.status {
            ApplicationStatus::Pending => summary.pending += 1,
            ApplicationStatus::UnderReview => summary.under_review += 1,
            ApplicationStatus::Approved => summary.approved += 1,
            ApplicationStatus::Rejected => summary.rejected += 1,
        }

        let risk = match &application.risk {
            Some(assessment) => assessment.risk_category,
            None => classify(application.credit_score, None, None)?.risk_category,
        };
        match risk {
            RiskCategory::Low => summary.low_risk += 1,
            RiskCategory::Medium => summary.medium_risk += 1,
            RiskCategory::High => summary.high_risk += 1,
        }

        summary.requested_amount = add_amount(summary.requested_amount, application.loan_amount)?;
        if !application.status.is_decided() {
            summary.open_amount = add_amount(summary.open_amount, application.loan_amount)?;
        }
    }

    Ok(summary)
}

fn add_amount(total: Money, amount: Money) -> BuyoutFinanceResult<Money> {
    total.checked_add(amount).ok_or_else(|| {
        BuyoutFinanceError::invalid("loan_amount", "Pipeline total exceeds the decimal range.")
    })
}
