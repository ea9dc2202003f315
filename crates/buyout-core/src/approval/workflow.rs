use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::policy::LendingPolicy;
use crate::amortization::{calculate_amortization, LoanTerms};
use crate::risk::{classify, default_interest_rate, RiskAssessment};
use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

/// Conditions a reviewer can attach to an approval.
pub const STANDARD_CONDITIONS: [&str; 8] = [
    "Salary slip verification required",
    "Bank statement for last 6 months",
    "Employer verification letter",
    "Address proof and identity proof",
    "Co-applicant/Guarantor required",
    "Post-dated cheques (PDC) required",
    "Auto-debit mandate setup",
    "Life insurance coverage mandatory",
];

pub const REJECTION_REASONS: [&str; 8] = [
    "Credit score below minimum threshold",
    "Insufficient income to support EMI",
    "Unstable employment history",
    "Existing loan obligations too high",
    "Negative credit history/defaults",
    "Unable to verify employment",
    "Incomplete or incorrect documentation",
    "High debt-to-income ratio",
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub id: String,
    pub candidate_name: String,
    /// Requested principal, usually the buyout amount.
    pub loan_amount: Money,
    pub tenure_months: Months,
    /// Annual cost to company.
    pub current_ctc: Money,
    pub credit_score: u32,
    pub notice_period_days: Days,
    pub status: ApplicationStatus,
    /// Classifier output from the most recent transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskAssessment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalTerms {
    pub interest_rate_percent: Percent,
    pub approved_amount: Money,
    pub tenure_months: Months,
    pub monthly_emi: Money,
    pub total_repayment: Money,
    pub total_interest: Money,
    pub processing_fee: Money,
    pub emi_to_income_ratio_percent: Percent,
    pub high_ratio_warning: bool,
    /// Whether the rate sits inside the band recommended for the score.
    pub within_recommended_band: bool,
    pub risk: RiskAssessment,
}

/// Reviewer edits on top of the seeded terms. Absent fields keep the seed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate_percent: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure_months: Option<Months>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_amount: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub application_id: String,
    pub terms: ApprovalTerms,
    pub conditions: Vec<String>,
    pub comments: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    pub application_id: String,
    pub reason: String,
    pub risk: RiskAssessment,
}

// ---------------------------------------------------------------------------
// Terms
// ---------------------------------------------------------------------------

/// Starting terms for a reviewer: score-derived rate, the requested amount
/// and tenure, a processing fee on the amount.
pub fn seed_terms(
    application: &LoanApplication,
    policy: &LendingPolicy,
) -> BuyoutFinanceResult<ApprovalTerms> {
    policy.validate()?;
    validate_application(application)?;

    let rate = policy.clamp_rate(default_interest_rate(application.credit_score)?);
    price_terms(
        application,
        policy,
        LoanTerms::new(application.loan_amount, rate, application.tenure_months),
    )
}

/// Re-price after reviewer overrides, holding each override to the policy.
pub fn revise_terms(
    application: &LoanApplication,
    overrides: &TermOverrides,
    policy: &LendingPolicy,
) -> BuyoutFinanceResult<ApprovalTerms> {
    let seed = seed_terms(application, policy)?;

    let rate = overrides
        .interest_rate_percent
        .unwrap_or(seed.interest_rate_percent);
    if overrides.interest_rate_percent.is_some() {
        if rate < policy.min_rate_percent || rate > policy.max_rate_percent {
            return Err(BuyoutFinanceError::invalid(
                "interest_rate_percent",
                format!(
                    "Rate must be between {}% and {}%.",
                    policy.min_rate_percent, policy.max_rate_percent
                ),
            ));
        }
        if !policy.rate_on_grid(rate) {
            return Err(BuyoutFinanceError::invalid(
                "interest_rate_percent",
                format!("Rate must move in steps of {}%.", policy.rate_step_percent),
            ));
        }
    }

    let amount = overrides.approved_amount.unwrap_or(seed.approved_amount);
    if overrides.approved_amount.is_some() {
        if amount < policy.min_approved_amount || amount > application.loan_amount {
            return Err(BuyoutFinanceError::invalid(
                "approved_amount",
                format!(
                    "Approved amount must be between {} and the requested {}.",
                    policy.min_approved_amount, application.loan_amount
                ),
            ));
        }
        // The full requested amount is always allowed, on the grid or not.
        if amount != application.loan_amount && !policy.amount_on_grid(amount) {
            return Err(BuyoutFinanceError::invalid(
                "approved_amount",
                format!("Approved amount must move in steps of {}.", policy.amount_step),
            ));
        }
    }

    let tenure = overrides.tenure_months.unwrap_or(seed.tenure_months);
    if overrides.tenure_months.is_some() && !policy.allows_tenure(tenure) {
        let options: Vec<String> = policy.tenure_options.iter().map(|t| t.to_string()).collect();
        return Err(BuyoutFinanceError::invalid(
            "tenure_months",
            format!("Tenure must be one of {} months.", options.join(", ")),
        ));
    }

    price_terms(application, policy, LoanTerms::new(amount, rate, tenure))
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// pending -> under_review, attaching a fresh assessment at the seeded terms.
pub fn start_review(
    application: &LoanApplication,
    policy: &LendingPolicy,
) -> BuyoutFinanceResult<LoanApplication> {
    require_status(application, &[ApplicationStatus::Pending], "review")?;
    let seed = seed_terms(application, policy)?;

    tracing::debug!(id = %application.id, risk = %seed.risk.risk_category, "application under review");

    Ok(LoanApplication {
        status: ApplicationStatus::UnderReview,
        risk: Some(seed.risk),
        ..application.clone()
    })
}

/// pending | under_review -> approved on the overridden terms.
pub fn approve(
    application: &LoanApplication,
    overrides: &TermOverrides,
    conditions: &[String],
    comments: &str,
    policy: &LendingPolicy,
) -> BuyoutFinanceResult<(LoanApplication, ApprovalDecision)> {
    require_status(
        application,
        &[ApplicationStatus::Pending, ApplicationStatus::UnderReview],
        "approve",
    )?;
    let terms = revise_terms(application, overrides, policy)?;

    let mut kept: Vec<String> = Vec::new();
    for condition in conditions {
        let condition = condition.trim();
        if !condition.is_empty() && !kept.iter().any(|c| c == condition) {
            kept.push(condition.to_string());
        }
    }

    tracing::debug!(
        id = %application.id,
        amount = %terms.approved_amount,
        rate = %terms.interest_rate_percent,
        "application approved"
    );

    let updated = LoanApplication {
        status: ApplicationStatus::Approved,
        risk: Some(terms.risk.clone()),
        ..application.clone()
    };
    let decision = ApprovalDecision {
        application_id: application.id.clone(),
        terms,
        conditions: kept,
        comments: comments.trim().to_string(),
    };
    Ok((updated, decision))
}

/// pending | under_review -> rejected. The reason must not be blank.
pub fn reject(
    application: &LoanApplication,
    reason: &str,
) -> BuyoutFinanceResult<(LoanApplication, Rejection)> {
    require_status(
        application,
        &[ApplicationStatus::Pending, ApplicationStatus::UnderReview],
        "reject",
    )?;
    validate_application(application)?;

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(BuyoutFinanceError::invalid(
            "reason",
            "A rejection reason is required.",
        ));
    }

    let risk = classify(
        application.credit_score,
        Some(application.current_ctc),
        None,
    )?;

    tracing::debug!(id = %application.id, reason, "application rejected");

    let updated = LoanApplication {
        status: ApplicationStatus::Rejected,
        risk: Some(risk.clone()),
        ..application.clone()
    };
    let rejection = Rejection {
        application_id: application.id.clone(),
        reason: reason.to_string(),
        risk,
    };
    Ok((updated, rejection))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn price_terms(
    application: &LoanApplication,
    policy: &LendingPolicy,
    terms: LoanTerms,
) -> BuyoutFinanceResult<ApprovalTerms> {
    let amortization = calculate_amortization(&terms)?;
    let risk = classify(
        application.credit_score,
        Some(application.current_ctc),
        Some(amortization.monthly_emi),
    )?;
    let processing_fee = terms
        .principal
        .checked_mul(policy.processing_fee_percent)
        .map(|fee| round_rupees(fee / dec!(100)))
        .ok_or_else(|| {
            BuyoutFinanceError::invalid("approved_amount", "Amount is too large to charge a fee on.")
        })?;

    Ok(ApprovalTerms {
        interest_rate_percent: terms.annual_rate_percent,
        approved_amount: terms.principal,
        tenure_months: terms.tenure_months,
        monthly_emi: amortization.monthly_emi,
        total_repayment: amortization.total_repayment,
        total_interest: amortization.total_interest,
        processing_fee,
        emi_to_income_ratio_percent: risk
            .emi_to_income_ratio_percent
            .unwrap_or(Decimal::ZERO),
        high_ratio_warning: risk.high_ratio_warning,
        within_recommended_band: risk.recommended_rate_band.contains(terms.annual_rate_percent),
        risk,
    })
}

fn validate_application(application: &LoanApplication) -> BuyoutFinanceResult<()> {
    if application.loan_amount <= Decimal::ZERO {
        return Err(BuyoutFinanceError::invalid(
            "loan_amount",
            "Requested loan amount must be positive.",
        ));
    }
    if application.tenure_months == 0 {
        return Err(BuyoutFinanceError::invalid(
            "tenure_months",
            "Requested tenure must be at least 1 month.",
        ));
    }
    if application.current_ctc <= Decimal::ZERO {
        return Err(BuyoutFinanceError::invalid(
            "current_ctc",
            "Current CTC must be positive.",
        ));
    }
    Ok(())
}

fn require_status(
    application: &LoanApplication,
    allowed: &[ApplicationStatus],
    action: &str,
) -> BuyoutFinanceResult<()> {
    if allowed.contains(&application.status) {
        Ok(())
    } else {
        Err(BuyoutFinanceError::invalid(
            "status",
            format!(
                "Cannot {action} application {} while it is {}.",
                application.id, application.status
            ),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
