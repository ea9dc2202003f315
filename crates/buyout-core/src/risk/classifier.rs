use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::affordability::{emi_to_annual_income_ratio_percent, exceeds_high_ratio};
use crate::amortization::{calculate_amortization, AmortizationOutput, LoanTerms};
use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

pub const MIN_CREDIT_SCORE: u32 = 300;
pub const MAX_CREDIT_SCORE: u32 = 900;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreRating {
    Excellent,
    Good,
    Fair,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl std::fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    pub min_percent: Percent,
    pub max_percent: Percent,
}

impl RateBand {
    pub fn contains(&self, rate: Percent) -> bool {
        rate >= self.min_percent && rate <= self.max_percent
    }
}

impl std::fmt::Display for RateBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}%",
            self.min_percent.normalize(),
            self.max_percent.normalize()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditProfile {
    pub credit_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_emi: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub credit_score: u32,
    pub score_rating: ScoreRating,
    pub rating_description: String,
    pub risk_category: RiskCategory,
    pub recommended_rate_band: RateBand,
    /// Starting rate for an approval before a reviewer overrides it.
    pub seed_rate_percent: Percent,
    pub recommendation: String,
    /// Where the score sits on the 300-900 gauge, 0-100.
    pub score_position_percent: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi_to_income_ratio_percent: Option<Percent>,
    pub high_ratio_warning: bool,
}

/// Classifier input with an optional loan to derive the EMI from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditAssessmentInput {
    pub credit_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_emi: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan: Option<LoanTerms>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditAssessment {
    pub assessment: RiskAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan: Option<AmortizationOutput>,
}

// ---------------------------------------------------------------------------
// Score tiers
// ---------------------------------------------------------------------------

struct ScoreTier {
    floor: u32,
    rating: ScoreRating,
    description: &'static str,
    risk: RiskCategory,
    band: RateBand,
    seed_rate: Percent,
    recommendation: &'static str,
}

const HIGH_RISK_BAND: RateBand = RateBand {
    min_percent: dec!(14),
    max_percent: dec!(16),
};

const HIGH_RISK_RECOMMENDATION: &str = "High risk - Requires additional collateral";

/// Ordered from the highest floor down; the first tier whose floor the score
/// reaches applies.
static SCORE_TIERS: [ScoreTier; 5] = [
    ScoreTier {
        floor: 750,
        rating: ScoreRating::Excellent,
        description: "Very low credit risk",
        risk: RiskCategory::Low,
        band: RateBand {
            min_percent: dec!(11),
            max_percent: dec!(12),
        },
        seed_rate: dec!(11),
        recommendation: "Low risk - Approve with standard terms",
    },
    ScoreTier {
        floor: 700,
        rating: ScoreRating::Good,
        description: "Low credit risk",
        risk: RiskCategory::Medium,
        band: RateBand {
            min_percent: dec!(12),
            max_percent: dec!(13),
        },
        seed_rate: dec!(12),
        recommendation: "Moderate risk - Consider with competitive rates",
    },
    ScoreTier {
        floor: 650,
        rating: ScoreRating::Fair,
        description: "Moderate credit risk",
        risk: RiskCategory::Medium,
        band: RateBand {
            min_percent: dec!(13),
            max_percent: dec!(14),
        },
        seed_rate: dec!(13),
        recommendation: "Higher risk - Approve with adjusted terms",
    },
    ScoreTier {
        floor: 600,
        rating: ScoreRating::Poor,
        description: "High credit risk",
        risk: RiskCategory::High,
        band: HIGH_RISK_BAND,
        seed_rate: dec!(14),
        recommendation: HIGH_RISK_RECOMMENDATION,
    },
    ScoreTier {
        floor: MIN_CREDIT_SCORE,
        rating: ScoreRating::VeryPoor,
        description: "Very high credit risk",
        risk: RiskCategory::High,
        band: HIGH_RISK_BAND,
        seed_rate: dec!(14),
        recommendation: HIGH_RISK_RECOMMENDATION,
    },
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Map a CIBIL score, and optionally an income and proposed EMI, to a
/// rating, risk category, rate band and recommendation.
pub fn classify(
    credit_score: u32,
    annual_income: Option<Money>,
    proposed_emi: Option<Money>,
) -> BuyoutFinanceResult<RiskAssessment> {
    let tier = tier_for(credit_score)?;

    if let Some(income) = annual_income {
        if income <= Decimal::ZERO {
            return Err(BuyoutFinanceError::invalid(
                "annual_income",
                "Annual income must be positive.",
            ));
        }
    }
    if let Some(emi) = proposed_emi {
        if emi < Decimal::ZERO {
            return Err(BuyoutFinanceError::invalid(
                "proposed_emi",
                "Proposed EMI cannot be negative.",
            ));
        }
    }

    let emi_to_income_ratio_percent = match (annual_income, proposed_emi) {
        (Some(income), Some(emi)) => Some(emi_to_annual_income_ratio_percent(emi, income)?),
        _ => None,
    };
    let high_ratio_warning = emi_to_income_ratio_percent
        .map(exceeds_high_ratio)
        .unwrap_or(false);

    Ok(RiskAssessment {
        credit_score,
        score_rating: tier.rating,
        rating_description: tier.description.to_string(),
        risk_category: tier.risk,
        recommended_rate_band: tier.band,
        seed_rate_percent: tier.seed_rate,
        recommendation: tier.recommendation.to_string(),
        score_position_percent: score_position_percent(credit_score),
        emi_to_income_ratio_percent,
        high_ratio_warning,
    })
}

pub fn classify_profile(profile: &CreditProfile) -> BuyoutFinanceResult<RiskAssessment> {
    classify(
        profile.credit_score,
        profile.annual_income,
        profile.proposed_emi,
    )
}

/// Interest rate an approval starts from: 11% at 750+, 12% at 700+, 13% at
/// 650+, otherwise 14%.
pub fn default_interest_rate(credit_score: u32) -> BuyoutFinanceResult<Percent> {
    Ok(tier_for(credit_score)?.seed_rate)
}

/// Classify, deriving the proposed EMI from loan terms when only the loan
/// is known.
pub fn assess_credit(
    input: &CreditAssessmentInput,
) -> BuyoutFinanceResult<ComputationOutput<CreditAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = match &input.loan {
        Some(terms) => Some(calculate_amortization(terms)?),
        None => None,
    };

    let proposed_emi = match (input.proposed_emi, &loan) {
        (Some(emi), Some(out)) => {
            if emi != out.monthly_emi {
                warnings.push(format!(
                    "Explicit proposed EMI {emi} used; loan terms imply {}.",
                    out.monthly_emi
                ));
            }
            Some(emi)
        }
        (Some(emi), None) => Some(emi),
        (None, Some(out)) => {
            if out.monthly_emi.is_zero() {
                warnings.push(
                    "Loan EMI rounds to zero rupees; the EMI-to-income ratio understates the debt."
                        .into(),
                );
            }
            Some(out.monthly_emi)
        }
        (None, None) => None,
    };

    let assessment = classify(input.credit_score, input.annual_income, proposed_emi)?;

    if input.annual_income.is_none() && proposed_emi.is_some() {
        warnings.push("No annual income supplied; EMI-to-income ratio not computed.".into());
    }
    if let Some(ratio) = assessment.emi_to_income_ratio_percent {
        if assessment.high_ratio_warning {
            warnings.push(format!(
                "EMI is {}% of monthly income; consider requiring a guarantor.",
                round_percent(ratio)
            ));
        }
    }

    tracing::debug!(
        score = input.credit_score,
        rating = %assessment.score_rating,
        risk = %assessment.risk_category,
        "assessed credit profile"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "score_scale": format!("{MIN_CREDIT_SCORE}-{MAX_CREDIT_SCORE}"),
        "high_ratio_threshold_percent": super::affordability::HIGH_RATIO_THRESHOLD_PERCENT.to_string(),
        "monthly_income": "annual_income / 12",
    });

    Ok(with_metadata(
        "CIBIL score tiering with EMI-to-income check",
        &assumptions,
        warnings,
        elapsed,
        CreditAssessment { assessment, loan },
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn tier_for(credit_score: u32) -> BuyoutFinanceResult<&'static ScoreTier> {
    if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&credit_score) {
        return Err(BuyoutFinanceError::invalid(
            "credit_score",
            format!("Credit score must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE}."),
        ));
    }
    SCORE_TIERS
        .iter()
        .find(|tier| credit_score >= tier.floor)
        .ok_or_else(|| BuyoutFinanceError::invalid("credit_score", "No tier covers this score."))
}

fn score_position_percent(credit_score: u32) -> Percent {
    let span = Decimal::from(MAX_CREDIT_SCORE - MIN_CREDIT_SCORE);
    let offset = Decimal::from(credit_score - MIN_CREDIT_SCORE);
    round_percent(offset / span * dec!(100))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
