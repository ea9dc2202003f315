use buyout_core::amortization::LoanTerms;
use buyout_core::risk::classifier::{
    assess_credit, classify_profile, CreditAssessmentInput, CreditProfile,
};
use buyout_core::risk::{classify, default_interest_rate, RiskCategory, ScoreRating};
use buyout_core::BuyoutFinanceError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

#[test]
fn test_every_score_in_range_classifies() {
    for score in 300..=900 {
        let a = classify(score, None, None).unwrap();
        assert!(a.recommended_rate_band.contains(a.seed_rate_percent), "score {score}");
        assert_eq!(default_interest_rate(score).unwrap(), a.seed_rate_percent);
    }
}

#[test]
fn test_rating_is_monotone_in_score() {
    fn rank(r: ScoreRating) -> u8 {
        match r {
            ScoreRating::VeryPoor => 0,
            ScoreRating::Poor => 1,
            ScoreRating::Fair => 2,
            ScoreRating::Good => 3,
            ScoreRating::Excellent => 4,
        }
    }
    let mut last = 0;
    for score in 300..=900 {
        let current = rank(classify(score, None, None).unwrap().score_rating);
        assert!(current >= last);
        last = current;
    }
}

#[test]
fn test_boundary_749_vs_750() {
    let good = classify(749, None, None).unwrap();
    let excellent = classify(750, None, None).unwrap();
    assert_eq!(good.score_rating, ScoreRating::Good);
    assert_eq!(good.risk_category, RiskCategory::Medium);
    assert_eq!(excellent.score_rating, ScoreRating::Excellent);
    assert_eq!(excellent.risk_category, RiskCategory::Low);
    assert_eq!(good.recommended_rate_band.to_string(), "12-13%");
}

#[test]
fn test_out_of_scale_scores() {
    for score in [299, 901] {
        match classify(score, None, None).unwrap_err() {
            BuyoutFinanceError::InvalidArgument { field, .. } => assert_eq!(field, "credit_score"),
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }
}

#[test]
fn test_forty_percent_rule() {
    let profile = CreditProfile {
        credit_score: 720,
        annual_income: Some(dec!(1_200_000)),
        proposed_emi: Some(dec!(41_000)),
    };
    assert!(classify_profile(&profile).unwrap().high_ratio_warning);

    let at_limit = CreditProfile {
        proposed_emi: Some(dec!(40_000)),
        ..profile.clone()
    };
    assert!(!classify_profile(&at_limit).unwrap().high_ratio_warning);

    let below = CreditProfile {
        proposed_emi: Some(dec!(39_000)),
        ..profile
    };
    let a = classify_profile(&below).unwrap();
    assert_eq!(a.emi_to_income_ratio_percent, Some(dec!(39)));
    assert!(!a.high_ratio_warning);
}

#[test]
fn test_cibil_view_only_needs_score() {
    let a = classify(615, None, None).unwrap();
    assert_eq!(a.score_rating.to_string(), "Poor");
    assert_eq!(a.rating_description, "High credit risk");
    assert_eq!(a.risk_category.to_string(), "high");
    assert_eq!(a.emi_to_income_ratio_percent, None);
}

#[test]
fn test_assessment_json_shape() {
    let a = classify(580, Some(dec!(600_000)), Some(dec!(10_000))).unwrap();
    let json = serde_json::to_value(&a).unwrap();
    assert_eq!(json["score_rating"], "Very Poor");
    assert_eq!(json["risk_category"], "high");
    assert_eq!(json["recommended_rate_band"]["min_percent"], "14");
    assert_eq!(json["high_ratio_warning"], false);
}

#[test]
fn test_explicit_emi_wins_over_loan_terms() {
    let input = CreditAssessmentInput {
        credit_score: 700,
        annual_income: Some(dec!(900_000)),
        proposed_emi: Some(dec!(20_000)),
        loan: Some(LoanTerms::new(dec!(100_000), dec!(12), 12)),
    };
    let out = assess_credit(&input).unwrap();
    // 20000 / 75000
    let ratio = out.result.assessment.emi_to_income_ratio_percent.unwrap();
    assert_eq!(ratio.round_dp(2), dec!(26.67));
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_emi_without_income_warns() {
    let input = CreditAssessmentInput {
        credit_score: 800,
        annual_income: None,
        proposed_emi: None,
        loan: Some(LoanTerms::new(dec!(100_000), dec!(12), 12)),
    };
    let out = assess_credit(&input).unwrap();
    assert_eq!(out.result.assessment.emi_to_income_ratio_percent, None);
    assert!(out.warnings[0].contains("No annual income"));
}
