#![cfg(feature = "approval")]

use buyout_core::approval::pipeline::summarize_pipeline;
use buyout_core::approval::workflow::{REJECTION_REASONS, STANDARD_CONDITIONS};
use buyout_core::approval::{
    approve, reject, revise_terms, seed_terms, start_review, ApplicationStatus, LendingPolicy,
    LoanApplication, TermOverrides,
};
use buyout_core::risk::RiskCategory;
use buyout_core::BuyoutFinanceError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn application(score: u32) -> LoanApplication {
    LoanApplication {
        id: "APP-001".into(),
        candidate_name: "Test Candidate".into(),
        loan_amount: dec!(300_000),
        tenure_months: 12,
        current_ctc: dec!(1_200_000),
        credit_score: score,
        notice_period_days: 90,
        status: ApplicationStatus::Pending,
        risk: None,
    }
}

fn field_of(err: BuyoutFinanceError) -> String {
    match err {
        BuyoutFinanceError::InvalidArgument { field, .. } => field,
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }
}

// ===========================================================================
// Seeding and revising terms
// ===========================================================================

#[test]
fn test_seed_terms_for_excellent_score() {
    let terms = seed_terms(&application(780), &LendingPolicy::default()).unwrap();
    assert_eq!(terms.interest_rate_percent, dec!(11));
    assert_eq!(terms.monthly_emi, dec!(26514));
    assert_eq!(terms.processing_fee, dec!(6000));
    assert_eq!(terms.total_repayment, dec!(318_168));
    assert!(terms.within_recommended_band);
    assert!(!terms.high_ratio_warning);
    assert_eq!(terms.risk.risk_category, RiskCategory::Low);
}

#[test]
fn test_seed_rate_clamped_by_policy() {
    let policy = LendingPolicy {
        max_rate_percent: dec!(12),
        ..LendingPolicy::default()
    };
    let terms = seed_terms(&application(610), &policy).unwrap();
    assert_eq!(terms.interest_rate_percent, dec!(12));
    assert!(!terms.within_recommended_band);
}

#[test]
fn test_revise_terms_reprices() {
    let overrides = TermOverrides {
        interest_rate_percent: Some(dec!(12.5)),
        tenure_months: Some(18),
        approved_amount: None,
    };
    let terms = revise_terms(&application(720), &overrides, &LendingPolicy::default()).unwrap();
    assert_eq!(terms.monthly_emi, dec!(18364));
    assert!(terms.within_recommended_band);
}

#[test]
fn test_revise_terms_rejects_off_policy_values() {
    let app = application(720);
    let policy = LendingPolicy::default();

    let off_grid = TermOverrides {
        interest_rate_percent: Some(dec!(12.3)),
        ..TermOverrides::default()
    };
    assert_eq!(
        field_of(revise_terms(&app, &off_grid, &policy).unwrap_err()),
        "interest_rate_percent"
    );

    let too_much = TermOverrides {
        approved_amount: Some(dec!(300_001)),
        ..TermOverrides::default()
    };
    assert_eq!(
        field_of(revise_terms(&app, &too_much, &policy).unwrap_err()),
        "approved_amount"
    );

    let too_long = TermOverrides {
        tenure_months: Some(36),
        ..TermOverrides::default()
    };
    assert_eq!(
        field_of(revise_terms(&app, &too_long, &policy).unwrap_err()),
        "tenure_months"
    );
}

#[test]
fn test_partial_approval_keeps_seeded_rate() {
    let overrides = TermOverrides {
        approved_amount: Some(dec!(250_000)),
        tenure_months: Some(18),
        ..TermOverrides::default()
    };
    let terms = revise_terms(&application(760), &overrides, &LendingPolicy::default()).unwrap();
    assert_eq!(terms.interest_rate_percent, dec!(11));
    assert_eq!(terms.monthly_emi, dec!(15130));
    assert_eq!(terms.processing_fee, dec!(5000));
}

// ===========================================================================
// Status transitions
// ===========================================================================

#[test]
fn test_review_then_approve() {
    let policy = LendingPolicy::default();
    let reviewed = start_review(&application(780), &policy).unwrap();
    assert_eq!(reviewed.status, ApplicationStatus::UnderReview);
    assert!(reviewed.risk.is_some());

    let conditions: Vec<String> = vec![
        STANDARD_CONDITIONS[0].into(),
        format!("  {}  ", STANDARD_CONDITIONS[0]),
        STANDARD_CONDITIONS[6].into(),
        "   ".into(),
    ];
    let (approved, decision) = approve(
        &reviewed,
        &TermOverrides::default(),
        &conditions,
        " Good profile ",
        &policy,
    )
    .unwrap();
    assert_eq!(approved.status, ApplicationStatus::Approved);
    assert_eq!(decision.application_id, "APP-001");
    assert_eq!(decision.conditions.len(), 2);
    assert_eq!(decision.comments, "Good profile");
}

#[test]
fn test_decided_application_is_final() {
    let policy = LendingPolicy::default();
    let (rejected, _) = reject(&application(560), REJECTION_REASONS[0]).unwrap();
    assert_eq!(rejected.status, ApplicationStatus::Rejected);

    assert_eq!(field_of(start_review(&rejected, &policy).unwrap_err()), "status");
    assert_eq!(
        field_of(approve(&rejected, &TermOverrides::default(), &[], "", &policy).unwrap_err()),
        "status"
    );
    assert_eq!(field_of(reject(&rejected, "again").unwrap_err()), "status");
}

#[test]
fn test_review_only_from_pending() {
    let policy = LendingPolicy::default();
    let reviewed = start_review(&application(700), &policy).unwrap();
    assert_eq!(field_of(start_review(&reviewed, &policy).unwrap_err()), "status");
}

#[test]
fn test_rejection_needs_reason() {
    assert_eq!(field_of(reject(&application(640), "  ").unwrap_err()), "reason");
}

#[test]
fn test_rejection_attaches_risk() {
    let (_, rejection) = reject(&application(590), REJECTION_REASONS[7]).unwrap();
    assert_eq!(rejection.reason, "High debt-to-income ratio");
    assert_eq!(rejection.risk.risk_category, RiskCategory::High);
}

// ===========================================================================
// Pipeline
// ===========================================================================

#[test]
fn test_pipeline_after_transitions() {
    let policy = LendingPolicy::default();
    let pending = application(680);
    let reviewed = start_review(&application(760), &policy).unwrap();
    let (approved, _) = approve(
        &application(720),
        &TermOverrides::default(),
        &[],
        "",
        &policy,
    )
    .unwrap();
    let (rejected, _) = reject(&application(580), REJECTION_REASONS[0]).unwrap();

    let summary = summarize_pipeline(&[pending, reviewed, approved, rejected]).unwrap();
    assert_eq!(summary.total, 4);
    assert_eq!((summary.low_risk, summary.medium_risk, summary.high_risk), (1, 2, 1));
    assert_eq!(summary.requested_amount, dec!(1_200_000));
    assert_eq!(summary.open_amount, dec!(600_000));
}
