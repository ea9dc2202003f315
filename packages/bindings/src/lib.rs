use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use buyout_core::amortization::{schedule, sweep, LoanTerms};
use buyout_core::approval::{
    self, pipeline, ApprovalDecision, LendingPolicy, LoanApplication, Rejection, TermOverrides,
};
use buyout_core::buyout::{calculator, quote};
use buyout_core::risk::classifier;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_policy(policy_json: Option<String>) -> NapiResult<LendingPolicy> {
    match policy_json {
        Some(json) => LendingPolicy::from_json_str(&json).map_err(to_napi_error),
        None => Ok(LendingPolicy::default()),
    }
}

// ---------------------------------------------------------------------------
// Buyout
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_buyout(input_json: String) -> NapiResult<String> {
    let input: calculator::SalaryProfile =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculator::calculate_buyout_for(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct CtcBuyoutRequest {
    annual_ctc: Decimal,
    notice_period_days: u32,
}

#[napi]
pub fn calculate_buyout_from_ctc(input_json: String) -> NapiResult<String> {
    let input: CtcBuyoutRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        calculator::calculate_buyout_from_annual_ctc(input.annual_ctc, input.notice_period_days)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn quote_buyout_financing(input_json: String) -> NapiResult<String> {
    let input: quote::BuyoutQuoteInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = quote::quote_buyout_financing(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_amortization(input_json: String) -> NapiResult<String> {
    let input: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = buyout_core::amortization::calculate_amortization(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_schedule_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct TenureSweepRequest {
    #[serde(flatten)]
    loan: LoanTerms,
    tenures: Vec<u32>,
}

#[derive(Deserialize)]
struct RateSweepRequest {
    #[serde(flatten)]
    loan: LoanTerms,
    rates: Vec<Decimal>,
}

#[derive(Deserialize)]
struct GridRequest {
    principal: Decimal,
    rates: Vec<Decimal>,
    tenures: Vec<u32>,
}

#[napi]
pub fn tenure_sweep(input_json: String) -> NapiResult<String> {
    let input: TenureSweepRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sweep::tenure_sweep(&input.loan, &input.tenures).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn rate_sweep(input_json: String) -> NapiResult<String> {
    let input: RateSweepRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sweep::rate_sweep(&input.loan, &input.rates).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn emi_grid(input_json: String) -> NapiResult<String> {
    let input: GridRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        sweep::emi_grid(input.principal, &input.rates, &input.tenures).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[napi]
pub fn classify_credit(input_json: String) -> NapiResult<String> {
    let input: classifier::CreditProfile =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = classifier::classify_profile(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn assess_credit(input_json: String) -> NapiResult<String> {
    let input: classifier::CreditAssessmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = classifier::assess_credit(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Approval
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ApproveRequest {
    application: LoanApplication,
    #[serde(default)]
    overrides: TermOverrides,
    #[serde(default)]
    conditions: Vec<String>,
    #[serde(default)]
    comments: String,
}

#[derive(Deserialize)]
struct ReviseRequest {
    application: LoanApplication,
    #[serde(default)]
    overrides: TermOverrides,
}

#[derive(Deserialize)]
struct RejectRequest {
    application: LoanApplication,
    reason: String,
}

#[derive(Serialize)]
struct Approved {
    application: LoanApplication,
    decision: ApprovalDecision,
}

#[derive(Serialize)]
struct Rejected {
    application: LoanApplication,
    rejection: Rejection,
}

#[napi]
pub fn seed_terms(application_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let application: LoanApplication =
        serde_json::from_str(&application_json).map_err(to_napi_error)?;
    let policy = parse_policy(policy_json)?;
    let output = approval::seed_terms(&application, &policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn revise_terms(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let input: ReviseRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let policy = parse_policy(policy_json)?;
    let output = approval::revise_terms(&input.application, &input.overrides, &policy)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn start_review(application_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let application: LoanApplication =
        serde_json::from_str(&application_json).map_err(to_napi_error)?;
    let policy = parse_policy(policy_json)?;
    let output = approval::start_review(&application, &policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Returns `{"application": ..., "decision": ...}`.
#[napi]
pub fn approve_application(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let input: ApproveRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let policy = parse_policy(policy_json)?;
    let (application, decision) = approval::approve(
        &input.application,
        &input.overrides,
        &input.conditions,
        &input.comments,
        &policy,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&Approved {
        application,
        decision,
    })
    .map_err(to_napi_error)
}

/// Returns `{"application": ..., "rejection": ...}`.
#[napi]
pub fn reject_application(input_json: String) -> NapiResult<String> {
    let input: RejectRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let (application, rejection) =
        approval::reject(&input.application, &input.reason).map_err(to_napi_error)?;
    serde_json::to_string(&Rejected {
        application,
        rejection,
    })
    .map_err(to_napi_error)
}

#[napi]
pub fn summarize_pipeline(applications_json: String) -> NapiResult<String> {
    let applications: Vec<LoanApplication> =
        serde_json::from_str(&applications_json).map_err(to_napi_error)?;
    let output = pipeline::summarize_pipeline(&applications).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
