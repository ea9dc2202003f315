use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use buyout_core::amortization::LoanTerms;
use buyout_core::risk::classifier::{self, CreditAssessmentInput};

use crate::input;

/// Arguments for credit classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// CIBIL score, 300-900
    #[arg(long)]
    pub credit_score: Option<u32>,

    /// Annual income in rupees
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Proposed monthly EMI in rupees
    #[arg(long)]
    pub proposed_emi: Option<Decimal>,

    /// Loan principal; with --rate and --tenure the EMI is derived
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent for the derived EMI
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months for the derived EMI
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assessment_input: CreditAssessmentInput = match input::read_input(args.input.as_deref())? {
        Some(data) => data,
        None => {
            let loan = match (args.principal, args.rate, args.tenure) {
                (Some(principal), Some(rate), Some(tenure)) => {
                    Some(LoanTerms::new(principal, rate, tenure))
                }
                (None, None, None) => None,
                _ => return Err("--principal, --rate and --tenure must be given together".into()),
            };
            CreditAssessmentInput {
                credit_score: args
                    .credit_score
                    .ok_or("--credit-score is required (or provide --input)")?,
                annual_income: args.annual_income,
                proposed_emi: args.proposed_emi,
                loan,
            }
        }
    };
    let result = classifier::assess_credit(&assessment_input)?;
    Ok(serde_json::to_value(result)?)
}
