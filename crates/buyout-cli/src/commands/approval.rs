use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use buyout_core::approval::pipeline;
use buyout_core::approval::{revise_terms, LendingPolicy, LoanApplication, TermOverrides};

use crate::input;

/// Arguments for seeding approval terms
#[derive(Args)]
pub struct ApprovalSeedArgs {
    /// Path to JSON file: {"application": {...}, "overrides": {...}}
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the pipeline summary
#[derive(Args)]
pub struct PipelineArgs {
    /// Path to JSON file holding an array of applications
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct SeedRequest {
    application: LoanApplication,
    #[serde(default)]
    overrides: TermOverrides,
}

pub fn run_approval_seed(
    args: ApprovalSeedArgs,
    policy: &LendingPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request: SeedRequest = input::read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required")?;
    // Empty overrides reproduce the seeded terms.
    let result = revise_terms(&request.application, &request.overrides, policy)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_pipeline(args: PipelineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let applications: Vec<LoanApplication> = input::read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required")?;
    let result = pipeline::summarize_pipeline(&applications)?;
    Ok(serde_json::to_value(result)?)
}
