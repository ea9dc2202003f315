use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use buyout_core::amortization::schedule;
use buyout_core::amortization::sweep;
use buyout_core::amortization::{calculate_amortization, LoanTerms};

use crate::input;

/// Loan terms shared by the amortization commands
#[derive(Args)]
pub struct LoanFlags {
    /// Principal in rupees
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (12 for 12% p.a.)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,
}

impl LoanFlags {
    fn to_terms(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        Ok(LoanTerms::new(
            self.principal
                .ok_or("--principal is required (or provide --input)")?,
            self.rate.ok_or("--rate is required (or provide --input)")?,
            self.tenure.ok_or("--tenure is required (or provide --input)")?,
        ))
    }
}

/// Arguments for a single EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    #[command(flatten)]
    pub loan: LoanFlags,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the repayment schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanFlags,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for tenure / rate sweeps
#[derive(Args)]
pub struct SweepArgs {
    #[command(flatten)]
    pub loan: LoanFlags,

    /// Alternate tenures in months, e.g. 6,9,12,15,18,24
    #[arg(long, value_delimiter = ',')]
    pub tenures: Option<Vec<u32>>,

    /// Alternate annual rates in percent, e.g. 11,12,13
    #[arg(long, value_delimiter = ',')]
    pub rates: Option<Vec<Decimal>>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// JSON shape accepted by `sweep --input`.
#[derive(Deserialize)]
struct SweepRequest {
    #[serde(flatten)]
    loan: LoanTerms,
    #[serde(default)]
    tenures: Option<Vec<u32>>,
    #[serde(default)]
    rates: Option<Vec<Decimal>>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = match input::read_input(args.input.as_deref())? {
        Some(terms) => terms,
        None => args.loan.to_terms()?,
    };
    let result = calculate_amortization(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = match input::read_input(args.input.as_deref())? {
        Some(terms) => terms,
        None => args.loan.to_terms()?,
    };
    let result = schedule::build_schedule_report(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sweep(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = match input::read_input::<SweepRequest>(args.input.as_deref())? {
        Some(request) => request,
        None => SweepRequest {
            loan: args.loan.to_terms()?,
            tenures: args.tenures,
            rates: args.rates,
        },
    };

    match (request.tenures, request.rates) {
        (Some(tenures), Some(rates)) => {
            let grid = sweep::emi_grid(request.loan.principal, &rates, &tenures)?;
            Ok(serde_json::to_value(grid)?)
        }
        (Some(tenures), None) => Ok(serde_json::to_value(sweep::tenure_sweep(
            &request.loan,
            &tenures,
        )?)?),
        (None, Some(rates)) => Ok(serde_json::to_value(sweep::rate_sweep(
            &request.loan,
            &rates,
        )?)?),
        (None, None) => Err("--tenures and/or --rates is required".into()),
    }
}
