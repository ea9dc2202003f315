use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use buyout_core::approval::LendingPolicy;
use buyout_core::buyout::calculator::{self, SalaryProfile};
use buyout_core::buyout::quote::{self, BuyoutQuoteInput};

use crate::input;

/// Arguments for the buyout amount
#[derive(Args)]
pub struct BuyoutArgs {
    /// Gross monthly salary in rupees
    #[arg(long)]
    pub monthly_salary: Option<Decimal>,

    /// Annual CTC in rupees (used when --monthly-salary is absent)
    #[arg(long)]
    pub annual_ctc: Option<Decimal>,

    /// Notice period to buy out, in days (30, 60, 90, 120 are standard)
    #[arg(long)]
    pub notice_period_days: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a buyout financing quote
#[derive(Args)]
pub struct QuoteArgs {
    /// Gross monthly salary in rupees
    #[arg(long)]
    pub monthly_salary: Option<Decimal>,

    /// Notice period to buy out, in days
    #[arg(long)]
    pub notice_period_days: Option<u32>,

    /// Annual interest rate in percent (defaults to the policy calculator rate)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenures to quote, in months (defaults to the policy quick tenures)
    #[arg(long, value_delimiter = ',')]
    pub tenures: Option<Vec<u32>>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_buyout(args: BuyoutArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(profile) = input::read_input::<SalaryProfile>(args.input.as_deref())? {
        let result = calculator::calculate_buyout_for(&profile)?;
        return Ok(serde_json::to_value(result)?);
    }

    let days = args
        .notice_period_days
        .ok_or("--notice-period-days is required (or provide --input)")?;
    let result = match (args.monthly_salary, args.annual_ctc) {
        (Some(salary), _) => calculator::calculate_buyout(salary, days)?,
        (None, Some(ctc)) => calculator::calculate_buyout_from_annual_ctc(ctc, days)?,
        (None, None) => {
            return Err("--monthly-salary or --annual-ctc is required (or provide --input)".into())
        }
    };
    Ok(serde_json::to_value(result)?)
}

pub fn run_quote(args: QuoteArgs, policy: &LendingPolicy) -> Result<Value, Box<dyn std::error::Error>> {
    let mut quote_input: BuyoutQuoteInput =
        match input::read_input(args.input.as_deref())? {
            Some(data) => data,
            None => BuyoutQuoteInput {
                monthly_salary: args
                    .monthly_salary
                    .ok_or("--monthly-salary is required (or provide --input)")?,
                notice_period_days: args
                    .notice_period_days
                    .ok_or("--notice-period-days is required (or provide --input)")?,
                annual_rate_percent: args.rate,
                tenures: args.tenures,
            },
        };

    // Unpriced quotes follow the lender's calculator settings.
    if quote_input.annual_rate_percent.is_none() {
        quote_input.annual_rate_percent = Some(policy.calculator_rate_percent);
    }
    if quote_input.tenures.is_none() {
        quote_input.tenures = Some(policy.quick_tenures.clone());
    }

    let result = quote::quote_buyout_financing(&quote_input)?;
    Ok(serde_json::to_value(result)?)
}
