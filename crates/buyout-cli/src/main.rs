mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use buyout_core::approval::LendingPolicy;
use commands::amortization::{EmiArgs, ScheduleArgs, SweepArgs};
use commands::approval::{ApprovalSeedArgs, PipelineArgs};
use commands::buyout::{BuyoutArgs, QuoteArgs};
use commands::risk::ClassifyArgs;

/// Notice-period buyout financing calculations
#[derive(Parser)]
#[command(
    name = "nbx",
    version,
    about = "Notice-period buyout financing calculations",
    long_about = "A CLI for pricing notice-period buyouts with decimal precision. \
                  Computes the buyout owed to an employer, EMI options for financing \
                  it, repayment schedules, credit-score risk tiers and lender \
                  approval terms."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Lending policy file (.json, .yaml or .yml)
    #[arg(long, global = true)]
    policy: Option<String>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Amount owed to the current employer to waive the notice period
    Buyout(BuyoutArgs),
    /// Buyout amount plus EMI options for financing it
    Quote(QuoteArgs),
    /// Monthly EMI, total interest and total repayment for a loan
    Emi(EmiArgs),
    /// Month-by-month reducing-balance repayment schedule
    Schedule(ScheduleArgs),
    /// Re-price a loan across alternate tenures and/or rates
    Sweep(SweepArgs),
    /// Classify a CIBIL score into rating, risk category and rate band
    Classify(ClassifyArgs),
    /// Seed (and optionally revise) approval terms for an application
    ApprovalSeed(ApprovalSeedArgs),
    /// Tally a list of applications by status and risk
    Pipeline(PipelineArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_policy(path: Option<&str>) -> Result<LendingPolicy, Box<dyn std::error::Error>> {
    match path {
        Some(path) => input::file::read_policy(path),
        None => Ok(LendingPolicy::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let policy = match load_policy(cli.policy.as_deref()) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Buyout(args) => commands::buyout::run_buyout(args),
        Commands::Quote(args) => commands::buyout::run_quote(args, &policy),
        Commands::Emi(args) => commands::amortization::run_emi(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Sweep(args) => commands::amortization::run_sweep(args),
        Commands::Classify(args) => commands::risk::run_classify(args),
        Commands::ApprovalSeed(args) => commands::approval::run_approval_seed(args, &policy),
        Commands::Pipeline(args) => commands::approval::run_pipeline(args),
        Commands::Version => {
            println!("nbx {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
