//! Quote drought cover from a rainfall history CSV
//!
//! Prints historical payouts and the premium for one contract, or a premium
//! grid across trigger/exit thresholds.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use drought_cover::pricing::ThresholdRange;
use drought_cover::rainfall::load_rainfall_table;
use drought_cover::{CoverPeriod, PremiumPolicy, PricingEngine, ProductTerms, QuoteRequest};

#[derive(Parser, Debug)]
#[command(name = "price_cover", about = "Parametric drought cover pricing")]
struct Cli {
    /// Rainfall history CSV (one column per year, one row per day)
    #[arg(long, default_value = "data/sample_rainfall.csv")]
    data: PathBuf,

    /// Product terms JSON; defaults apply when omitted
    #[arg(long)]
    terms: Option<PathBuf>,

    /// Override the premium policy from the product terms
    #[arg(long, value_enum)]
    premium_policy: Option<PolicyArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Historical payouts and premium for one contract
    Quote {
        #[command(flatten)]
        contract: ContractArgs,

        /// Print the full quote as JSON
        #[arg(long)]
        json: bool,

        /// Also write the payout series to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Premiums across trigger and exit thresholds
    Grid {
        #[arg(long, default_value_t = 246)]
        start: usize,
        #[arg(long, default_value_t = 275)]
        end: usize,
        #[arg(long, default_value_t = 1.0)]
        area: f64,
        #[arg(long, default_value_t = 60.0)]
        trigger_from: f64,
        #[arg(long, default_value_t = 90.0)]
        trigger_to: f64,
        #[arg(long, default_value_t = 20.0)]
        exit_from: f64,
        #[arg(long, default_value_t = 40.0)]
        exit_to: f64,
        #[arg(long, default_value_t = 1.0)]
        step: f64,
    },
}

#[derive(Args, Debug)]
struct ContractArgs {
    /// First covered day of the season (inclusive)
    #[arg(long, default_value_t = 246)]
    start: usize,
    /// Day after the last covered day (exclusive)
    #[arg(long, default_value_t = 275)]
    end: usize,
    /// Area under cultivation
    #[arg(long, default_value_t = 1.0)]
    area: f64,
    /// Trigger threshold (mm)
    #[arg(long, default_value_t = 80.0)]
    trigger: f64,
    /// Exit threshold (mm)
    #[arg(long, default_value_t = 20.0)]
    exit: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    TruncateThenRound,
    RoundOnly,
}

impl From<PolicyArg> for PremiumPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::TruncateThenRound => PremiumPolicy::TruncateThenRound,
            PolicyArg::RoundOnly => PremiumPolicy::RoundOnly,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let table = load_rainfall_table(&cli.data)
        .with_context(|| format!("loading rainfall history from {}", cli.data.display()))?;

    let mut terms = match &cli.terms {
        Some(path) => ProductTerms::from_json_file(path)
            .with_context(|| format!("loading product terms from {}", path.display()))?,
        None => ProductTerms::default(),
    };
    if let Some(policy) = cli.premium_policy {
        terms.premium_policy = policy.into();
    }

    let engine = PricingEngine::with_terms(Arc::new(table), terms);

    match cli.command {
        Command::Quote { contract, json, output } => {
            let request = QuoteRequest::new(
                contract.start,
                contract.end,
                contract.area,
                contract.trigger,
                contract.exit,
            );
            let quote = engine.quote(&request).context("pricing contract")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!("{}", quote.product);
                println!(
                    "Days {}..{}, area {}, trigger {}mm, exit {}mm, max payout {:.2}",
                    quote.period.start,
                    quote.period.end,
                    request.area,
                    request.trigger,
                    request.exit,
                    quote.max_payout
                );
                println!("{:<10} {:>12} {:>12}", "Year", "Rainfall", "Payout");
                for ((label, rainfall), payout) in quote
                    .cumulative_rainfall
                    .iter()
                    .zip(quote.historical_payouts.values())
                {
                    println!("{:<10} {:>12.1} {:>12.2}", label, rainfall, payout);
                }
                println!("Mean payout: {:.2}", quote.mean_payout);
                println!("Premium:     {}", quote.premium);
            }

            if let Some(path) = output {
                let mut writer = csv::Writer::from_path(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                writer.write_record(["year", "cumulative_rainfall", "payout"])?;
                for ((label, rainfall), payout) in quote
                    .cumulative_rainfall
                    .iter()
                    .zip(quote.historical_payouts.values())
                {
                    writer.write_record([label.to_string(), rainfall.to_string(), payout.to_string()])?;
                }
                writer.flush()?;
                info!("Payout series written to {}", path.display());
            }
        }
        Command::Grid {
            start: day_start,
            end,
            area,
            trigger_from,
            trigger_to,
            exit_from,
            exit_to,
            step,
        } => {
            let period = CoverPeriod::new(day_start, end)?;
            let cells = engine.premium_grid(
                period,
                area,
                &ThresholdRange::new(trigger_from, trigger_to, step),
                &ThresholdRange::new(exit_from, exit_to, step),
            )?;
            println!("{:>8} {:>8} {:>12}", "Trigger", "Exit", "Premium");
            for cell in &cells {
                println!("{:>8} {:>8} {:>12}", cell.trigger, cell.exit, cell.premium);
            }
        }
    }

    info!("Done in {:?}", start.elapsed());
    Ok(())
}
