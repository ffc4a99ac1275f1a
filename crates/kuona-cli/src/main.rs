//! Command-line interface for kuona
//!
//! # Usage
//!
//! ```bash
//! # Features for the bundled sample transcript
//! kuona features --ticker AAPL --date 2025-01-28
//!
//! # Bulk rows from a transcript file, rendered as a table
//! kuona --transcripts calls.json --format table bulk --tickers AAPL,MSFT
//!
//! # Backtest 5-day returns
//! kuona --transcripts calls.json backtest --horizon 5
//! ```

mod output;

use clap::{Args, Parser, Subcommand};
use kuona_engine::{
    CachedPriceProvider, EarningsService, EngineConfig, EngineConfigBuilder,
    InMemoryTranscriptStore, YahooPriceProvider, parse_horizons, register_tools,
};
use kuona_tools::{ToolError, ToolRegistry};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use output::OutputFormat;

/// Exit status for a missing transcript or empty selection
const EXIT_NOT_FOUND: u8 = 2;
/// Exit status for malformed input or an unusable backtest selection
const EXIT_BAD_REQUEST: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "kuona", version)]
#[command(about = "Earnings-call sentiment features and event-study backtests", long_about = None)]
struct Cli {
    /// JSON file with `{ticker, call_date, text}` records (bundled sample if omitted)
    #[arg(long, global = true)]
    transcripts: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    /// Comma separated return horizons in days, e.g. `1,3,5`
    #[arg(long, global = true)]
    horizons: Option<String>,

    /// Calendar days fetched past the furthest horizon
    #[arg(long, global = true)]
    buffer_days: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Features and returns for one earnings call
    Features {
        #[arg(long)]
        ticker: String,
        /// Call date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Feature rows for every matching call
    Bulk(FilterArgs),
    /// Correlate sentiment with forward returns
    Backtest {
        #[command(flatten)]
        filter: FilterArgs,
        /// Return horizon in days
        #[arg(long)]
        horizon: Option<u32>,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Comma separated tickers
    #[arg(long)]
    tickers: Option<String>,
    /// Earliest call date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,
    /// Latest call date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,
}

impl FilterArgs {
    fn to_params(&self) -> Value {
        json!({
            "tickers": self.tickers,
            "start_date": self.start,
            "end_date": self.end,
        })
    }
}

impl Command {
    /// Tool name and parameters for this subcommand
    fn tool_call(&self) -> (&'static str, Value) {
        match self {
            Self::Features { ticker, date } => (
                "earnings_features",
                json!({ "ticker": ticker, "call_date": date }),
            ),
            Self::Bulk(filter) => ("earnings_features_bulk", filter.to_params()),
            Self::Backtest { filter, horizon } => {
                let mut params = filter.to_params();
                params["horizon"] = json!(horizon);
                ("earnings_backtest", params)
            }
        }
    }
}

fn exit_status(err: &ToolError) -> u8 {
    if err.is_not_found() {
        EXIT_NOT_FOUND
    } else if err.is_invalid_input() {
        EXIT_BAD_REQUEST
    } else {
        1
    }
}

fn engine_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    apply_overrides(cli, EngineConfig::builder().with_env())
}

/// Layer command-line flags over `builder`
fn apply_overrides(cli: &Cli, mut builder: EngineConfigBuilder) -> anyhow::Result<EngineConfig> {
    if let Some(horizons) = &cli.horizons {
        builder = builder.horizons(parse_horizons(horizons)?);
    }
    if let Some(days) = cli.buffer_days {
        builder = builder.price_buffer_days(days);
    }
    Ok(builder.build()?)
}

fn build_registry(cli: &Cli, config: EngineConfig) -> anyhow::Result<ToolRegistry> {
    let store = match &cli.transcripts {
        Some(path) => InMemoryTranscriptStore::from_json_file(path)?,
        None => InMemoryTranscriptStore::with_sample_data(),
    };

    let yahoo = YahooPriceProvider::new(config.rate_limit_per_minute)?;
    let prices = CachedPriceProvider::new(yahoo, config.price_cache_ttl);

    let service = EarningsService::new(Arc::new(store), Arc::new(prices), config)?;

    let registry = ToolRegistry::new();
    register_tools(&registry, Arc::new(service));
    Ok(registry)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    kuona_utils::init_tracing();

    let cli = Cli::parse();
    let app = kuona_utils::Config::from_env();
    info!(
        app = %app.app_name,
        version = %app.version,
        environment = %app.environment,
        "Starting kuona"
    );

    let config = engine_config(&cli)?;
    let horizons = config.horizons.clone();
    let registry = build_registry(&cli, config)?;

    let (tool, params) = cli.command.tool_call();
    match registry.execute(tool, params).await {
        Ok(value) => {
            println!("{}", output::render(&value, cli.format, &horizons)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(tool, error = %err, "Request failed");
            eprintln!("error: {err}");
            Ok(ExitCode::from(exit_status(&err)))
        }
    }
}
