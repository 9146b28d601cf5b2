use analysis_orchestrator::{AnalysisOrchestrator, DEFAULT_HORIZON_DAYS, DEFAULT_LOOKBACK_DAYS};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Synthetic market-analytics kernel: histories, ensemble forecasts,
/// technical signals, risk metrics, and market sentiment for a symbol.
#[derive(Parser)]
#[command(name = "predictlab", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full analysis pipeline for a symbol
    Analyze {
        symbol: String,

        /// Historical lookback window in days
        #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
        days: u32,

        /// Forecast horizon in days
        #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
        horizon: u32,
    },
    /// Search the built-in symbol directory
    Search { query: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let orchestrator = AnalysisOrchestrator::new();

    let json = match cli.command {
        Command::Analyze {
            symbol,
            days,
            horizon,
        } => {
            let analysis = orchestrator
                .get_analysis_with(&symbol, days, horizon)
                .await
                .with_context(|| format!("analysis failed for {symbol}"))?;
            to_json(&analysis, cli.pretty)?
        }
        Command::Search { query } => {
            let matches = orchestrator.universe().search(&query);
            to_json(&matches, cli.pretty)?
        }
    };

    println!("{json}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
