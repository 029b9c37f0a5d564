use std::sync::Arc;
use std::time::Duration;

use arbscope::adapter::oracle::{LlmOracle, OpenRouter};
use arbscope::adapter::polymarket::PolymarketFeed;
use arbscope::adapter::sink::JsonFileSink;
use arbscope::app::App;
use arbscope::config::Config;
use arbscope::error::Result;
use arbscope::port::RelationOracle;
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "arbscope", about = "Prediction market arbitrage scanner")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch matching markets, price them, and save a snapshot.
    Fetch {
        /// Tags a market must carry to be included.
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Fetch, price, and scan markets for arbitrage opportunities.
    Analyze {
        /// Tags a market must carry to be included.
        #[arg(required = true)]
        tags: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("arbscope starting");

    tokio::select! {
        result = run(config, cli.command) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("arbscope stopped");
}

async fn run(config: Config, command: Command) -> Result<()> {
    let feed = Arc::new(PolymarketFeed::new(
        &config.feed.api_url,
        Duration::from_secs(config.feed.request_timeout_secs),
    )?);
    let sink = Arc::new(JsonFileSink::new(
        &config.output.markets_dir,
        &config.output.analysis_dir,
        &config.output.snapshot_prefix,
    ));

    let oracle: Option<Arc<dyn RelationOracle>> = if config.oracle.enabled {
        match OpenRouter::from_config(&config.oracle) {
            Ok(client) => Some(Arc::new(LlmOracle::new(Arc::new(client)))),
            Err(e) => {
                warn!(error = %e, "oracle unavailable, continuing without it");
                None
            }
        }
    } else {
        None
    };

    let app = App::new(
        feed,
        sink,
        oracle,
        config.detector.clone(),
        config.feed.max_concurrent_books,
    );

    match command {
        Command::Fetch { tags } => {
            let snapshot = app.fetch(&tags).await?;
            info!(markets = snapshot.market_count, "fetch complete");
        }
        Command::Analyze { tags } => {
            let report = app.analyze(&tags).await?;
            info!(
                markets = report.total_markets,
                opportunities = report.opportunities.len(),
                oracle_relationships = report.oracle_relationships,
                "analysis complete"
            );
        }
    }

    Ok(())
}
