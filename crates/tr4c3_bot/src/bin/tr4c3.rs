//! TR4C3 - scheduled persona posts and mention replies.
//!
//! Secrets come from the environment (a `.env` file is loaded when present);
//! tunables come from an optional TOML file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tr4c3_bot::{
    ApiEndpoints, ApiState, BotConfig, BotMetrics, BotRunner, Credentials, ObservabilityConfig,
    Orchestrator, init_observability, serve,
};
use tracing::{debug, info, warn};

/// Command-line arguments for the bot.
#[derive(Parser, Debug)]
#[command(name = "tr4c3")]
#[command(about = "TR4C3 - cryptic persona bot for Twitter")]
#[command(version)]
struct Args {
    /// Path to bot configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Only answer mentions newer than this id
    #[arg(long, global = true, env = "TR4C3_SINCE_ID")]
    since_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run cycles on the configured schedule until Ctrl-C
    Run {
        /// Also expose the trigger API on this address
        #[arg(long = "serve", value_name = "ADDR")]
        serve_addr: Option<String>,
    },
    /// Run a single cycle and print its report
    Once,
    /// Expose the trigger API only
    Serve {
        /// Listen address (defaults to server.bind_addr)
        #[arg(long, value_name = "ADDR")]
        addr: Option<String>,
    },
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    init_observability(&ObservabilityConfig::from_flags(args.verbose, args.json_logs))?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!(error = %e, "Failed to load .env file"),
    }

    let mut config = match &args.config {
        Some(path) => {
            info!(config_file = ?path, "Loading configuration");
            BotConfig::from_file(path)?
        }
        None => BotConfig::default(),
    };
    if args.since_id.is_some() {
        config.since_id = args.since_id.clone();
    }

    let credentials = Credentials::from_env()?;
    let endpoints = ApiEndpoints::from_env();
    info!(
        openai = %endpoints.openai_base_url,
        twitter = %endpoints.twitter_base_url,
        schedule = ?config.schedule,
        "Configuration loaded"
    );

    let orchestrator = Arc::new(Orchestrator::connect(
        &credentials,
        &endpoints,
        config.generation.clone(),
        config.replies.clone(),
        BotMetrics::new(),
    ));

    match args.command {
        Command::Once => {
            let report = orchestrator.run_cycle(config.since_id.clone()).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Serve { addr } => {
            let addr = addr.unwrap_or(config.server.bind_addr);
            serve(&addr, ApiState::new(orchestrator), shutdown_signal()).await?;
        }
        Command::Run { serve_addr } => {
            let server = serve_addr.map(|addr| {
                let state = ApiState::new(Arc::clone(&orchestrator));
                tokio::spawn(async move { serve(&addr, state, shutdown_signal()).await })
            });

            let (runner, handle) = BotRunner::new(
                Arc::clone(&orchestrator),
                config.schedule.clone(),
                config.run_on_start,
                config.since_id.clone(),
            );
            let runner_task = tokio::spawn(runner.run());

            shutdown_signal().await;
            info!("Shutdown requested");
            handle.shutdown().await;

            let cursor = runner_task.await?;
            if let Some(server) = server {
                server.await??;
            }
            info!(cursor = ?cursor, "TR4C3 stopped");
        }
    }

    Ok(())
}
