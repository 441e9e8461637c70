//! Watched-address monitoring service entry point.
//!
//! This binary loads the chain configurations and the watch-list, starts one
//! ingestion pipeline per chain and handles graceful shutdown on interrupt
//! signals.
//!
//! # Flow
//! 1. Loads `.env`, parses the command line and sets up logging
//! 2. Loads the watch-list and every chain configuration
//! 3. Creates a chain adapter per chain, dropping chains that cannot be served
//! 4. Starts the pipelines and, optionally, the metrics server
//! 5. On Ctrl+C cancels every pipeline and waits for them to drain

use address_watch::{
	bootstrap::{
		create_event_sink, create_pipeline_configs, load_chain_configs, load_watch_list, Result,
	},
	models::DEFAULT_MAX_RETRIES,
	services::blockwatcher::BlockWatcherService,
	utils::{logging::setup_logging, metrics::server::create_metrics_server},
};

use clap::{Arg, ArgMatches, Command};
use dotenvy::dotenv;
use std::{env::var, path::PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:8081";

fn cli() -> Command {
	Command::new("address-watch")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Monitors several blockchains for transactions paying watched addresses and \
			 publishes an event, with an estimated fee, for every match.",
		)
		.arg(
			Arg::new("config-dir")
				.long("config-dir")
				.help("Directory holding one JSON file per chain (default: config/chains)")
				.value_name("DIR"),
		)
		.arg(
			Arg::new("watchlist")
				.long("watchlist")
				.help("Watch-list JSON file (default: config/watchlist.json)")
				.value_name("PATH"),
		)
		.arg(
			Arg::new("webhook-url")
				.long("webhook-url")
				.help("Publish events to this URL instead of logging them (env: WEBHOOK_URL)")
				.value_name("URL"),
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error) (env: LOG_LEVEL)")
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("metrics")
				.long("metrics")
				.help("Enable metrics server (env: METRICS_ENABLED)")
				.action(clap::ArgAction::SetTrue),
		)
		.arg(
			Arg::new("metrics-address")
				.long("metrics-address")
				.help("Address to start the metrics server on (default: 127.0.0.1:8081)")
				.value_name("HOST:PORT"),
		)
}

/// Returns the flag value, falling back to the environment variable
fn arg_or_env(matches: &ArgMatches, arg: &str, env: &str) -> Option<String> {
	matches
		.get_one::<String>(arg)
		.cloned()
		.or_else(|| var(env).ok())
		.filter(|value| !value.trim().is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
	let matches = cli().get_matches();

	dotenv().ok();

	let log_level = arg_or_env(&matches, "log-level", "LOG_LEVEL");
	setup_logging(log_level.as_deref()).unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let config_dir = matches.get_one::<String>("config-dir").map(PathBuf::from);
	let watchlist_path = matches.get_one::<String>("watchlist").map(PathBuf::from);
	let webhook_url = arg_or_env(&matches, "webhook-url", "WEBHOOK_URL");

	let watch_list = load_watch_list(watchlist_path.as_deref())
		.map_err(|e| anyhow::anyhow!("Failed to load watch-list: {}", e))?;
	let chain_configs = load_chain_configs(config_dir.as_deref())
		.map_err(|e| anyhow::anyhow!("Failed to load chain configurations: {}", e))?;

	let pipeline_configs = create_pipeline_configs(&chain_configs);
	if pipeline_configs.is_empty() {
		info!("No usable chain configurations found. Exiting...");
		return Ok(());
	}

	let sink = create_event_sink(webhook_url.as_deref(), DEFAULT_MAX_RETRIES)?;

	let metrics_enabled = matches.get_flag("metrics")
		|| var("METRICS_ENABLED").map(|v| v == "true").unwrap_or(false);
	let metrics_server = if metrics_enabled {
		let address = matches
			.get_one::<String>("metrics-address")
			.cloned()
			.unwrap_or_else(|| DEFAULT_METRICS_ADDRESS.to_string());
		Some(create_metrics_server(address)?)
	} else {
		None
	};

	let shutdown = CancellationToken::new();
	let mut block_watcher = BlockWatcherService::new(watch_list, sink, shutdown.clone());
	block_watcher.start(pipeline_configs);

	info!("Service started. Press Ctrl+C to shutdown");

	let ctrl_c = tokio::signal::ctrl_c();

	if let Some(metrics_server) = metrics_server {
		let metrics_handle = metrics_server.handle();
		tokio::select! {
			result = ctrl_c => {
				if let Err(e) = result {
					error!("Error waiting for Ctrl+C: {}", e);
				}
				info!("Shutdown signal received, stopping services...");
			}
			result = metrics_server => {
				if let Err(e) = result {
					error!("Metrics server error: {}", e);
				}
				info!("Metrics server stopped, shutting down services...");
			}
		}
		metrics_handle.stop(true).await;
	} else {
		if let Err(e) = ctrl_c.await {
			error!("Error waiting for Ctrl+C: {}", e);
		}
		info!("Shutdown signal received, stopping services...");
	}

	if let Err(e) = block_watcher.stop().await {
		error!("Error during shutdown: {}", e);
	}

	info!("Shutdown complete");
	Ok(())
}
