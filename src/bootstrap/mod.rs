//! Bootstrap module for turning configuration into running pipelines.
//!
//! This module provides the functions the binary uses at startup:
//! - `load_chain_configs` / `load_watch_list`: read configuration from disk
//! - `create_pipeline_configs`: builds a chain adapter for every chain, dropping
//!   chains whose adapter cannot be created
//! - `create_event_sink`: selects the webhook sink or the logging sink

use std::{collections::HashSet, error::Error, path::Path, sync::Arc};

use tracing::{error, info, warn};

use crate::{
	models::{ChainConfig, ConfigError, ConfigLoader, WatchList},
	services::{
		blockchain::{create_blockchain_client, BlockChainClient},
		blockwatcher::ChainPipelineConfig,
		sink::{EventSink, LogSink, SinkError, WebhookSink},
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Loads every valid chain configuration, ordered by file name
///
/// # Errors
/// Returns an error when the directory cannot be read. Individual invalid files
/// are skipped.
pub fn load_chain_configs(
	dir: Option<&Path>,
) -> std::result::Result<Vec<ChainConfig>, ConfigError> {
	let configs: Vec<(String, ChainConfig)> = ChainConfig::load_all(dir)?;
	Ok(configs.into_iter().map(|(_, config)| config).collect())
}

/// Loads and validates the watch-list
pub fn load_watch_list(path: Option<&Path>) -> std::result::Result<Arc<WatchList>, ConfigError> {
	let watch_list = WatchList::load_from_path(path)?;
	info!("Loaded watch-list with {} addresses", watch_list.len());
	Ok(Arc::new(watch_list))
}

/// Creates the pipeline configuration of every chain that has a working adapter
pub fn create_pipeline_configs(configs: &[ChainConfig]) -> Vec<ChainPipelineConfig> {
	create_pipeline_configs_with(configs, create_blockchain_client)
}

/// Same as [`create_pipeline_configs`] with a custom adapter factory
///
/// A chain is dropped, and the remaining chains kept, when:
/// - the factory rejects its configuration
/// - an earlier entry already configured the same chain
pub fn create_pipeline_configs_with<F>(
	configs: &[ChainConfig],
	factory: F,
) -> Vec<ChainPipelineConfig>
where
	F: Fn(&ChainConfig) -> std::result::Result<Arc<dyn BlockChainClient>, ConfigError>,
{
	let mut seen = HashSet::new();

	configs
		.iter()
		.filter(|config| {
			let first = seen.insert(config.chain);
			if !first {
				warn!(chain = %config.chain, "Duplicate chain configuration ignored");
			}
			first
		})
		.filter_map(|config| match factory(config) {
			Ok(client) => Some(ChainPipelineConfig::from_chain_config(config, client)),
			Err(e) => {
				error!(chain = %config.chain, error = %e, "Chain pipeline will not be created");
				None
			}
		})
		.collect()
}

/// Creates the event sink: a webhook when a URL is given, logging otherwise
pub fn create_event_sink(
	webhook_url: Option<&str>,
	max_retries: u32,
) -> std::result::Result<Arc<dyn EventSink>, SinkError> {
	match webhook_url.filter(|url| !url.trim().is_empty()) {
		Some(url) => {
			info!("Publishing events to webhook {}", url);
			Ok(Arc::new(WebhookSink::new(url, max_retries)?))
		}
		None => {
			info!("No webhook configured, events will be logged");
			Ok(Arc::new(LogSink::new()))
		}
	}
}
