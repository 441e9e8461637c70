use std::path::Path;

use log::warn;

use crate::models::{ChainConfig, ConfigLoader};

use super::error::ConfigError;

const DEFAULT_CHAIN_CONFIG_DIR: &str = "config/chains";
const MIN_POLL_INTERVAL_MS: u64 = 100;

impl ConfigLoader for ChainConfig {
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let chain_dir = path.unwrap_or(Path::new(DEFAULT_CHAIN_CONFIG_DIR));
		let mut pairs = Vec::new();

		if !chain_dir.exists() {
			return Err(ConfigError::file_error(format!(
				"chains directory not found: {}",
				chain_dir.display()
			)));
		}

		let mut paths = std::fs::read_dir(chain_dir)?
			.map(|entry| entry.map(|e| e.path()))
			.collect::<Result<Vec<_>, _>>()?;
		paths.sort();

		for path in paths {
			if !Self::is_json_file(&path) {
				continue;
			}

			let name = path
				.file_stem()
				.and_then(|s| s.to_str())
				.unwrap_or("unknown")
				.to_string();

			match Self::load_from_path(&path) {
				Ok(config) => pairs.push((name, config)),
				Err(e) => warn!("Skipping chain config {}: {}", path.display(), e),
			}
		}

		Ok(T::from_iter(pairs))
	}

	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let config: ChainConfig = serde_json::from_reader(file)?;

		config.validate()?;

		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
			return Err(ConfigError::validation_error(
				"rpc_url must start with http:// or https://",
			));
		}

		if self.batch_size == 0 {
			return Err(ConfigError::validation_error(
				"batch_size must be greater than 0",
			));
		}

		if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
			return Err(ConfigError::validation_error(format!(
				"poll_interval_ms must be at least {}ms",
				MIN_POLL_INTERVAL_MS
			)));
		}

		if self.fetch_workers == 0 {
			return Err(ConfigError::validation_error(
				"fetch_workers must be greater than 0",
			));
		}

		if self.queue_capacity == 0 {
			return Err(ConfigError::validation_error(
				"queue_capacity must be greater than 0",
			));
		}

		Ok(())
	}
}
