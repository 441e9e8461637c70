use std::path::Path;

use crate::models::WatchList;

use super::error::ConfigError;

const DEFAULT_WATCH_LIST_PATH: &str = "config/watchlist.json";

impl WatchList {
	/// Loads the watch-list from a JSON object of `address -> owner id`
	pub fn load_from_path(path: Option<&Path>) -> Result<Self, ConfigError> {
		let path = path.unwrap_or(Path::new(DEFAULT_WATCH_LIST_PATH));
		let file = std::fs::File::open(path)?;
		let watch_list: WatchList = serde_json::from_reader(file)?;

		watch_list.validate()?;

		Ok(watch_list)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if let Some((address, _)) = self
			.iter()
			.find(|(address, owner)| address.trim().is_empty() || owner.trim().is_empty())
		{
			return Err(ConfigError::validation_error(format!(
				"watch-list entries need a non-empty address and owner (address: {:?})",
				address
			)));
		}

		Ok(())
	}
}
