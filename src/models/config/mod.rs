//! Configuration loading and validation.
//!
//! Chain definitions live one-per-file in a directory of JSON files; the
//! watch-list is a single JSON object of `address -> owner id`.

use std::path::Path;

mod chain_config;
mod error;
mod watch_list_config;

pub use error::ConfigError;

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized {
	/// Loads every valid configuration file from `path`, keyed by file stem
	///
	/// Files that fail to parse or validate are logged and skipped.
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>;

	fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	fn validate(&self) -> Result<(), ConfigError>;

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
