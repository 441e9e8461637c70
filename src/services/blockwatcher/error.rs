//! Pipeline error types.

use log::error;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum BlockWatcherError {
	/// A chain could not be wired into a pipeline
	ConfigError(String),
	/// A pipeline stage terminated abnormally
	ProcessingError(String),
}

impl BlockWatcherError {
	fn format_message(&self) -> String {
		match self {
			Self::ConfigError(msg) => format!("Config error: {}", msg),
			Self::ProcessingError(msg) => format!("Processing error: {}", msg),
		}
	}

	pub fn config_error(msg: impl Into<String>) -> Self {
		let error = Self::ConfigError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn processing_error(msg: impl Into<String>) -> Self {
		let error = Self::ProcessingError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for BlockWatcherError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for BlockWatcherError {}
