//! Event sink error types and handling.

use log::error;
use std::{error::Error, fmt};

/// Represents possible errors while publishing events
#[derive(Debug)]
pub enum SinkError {
	/// Delivery failures (unreachable endpoint, non-2xx response)
	NetworkError(String),
	/// Sink misconfiguration (e.g. an invalid webhook URL)
	ConfigError(String),
	/// Internal errors (e.g. failed to encode an event)
	InternalError(String),
}

impl SinkError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::NetworkError(msg) => format!("Network error: {}", msg),
			Self::ConfigError(msg) => format!("Config error: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Creates a new network error with logging
	pub fn network_error(msg: impl Into<String>) -> Self {
		let error = Self::NetworkError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new configuration error with logging
	pub fn config_error(msg: impl Into<String>) -> Self {
		let error = Self::ConfigError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl From<reqwest_middleware::Error> for SinkError {
	fn from(error: reqwest_middleware::Error) -> Self {
		Self::network_error(error.to_string())
	}
}

impl fmt::Display for SinkError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for SinkError {}
