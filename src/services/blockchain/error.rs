//! Chain adapter error types and handling.
//!
//! Covers network connectivity, malformed responses and missing chain data.
//! Every failure an adapter reports to the pipeline is a [`FetchError`].

use log::error;

/// Represents possible errors that can occur while fetching chain data
#[derive(Debug)]
pub enum FetchError {
	/// Errors related to network connectivity issues
	ConnectionError(String),

	/// Errors related to malformed requests, RPC errors or invalid responses
	RequestError(String),

	/// When a requested block cannot be found on the blockchain
	///
	/// Contains the block number that was not found
	BlockNotFound(u64),

	/// When a requested transaction cannot be found on the blockchain
	///
	/// Contains the transaction id that was not found
	TransactionNotFound(String),

	/// Internal errors within the chain adapter
	InternalError(String),
}

impl FetchError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::ConnectionError(msg) => format!("Connection error: {}", msg),
			Self::RequestError(msg) => format!("Request error: {}", msg),
			Self::BlockNotFound(number) => format!("Block not found: {}", number),
			Self::TransactionNotFound(id) => format!("Transaction not found: {}", id),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new block not found error with logging
	pub fn block_not_found(number: u64) -> Self {
		let error = Self::BlockNotFound(number);
		error!("{}", error.format_message());
		error
	}

	/// Creates a new transaction not found error with logging
	pub fn transaction_not_found(id: impl Into<String>) -> Self {
		let error = Self::TransactionNotFound(id.into());
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

impl std::fmt::Display for FetchError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl std::error::Error for FetchError {}

impl From<reqwest_middleware::Error> for FetchError {
	fn from(err: reqwest_middleware::Error) -> Self {
		Self::connection_error(err.to_string())
	}
}

impl From<serde_json::Error> for FetchError {
	fn from(err: serde_json::Error) -> Self {
		Self::request_error(format!("Failed to decode response: {}", err))
	}
}
