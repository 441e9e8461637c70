//! Network transport implementations for chain adapters.
//!
//! All supported chains speak JSON-RPC over HTTP, so a single rate limited,
//! retrying HTTP transport backs every client.

mod http;
mod rate_limiter;

pub use http::HttpTransportClient;
pub use rate_limiter::RpcRateLimiter;

use serde_json::{json, Value};

use crate::services::blockchain::FetchError;

/// Base trait for all blockchain transport clients
#[async_trait::async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the URL being used by the transport
	fn get_current_url(&self) -> &str;

	/// Send a raw request to the blockchain
	async fn send_raw_request<P>(&self, method: &str, params: Option<P>) -> Result<Value, FetchError>
	where
		P: Into<Value> + Send + Clone;

	/// Customizes the request for specific blockchain requirements
	fn customize_request<P>(&self, method: &str, params: Option<P>) -> Value
	where
		P: Into<Value> + Send + Clone,
	{
		// Default implementation for JSON-RPC
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.map(|p| p.into()).unwrap_or_else(|| json!([]))
		})
	}
}
