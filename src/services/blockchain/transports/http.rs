//! HTTP transport implementation for blockchain interactions.
//!
//! This module provides a generic HTTP client for talking to blockchain nodes
//! via JSON-RPC, supporting:
//! - Configurable retry policies for transient failures
//! - Authentication via an API key header
//! - Outbound rate limiting shared by every caller of the transport
//! - Per-request timeouts

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, Jitter, RetryTransientMiddleware};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use url::Url;

use crate::{
	models::ChainConfig,
	services::blockchain::{
		transports::{BlockchainTransport, RpcRateLimiter},
		FetchError,
	},
};

const API_KEY_HEADER: &str = "X-API-Key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Basic HTTP transport client for blockchain interactions
///
/// The client is cheap to clone and every clone shares the same rate limiter,
/// so it can be handed to any number of concurrent fetch workers.
#[derive(Clone)]
pub struct HttpTransportClient {
	/// HTTP client wrapped with the retry middleware
	client: ClientWithMiddleware,
	/// JSON-RPC endpoint
	url: String,
	/// Optional credential sent with every request
	api_key: Option<String>,
	rate_limiter: Arc<RpcRateLimiter>,
}

impl HttpTransportClient {
	/// Creates a new HTTP transport client for a chain
	///
	/// No request is made at construction time; an unreachable node surfaces as
	/// a [`FetchError`] on the first call instead.
	///
	/// # Arguments
	/// * `config` - Chain configuration containing the RPC URL, credential, request ceiling
	///   and retry budget
	///
	/// # Returns
	/// * `Result<Self, anyhow::Error>` - New client instance or configuration error
	pub fn new(config: &ChainConfig) -> Result<Self, anyhow::Error> {
		let url = Url::parse(&config.rpc_url)
			.with_context(|| format!("Invalid RPC URL: {}", config.rpc_url))?;

		let retry_policy = ExponentialBackoff::builder()
			.base(2)
			.retry_bounds(Duration::from_secs(2), Duration::from_secs(10))
			.jitter(Jitter::Bounded)
			.build_with_max_retries(config.max_retries);

		let http_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.timeout(REQUEST_TIMEOUT)
			.connect_timeout(CONNECT_TIMEOUT)
			.build()
			.context("Failed to create HTTP client")?;

		let client = ClientBuilder::new(http_client)
			.with(RetryTransientMiddleware::new_with_policy(retry_policy))
			.build();

		Ok(Self {
			client,
			url: url.to_string(),
			api_key: config.api_key.clone().filter(|key| !key.is_empty()),
			rate_limiter: Arc::new(RpcRateLimiter::new(config.requests_per_second)),
		})
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	fn get_current_url(&self) -> &str {
		&self.url
	}

	/// Sends a JSON-RPC request to the blockchain node
	///
	/// Waits for the rate limiter first, then posts the JSON-RPC envelope.
	/// Non-2xx statuses, undecodable bodies and JSON-RPC `error` members are all
	/// reported as [`FetchError::RequestError`].
	async fn send_raw_request<P>(&self, method: &str, params: Option<P>) -> Result<Value, FetchError>
	where
		P: Into<Value> + Send + Clone,
	{
		self.rate_limiter.acquire().await;

		let request_body = self.customize_request(method, params);

		let mut request = self
			.client
			.post(self.url.as_str())
			.header(CONTENT_TYPE, "application/json")
			.json(&request_body);

		if let Some(api_key) = &self.api_key {
			request = request.header(API_KEY_HEADER, api_key.as_str());
		}

		let response = request.send().await.map_err(|e| {
			FetchError::connection_error(format!("Failed to send {} request: {}", method, e))
		})?;

		let status = response.status();
		if !status.is_success() {
			let error_body = response.text().await.unwrap_or_default();
			return Err(FetchError::request_error(format!(
				"{} failed with status {}: {}",
				method, status, error_body
			)));
		}

		let body: Value = response.json().await.map_err(|e| {
			FetchError::request_error(format!("Failed to parse {} response: {}", method, e))
		})?;

		if let Some(rpc_error) = body.get("error").filter(|e| !e.is_null()) {
			return Err(FetchError::request_error(format!(
				"{} returned RPC error: {}",
				method, rpc_error
			)));
		}

		Ok(body)
	}
}
