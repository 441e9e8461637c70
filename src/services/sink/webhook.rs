//! Webhook event sink.
//!
//! Posts every event as a JSON document to a fixed URL.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, Jitter, RetryTransientMiddleware};
use std::time::Duration;
use url::Url;

use crate::{
	models::FilteredEvent,
	services::sink::{EventSink, SinkError},
};

/// Publishes events to an HTTP endpoint
pub struct WebhookSink {
	client: ClientWithMiddleware,
	url: Url,
}

impl WebhookSink {
	/// Creates a new webhook sink
	///
	/// # Arguments
	/// * `url` - Endpoint receiving one POST per event
	/// * `max_retries` - Retries for transient failures (connection errors, 5xx, 429)
	///
	/// # Returns
	/// * `Result<Self, SinkError>` - Sink instance or a configuration error
	pub fn new(url: &str, max_retries: u32) -> Result<Self, SinkError> {
		let url = Url::parse(url)
			.map_err(|e| SinkError::config_error(format!("Invalid webhook URL {}: {}", url, e)))?;

		let retry_policy = ExponentialBackoff::builder()
			.base(2)
			.retry_bounds(Duration::from_millis(250), Duration::from_secs(10))
			.jitter(Jitter::Full)
			.build_with_max_retries(max_retries);

		let http_client = reqwest::ClientBuilder::new()
			.timeout(Duration::from_secs(30))
			.build()
			.map_err(|e| SinkError::internal_error(format!("Failed to create HTTP client: {}", e)))?;

		let client = ClientBuilder::new(http_client)
			.with(RetryTransientMiddleware::new_with_policy(retry_policy))
			.build();

		Ok(Self { client, url })
	}
}

#[async_trait]
impl EventSink for WebhookSink {
	async fn publish(&self, event: &FilteredEvent) -> Result<(), SinkError> {
		let response = self
			.client
			.post(self.url.clone())
			.json(event)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(SinkError::network_error(format!(
				"Webhook returned error status {} for transaction {}",
				status, event.tx_id
			)));
		}

		Ok(())
	}
}
