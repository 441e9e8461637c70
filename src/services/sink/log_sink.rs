use async_trait::async_trait;
use tracing::info;

use crate::{
	models::FilteredEvent,
	services::sink::{EventSink, SinkError},
};

/// Writes every event as a structured log line
///
/// Default sink when no webhook is configured.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

impl LogSink {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl EventSink for LogSink {
	async fn publish(&self, event: &FilteredEvent) -> Result<(), SinkError> {
		info!(
			chain = %event.chain,
			tx_id = %event.tx_id,
			from = %event.from_address,
			to = %event.to_address,
			amount = event.amount,
			fee = event.fee,
			owner = %event.owner_id,
			"Watched address received funds"
		);
		Ok(())
	}
}
