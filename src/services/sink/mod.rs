//! Event sink.
//!
//! The sink is the publish-only destination of filtered events. Delivery is
//! at-most-once: a failed publish is logged and the event is dropped.

mod error;
mod forwarder;
mod log_sink;
mod webhook;

use async_trait::async_trait;

use crate::models::FilteredEvent;

pub use error::SinkError;
pub use forwarder::{run_sink_forwarder, SHUTDOWN_GRACE_PERIOD};
pub use log_sink::LogSink;
pub use webhook::WebhookSink;

/// Destination of filtered events
#[async_trait]
pub trait EventSink: Send + Sync {
	/// Publishes a single event
	async fn publish(&self, event: &FilteredEvent) -> Result<(), SinkError>;
}
