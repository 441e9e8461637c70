use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
	models::{ChainType, FilteredEvent},
	services::sink::EventSink,
	utils::metrics::SINK_FAILURES,
};

/// Time the forwarder keeps delivering queued events after cancellation
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Hands every event of one chain to the sink
///
/// Runs until the filter stage drops its sender and the queue is drained, so
/// events already filtered before cancellation are still delivered. Once
/// `shutdown` fires, draining is bounded by `grace`: a publish still in flight
/// when it elapses is abandoned and the remaining events are dropped. Delivery
/// failures are logged per event and never stop the loop.
pub async fn run_sink_forwarder(
	chain: ChainType,
	sink: Arc<dyn EventSink>,
	mut events: mpsc::Receiver<FilteredEvent>,
	shutdown: CancellationToken,
	grace: Duration,
) {
	let deadline = async {
		shutdown.cancelled().await;
		tokio::time::sleep(grace).await;
	};
	tokio::pin!(deadline);

	loop {
		let event = tokio::select! {
			_ = &mut deadline => {
				warn!(chain = %chain, "Shutdown grace period elapsed, dropping queued events");
				break;
			}
			event = events.recv() => match event {
				Some(event) => event,
				None => break,
			},
		};

		tokio::select! {
			_ = &mut deadline => {
				warn!(
					chain = %chain,
					tx_id = %event.tx_id,
					"Shutdown grace period elapsed during publish, dropping queued events"
				);
				break;
			}
			result = sink.publish(&event) => {
				if let Err(e) = result {
					SINK_FAILURES.with_label_values(&[chain.as_str()]).inc();
					warn!(chain = %chain, tx_id = %event.tx_id, error = %e, "Failed to publish event");
				}
			}
		}
	}

	debug!(chain = %chain, "Sink forwarder stopped");
}
