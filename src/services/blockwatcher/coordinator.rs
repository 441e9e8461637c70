//! Range coordinator.
//!
//! Polls the chain height on a fixed interval and turns the gap between its
//! cursor and the chain tip into bounded [`BlockRange`] tasks for the fetch
//! pool.

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
	models::{BlockRange, ChainType},
	services::blockchain::BlockChainClient,
	utils::metrics::{CHAIN_CURSOR, RANGES_DISPATCHED},
};

/// Outcome of a single coordinator tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
	/// A range was handed to the fetch pool and the cursor advanced past it
	Dispatched(BlockRange),
	/// The chain has no block at or beyond the cursor yet
	UpToDate,
	/// The height query failed; the next tick retries
	HeightUnavailable,
	/// The fetch pool is gone or the pipeline was cancelled mid-send
	Stopped,
}

/// Owns the cursor of one chain and schedules block ranges from it
///
/// The cursor only moves forward, and only after the range covering it was
/// accepted by the range queue.
pub struct RangeCoordinator {
	chain: ChainType,
	client: Arc<dyn BlockChainClient>,
	cursor: u64,
	batch_size: u64,
	poll_interval: Duration,
}

impl RangeCoordinator {
	/// Creates a coordinator starting at `start_from`
	///
	/// A `batch_size` of zero is treated as one.
	pub fn new(
		chain: ChainType,
		client: Arc<dyn BlockChainClient>,
		start_from: u64,
		batch_size: u64,
		poll_interval: Duration,
	) -> Self {
		Self {
			chain,
			client,
			cursor: start_from,
			batch_size: batch_size.max(1),
			poll_interval,
		}
	}

	/// Next block number that has not been scheduled yet
	pub fn cursor(&self) -> u64 {
		self.cursor
	}

	/// Computes the range to schedule for a reported chain height
	///
	/// Returns `None` when the chain has not reached the cursor.
	pub fn next_range(&self, latest: u64) -> Option<BlockRange> {
		if latest < self.cursor {
			return None;
		}
		let to = self
			.cursor
			.saturating_add(self.batch_size - 1)
			.min(latest);
		BlockRange::new(self.cursor, to)
	}

	/// Runs a single poll: query the height, emit at most one range
	pub async fn tick(
		&mut self,
		ranges: &mpsc::Sender<BlockRange>,
		shutdown: &CancellationToken,
	) -> TickOutcome {
		let latest = tokio::select! {
			_ = shutdown.cancelled() => return TickOutcome::Stopped,
			result = self.client.get_latest_block_number() => match result {
				Ok(latest) => latest,
				Err(e) => {
					warn!(chain = %self.chain, error = %e, "Failed to get latest block number");
					return TickOutcome::HeightUnavailable;
				}
			},
		};

		let Some(range) = self.next_range(latest) else {
			debug!(chain = %self.chain, cursor = self.cursor, latest, "No new blocks");
			return TickOutcome::UpToDate;
		};

		tokio::select! {
			_ = shutdown.cancelled() => TickOutcome::Stopped,
			sent = ranges.send(range) => match sent {
				Ok(()) => {
					self.cursor = range.to + 1;
					RANGES_DISPATCHED.with_label_values(&[self.chain.as_str()]).inc();
					CHAIN_CURSOR
						.with_label_values(&[self.chain.as_str()])
						.set(self.cursor as i64);
					debug!(
						chain = %self.chain,
						from = range.from,
						to = range.to,
						latest,
						"Dispatched block range"
					);
					TickOutcome::Dispatched(range)
				}
				Err(_) => TickOutcome::Stopped,
			},
		}
	}

	/// Polls until cancelled or until the fetch pool drops its receiver
	///
	/// The first poll happens immediately. Dropping `ranges` on return closes
	/// the range queue, which lets the fetch pool wind down.
	pub async fn run(mut self, ranges: mpsc::Sender<BlockRange>, shutdown: CancellationToken) {
		let mut interval = tokio::time::interval(self.poll_interval);
		interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

		info!(chain = %self.chain, cursor = self.cursor, "Range coordinator started");

		loop {
			tokio::select! {
				_ = shutdown.cancelled() => break,
				_ = interval.tick() => {}
			}

			if self.tick(&ranges, &shutdown).await == TickOutcome::Stopped {
				break;
			}
		}

		info!(chain = %self.chain, cursor = self.cursor, "Range coordinator stopped");
	}
}
