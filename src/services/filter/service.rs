//! Filter stage.
//!
//! Matches transaction outputs against the watch-list and turns every hit into
//! a [`FilteredEvent`]. A single filter runs per chain.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
	models::{ChainType, FilteredEvent, RawTransaction, TransactionBatch, WatchList},
	services::{blockchain::BlockChainClient, filter::calculate_fee},
	utils::metrics::{EVENTS_EMITTED, FEE_RESOLUTION_FAILURES},
};

/// Matches transactions of one chain against the shared watch-list
pub struct FilterService {
	chain: ChainType,
	client: Arc<dyn BlockChainClient>,
	watch_list: Arc<WatchList>,
}

impl FilterService {
	pub fn new(
		chain: ChainType,
		client: Arc<dyn BlockChainClient>,
		watch_list: Arc<WatchList>,
	) -> Self {
		Self {
			chain,
			client,
			watch_list,
		}
	}

	/// Produces one event per output paying a watched address
	///
	/// The fee is resolved at most once per transaction and shared by all of its
	/// events. A failed resolution degrades the fee to zero; the events are
	/// still produced.
	pub async fn filter_transaction(&self, transaction: &RawTransaction) -> Vec<FilteredEvent> {
		let matches: Vec<_> = transaction
			.outputs
			.iter()
			.filter_map(|output| {
				self.watch_list
					.owner_of(&output.address)
					.map(|owner| (output, owner))
			})
			.collect();

		if matches.is_empty() {
			return Vec::new();
		}

		let fee = match calculate_fee(self.client.as_ref(), transaction).await {
			Ok(fee) => fee,
			Err(e) => {
				FEE_RESOLUTION_FAILURES
					.with_label_values(&[self.chain.as_str()])
					.inc();
				warn!(
					chain = %self.chain,
					tx_id = %transaction.id,
					error = %e,
					"Fee resolution failed, using zero fee"
				);
				0.0
			}
		};

		let from_address = from_address(transaction);

		matches
			.into_iter()
			.map(|(output, owner)| FilteredEvent {
				chain: self.chain,
				tx_id: transaction.id.clone(),
				from_address: from_address.clone(),
				to_address: output.address.clone(),
				amount: output.value,
				fee,
				owner_id: owner.to_string(),
			})
			.collect()
	}

	/// Filters every transaction of a batch, in order
	pub async fn filter_batch(&self, batch: &TransactionBatch) -> Vec<FilteredEvent> {
		let mut events = Vec::new();
		for transaction in &batch.transactions {
			events.extend(self.filter_transaction(transaction).await);
		}
		events
	}

	/// Consumes batches until the batch queue closes or the pipeline is cancelled
	///
	/// Dropping `events` on return lets the sink forwarder drain and exit.
	pub async fn run(
		self,
		mut batches: mpsc::Receiver<TransactionBatch>,
		events: mpsc::Sender<FilteredEvent>,
		shutdown: CancellationToken,
	) {
		info!(chain = %self.chain, watched = self.watch_list.len(), "Filter stage started");

		'batches: loop {
			let batch = tokio::select! {
				_ = shutdown.cancelled() => break,
				batch = batches.recv() => match batch {
					Some(batch) => batch,
					None => break,
				},
			};

			debug!(
				chain = %self.chain,
				block = batch.block_number,
				transactions = batch.transactions.len(),
				"Filtering block"
			);

			for transaction in &batch.transactions {
				let matched = tokio::select! {
					_ = shutdown.cancelled() => break 'batches,
					matched = self.filter_transaction(transaction) => matched,
				};

				for event in matched {
					tokio::select! {
						_ = shutdown.cancelled() => break 'batches,
						sent = events.send(event) => {
							if sent.is_err() {
								info!(chain = %self.chain, "Event queue closed");
								break 'batches;
							}
							EVENTS_EMITTED.with_label_values(&[self.chain.as_str()]).inc();
						}
					}
				}
			}
		}

		info!(chain = %self.chain, "Filter stage stopped");
	}
}

/// Provenance pointer of a transaction
///
/// The first input's referenced transaction id; on account-model chains, where
/// inputs reference nothing, the first input's address.
fn from_address(transaction: &RawTransaction) -> String {
	match transaction.inputs.first() {
		Some(input) if !input.referenced_tx_id.is_empty() => input.referenced_tx_id.clone(),
		Some(input) => input.address.clone().unwrap_or_default(),
		None => String::new(),
	}
}
