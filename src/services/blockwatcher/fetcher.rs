//! Fetch pool.
//!
//! A fixed number of workers share the range queue. Each worker expands a
//! range into one block fetch per height and forwards non-empty blocks to the
//! filter stage. Blocks may therefore arrive out of numeric order.

use std::sync::Arc;

use tokio::{
	sync::{mpsc, Mutex},
	task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
	models::{BlockRange, ChainType, TransactionBatch},
	services::blockchain::BlockChainClient,
	utils::metrics::{BLOCKS_FETCHED, BLOCKS_SKIPPED},
};

/// Spawns and owns the fetch workers of one chain
pub struct FetchPool {
	chain: ChainType,
	client: Arc<dyn BlockChainClient>,
	workers: usize,
}

impl FetchPool {
	/// Creates a pool of `workers` workers; zero is treated as one
	pub fn new(chain: ChainType, client: Arc<dyn BlockChainClient>, workers: usize) -> Self {
		Self {
			chain,
			client,
			workers: workers.max(1),
		}
	}

	/// Spawns the workers
	///
	/// Workers exit once the range queue is closed and drained, once the batch
	/// queue is closed, or on cancellation. The batch queue closes when the
	/// last worker returns.
	pub fn spawn(
		self,
		ranges: mpsc::Receiver<BlockRange>,
		batches: mpsc::Sender<TransactionBatch>,
		shutdown: CancellationToken,
	) -> Vec<JoinHandle<()>> {
		let ranges = Arc::new(Mutex::new(ranges));

		(0..self.workers)
			.map(|worker| {
				let worker = FetchWorker {
					id: worker,
					chain: self.chain,
					client: self.client.clone(),
				};
				tokio::spawn(worker.run(ranges.clone(), batches.clone(), shutdown.clone()))
			})
			.collect()
	}
}

struct FetchWorker {
	id: usize,
	chain: ChainType,
	client: Arc<dyn BlockChainClient>,
}

impl FetchWorker {
	async fn run(
		self,
		ranges: Arc<Mutex<mpsc::Receiver<BlockRange>>>,
		batches: mpsc::Sender<TransactionBatch>,
		shutdown: CancellationToken,
	) {
		debug!(chain = %self.chain, worker = self.id, "Fetch worker started");

		loop {
			// The lock is only held while waiting for the next range
			let range = tokio::select! {
				_ = shutdown.cancelled() => break,
				range = async { ranges.lock().await.recv().await } => match range {
					Some(range) => range,
					None => break,
				},
			};

			if !self.process_range(range, &batches, &shutdown).await {
				break;
			}
		}

		debug!(chain = %self.chain, worker = self.id, "Fetch worker stopped");
	}

	/// Fetches every block of `range`
	///
	/// Returns `false` when the worker should stop.
	async fn process_range(
		&self,
		range: BlockRange,
		batches: &mpsc::Sender<TransactionBatch>,
		shutdown: &CancellationToken,
	) -> bool {
		for block_number in range.blocks() {
			if shutdown.is_cancelled() {
				return false;
			}

			let fetched = tokio::select! {
				_ = shutdown.cancelled() => return false,
				fetched = self.client.get_block_transactions(block_number) => fetched,
			};

			let transactions = match fetched {
				Ok(transactions) => transactions,
				Err(e) => {
					// Retries are the adapter's job; the block is dropped
					BLOCKS_SKIPPED.with_label_values(&[self.chain.as_str()]).inc();
					warn!(
						chain = %self.chain,
						worker = self.id,
						block = block_number,
						error = %e,
						"Skipping block after failed fetch"
					);
					continue;
				}
			};

			BLOCKS_FETCHED.with_label_values(&[self.chain.as_str()]).inc();

			if transactions.is_empty() {
				continue;
			}

			let batch = TransactionBatch {
				block_number,
				transactions,
			};

			tokio::select! {
				_ = shutdown.cancelled() => return false,
				sent = batches.send(batch) => {
					if sent.is_err() {
						info!(chain = %self.chain, worker = self.id, "Batch queue closed");
						return false;
					}
				}
			}
		}

		true
	}
}
