//! Per-chain pipeline assembly.
//!
//! Each configured chain gets its own coordinator, fetch pool, filter stage and
//! sink forwarder, connected by bounded queues. Pipelines share the watch-list,
//! the sink and the cancellation token, and nothing else.

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{coordinator::RangeCoordinator, error::BlockWatcherError, fetcher::FetchPool};

use crate::{
	models::{ChainConfig, ChainType, WatchList},
	services::{
		blockchain::BlockChainClient,
		filter::FilterService,
		sink::{run_sink_forwarder, EventSink, SHUTDOWN_GRACE_PERIOD},
	},
	utils::metrics::CHAINS_MONITORED,
};

/// Everything needed to run the pipeline of one chain
#[derive(Clone)]
pub struct ChainPipelineConfig {
	pub chain: ChainType,
	pub client: Arc<dyn BlockChainClient>,
	pub start_from: u64,
	pub batch_size: u64,
	pub poll_interval: Duration,
	pub fetch_workers: usize,
	pub queue_capacity: usize,
}

impl ChainPipelineConfig {
	pub fn from_chain_config(config: &ChainConfig, client: Arc<dyn BlockChainClient>) -> Self {
		Self {
			chain: config.chain,
			client,
			start_from: config.start_from,
			batch_size: config.batch_size,
			poll_interval: Duration::from_millis(config.poll_interval_ms),
			fetch_workers: config.fetch_workers,
			queue_capacity: config.queue_capacity,
		}
	}
}

/// A pipeline ready to be spawned
pub struct ChainPipeline {
	config: ChainPipelineConfig,
	watch_list: Arc<WatchList>,
	sink: Arc<dyn EventSink>,
}

impl ChainPipeline {
	pub fn new(
		config: ChainPipelineConfig,
		watch_list: Arc<WatchList>,
		sink: Arc<dyn EventSink>,
	) -> Self {
		Self {
			config,
			watch_list,
			sink,
		}
	}

	/// Wires the stages together and spawns them
	///
	/// The pipeline stops when `shutdown` is cancelled or when
	/// [`PipelineHandle::shutdown`] is called.
	pub fn spawn(self, shutdown: &CancellationToken) -> PipelineHandle {
		let ChainPipelineConfig {
			chain,
			client,
			start_from,
			batch_size,
			poll_interval,
			fetch_workers,
			queue_capacity,
		} = self.config;

		let token = shutdown.child_token();
		let capacity = queue_capacity.max(1);

		let (range_tx, range_rx) = mpsc::channel(capacity);
		let (batch_tx, batch_rx) = mpsc::channel(capacity);
		let (event_tx, event_rx) = mpsc::channel(capacity);

		let coordinator =
			RangeCoordinator::new(chain, client.clone(), start_from, batch_size, poll_interval);
		let filter = FilterService::new(chain, client.clone(), self.watch_list);

		let mut tasks = vec![(
			"coordinator",
			tokio::spawn(coordinator.run(range_tx, token.clone())),
		)];
		tasks.extend(
			FetchPool::new(chain, client, fetch_workers)
				.spawn(range_rx, batch_tx, token.clone())
				.into_iter()
				.map(|handle| ("fetch worker", handle)),
		);
		tasks.push(("filter", tokio::spawn(filter.run(batch_rx, event_tx, token.clone()))));
		tasks.push((
			"sink forwarder",
			tokio::spawn(run_sink_forwarder(
				chain,
				self.sink,
				event_rx,
				token.clone(),
				SHUTDOWN_GRACE_PERIOD,
			)),
		));

		info!(
			chain = %chain,
			start_from,
			batch_size,
			fetch_workers,
			"Started pipeline"
		);

		PipelineHandle {
			chain,
			token,
			tasks,
		}
	}
}

/// Handle to the running stages of one chain
pub struct PipelineHandle {
	chain: ChainType,
	token: CancellationToken,
	tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl PipelineHandle {
	pub fn chain(&self) -> ChainType {
		self.chain
	}

	/// Whether every stage has exited
	pub fn is_finished(&self) -> bool {
		self.tasks.iter().all(|(_, task)| task.is_finished())
	}

	/// Cancels the pipeline and waits for every stage to exit
	///
	/// All stages are joined even when one of them panicked; the first failure
	/// is returned.
	pub async fn shutdown(self) -> Result<(), BlockWatcherError> {
		self.token.cancel();

		let mut result = Ok(());
		for (stage, task) in self.tasks {
			if let Err(e) = task.await {
				let error = BlockWatcherError::processing_error(format!(
					"{} {} stage failed: {}",
					self.chain, stage, e
				));
				if result.is_ok() {
					result = Err(error);
				}
			}
		}

		info!(chain = %self.chain, "Pipeline stopped");
		result
	}
}

/// Runs one isolated pipeline per configured chain
pub struct BlockWatcherService {
	watch_list: Arc<WatchList>,
	sink: Arc<dyn EventSink>,
	shutdown: CancellationToken,
	pipelines: Vec<PipelineHandle>,
}

impl BlockWatcherService {
	pub fn new(
		watch_list: Arc<WatchList>,
		sink: Arc<dyn EventSink>,
		shutdown: CancellationToken,
	) -> Self {
		Self {
			watch_list,
			sink,
			shutdown,
			pipelines: Vec::new(),
		}
	}

	/// Starts a pipeline for every entry of `configs`
	///
	/// Returns the number of running pipelines.
	pub fn start(&mut self, configs: Vec<ChainPipelineConfig>) -> usize {
		if configs.is_empty() {
			info!("No chains configured, block watcher will not start");
			return self.pipelines.len();
		}

		info!("Starting pipelines for {} chains", configs.len());

		for config in configs {
			let pipeline = ChainPipeline::new(config, self.watch_list.clone(), self.sink.clone());
			self.pipelines.push(pipeline.spawn(&self.shutdown));
		}

		CHAINS_MONITORED.set(self.pipelines.len() as f64);
		self.pipelines.len()
	}

	/// Chains with a running pipeline
	pub fn chains(&self) -> Vec<ChainType> {
		self.pipelines.iter().map(PipelineHandle::chain).collect()
	}

	/// Cancels every pipeline and waits for all of them
	pub async fn stop(self) -> Result<(), BlockWatcherError> {
		self.shutdown.cancel();

		let results = futures::future::join_all(
			self.pipelines.into_iter().map(PipelineHandle::shutdown),
		)
		.await;

		CHAINS_MONITORED.set(0.0);
		info!("Block watcher stopped");
		results.into_iter().collect()
	}
}
