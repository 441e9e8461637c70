use serde::{Deserialize, Serialize};

use crate::models::ChainType;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 5;
pub const DEFAULT_FETCH_WORKERS: usize = 2;
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration of a single monitored chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
	pub chain: ChainType,
	pub rpc_url: String,
	#[serde(default)]
	pub api_key: Option<String>,
	/// First block the coordinator schedules
	pub start_from: u64,
	/// Maximum number of blocks per range
	pub batch_size: u64,
	#[serde(default = "default_poll_interval_ms")]
	pub poll_interval_ms: u64,
	/// Outbound request ceiling enforced by the chain's transport
	#[serde(default = "default_requests_per_second")]
	pub requests_per_second: u32,
	#[serde(default = "default_fetch_workers")]
	pub fetch_workers: usize,
	/// Capacity of each inter-stage queue
	#[serde(default = "default_queue_capacity")]
	pub queue_capacity: usize,
	#[serde(default = "default_max_retries")]
	pub max_retries: u32,
}

fn default_poll_interval_ms() -> u64 {
	DEFAULT_POLL_INTERVAL_MS
}

fn default_requests_per_second() -> u32 {
	DEFAULT_REQUESTS_PER_SECOND
}

fn default_fetch_workers() -> usize {
	DEFAULT_FETCH_WORKERS
}

fn default_queue_capacity() -> usize {
	DEFAULT_QUEUE_CAPACITY
}

fn default_max_retries() -> u32 {
	DEFAULT_MAX_RETRIES
}
