//! Domain models and data structures for address monitoring.
//!
//! - `blockchain`: chain-agnostic block, transaction and event types
//! - `config`: configuration loading and validation
//! - `core`: core domain models (chain configuration, watch-list)

mod blockchain;
mod config;
mod core;

pub use blockchain::{
	BlockRange, ChainType, FilteredEvent, RawTransaction, TransactionBatch, TxInput, TxOutput,
};

pub use core::{
	ChainConfig, WatchList, DEFAULT_FETCH_WORKERS, DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_MS,
	DEFAULT_QUEUE_CAPACITY, DEFAULT_REQUESTS_PER_SECOND,
};

pub use config::{ConfigError, ConfigLoader};
