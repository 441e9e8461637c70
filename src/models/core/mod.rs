//! Core domain models.

mod chain;
mod watch_list;

pub use chain::{
	ChainConfig, DEFAULT_FETCH_WORKERS, DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_MS,
	DEFAULT_QUEUE_CAPACITY, DEFAULT_REQUESTS_PER_SECOND,
};
pub use watch_list::WatchList;
