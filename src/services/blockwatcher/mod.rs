//! Block watching pipeline.
//!
//! - `coordinator`: schedules block ranges from a per-chain cursor
//! - `fetcher`: expands ranges into per-block transaction batches
//! - `service`: assembles and supervises one pipeline per chain

mod coordinator;
mod error;
mod fetcher;
mod service;

pub use coordinator::{RangeCoordinator, TickOutcome};
pub use error::BlockWatcherError;
pub use fetcher::FetchPool;
pub use service::{BlockWatcherService, ChainPipeline, ChainPipelineConfig, PipelineHandle};
