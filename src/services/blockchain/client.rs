//! Chain adapter interface.
//!
//! Every monitored chain is accessed through this trait so the coordinator,
//! fetch pool and filter stage never depend on a concrete chain.

use async_trait::async_trait;

use crate::{models::RawTransaction, services::blockchain::FetchError};

/// Defines the capability every chain adapter provides to the pipeline
///
/// Implementations are single-chain and stateless across calls apart from
/// their connection and rate limiting state. Retries are handled inside the
/// adapter and are invisible to callers.
#[async_trait]
pub trait BlockChainClient: Send + Sync {
	/// Retrieves the current chain height
	///
	/// # Returns
	/// * `Result<u64, FetchError>` - The latest block number or an error
	async fn get_latest_block_number(&self) -> Result<u64, FetchError>;

	/// Retrieves every transaction contained in a block
	///
	/// # Arguments
	/// * `block_number` - Height (or slot) of the block
	///
	/// # Returns
	/// * `Result<Vec<RawTransaction>, FetchError>` - The block's transactions; an empty
	///   block yields an empty vector, not an error
	async fn get_block_transactions(
		&self,
		block_number: u64,
	) -> Result<Vec<RawTransaction>, FetchError>;

	/// Retrieves the full detail of a single transaction
	///
	/// # Arguments
	/// * `tx_id` - Chain specific transaction identifier
	///
	/// # Returns
	/// * `Result<RawTransaction, FetchError>` - The transaction, or an error when it is
	///   unknown or unreachable
	async fn get_transaction(&self, tx_id: &str) -> Result<RawTransaction, FetchError>;
}
