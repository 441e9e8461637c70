//! Blockchain client implementations.
//!
//! Contains one implementation of [`BlockChainClient`] per supported chain:
//! - Bitcoin client for UTXO-model chains
//! - Ethereum client for account-model EVM chains
//! - Solana client for balance-delta chains
//!
//! [`BlockChainClient`]: crate::services::blockchain::BlockChainClient

mod bitcoin;
mod ethereum;
mod solana;

pub use bitcoin::BitcoinClient;
pub use ethereum::EthereumClient;
pub use solana::SolanaClient;

use serde_json::Value;

use crate::services::blockchain::FetchError;

/// Extracts the `result` member of a JSON-RPC response
fn take_result(mut response: Value) -> Result<Value, FetchError> {
	response
		.get_mut("result")
		.map(Value::take)
		.ok_or_else(|| FetchError::request_error("Missing 'result' field"))
}
