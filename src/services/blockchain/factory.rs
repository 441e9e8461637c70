//! Blockchain client factory implementation.
//!
//! Selects the client for a chain once, at startup, so the rest of the
//! pipeline only ever sees `Arc<dyn BlockChainClient>`.

use std::sync::Arc;

use crate::{
	models::{ChainConfig, ChainType, ConfigError},
	services::blockchain::{
		clients::{BitcoinClient, EthereumClient, SolanaClient},
		BlockChainClient,
	},
};

/// Creates the blockchain client matching the chain type of `config`
///
/// # Arguments
/// * `config` - Chain configuration containing the chain type and connection details
///
/// # Returns
/// * `Result<Arc<dyn BlockChainClient>, ConfigError>` - Initialized client, or a
///   configuration error when the client cannot be built (e.g. an unparseable RPC URL)
pub fn create_blockchain_client(
	config: &ChainConfig,
) -> Result<Arc<dyn BlockChainClient>, ConfigError> {
	let build_error = |e: anyhow::Error| {
		ConfigError::chain_error(format!("Failed to create {} client: {:#}", config.chain, e))
	};

	let client: Arc<dyn BlockChainClient> = match config.chain {
		ChainType::Bitcoin => Arc::new(BitcoinClient::new(config).map_err(build_error)?),
		ChainType::Ethereum => Arc::new(EthereumClient::new(config).map_err(build_error)?),
		ChainType::Solana => Arc::new(SolanaClient::new(config).map_err(build_error)?),
	};

	Ok(client)
}
