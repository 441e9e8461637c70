//! Ethereum JSON-RPC client.
//!
//! Account-model transactions have no spendable outputs, so each transaction is
//! normalized into a single input carrying the sender and a single output
//! carrying the recipient and the transferred ether.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
	models::{ChainConfig, RawTransaction, TxInput, TxOutput},
	services::blockchain::{
		client::BlockChainClient,
		clients::take_result,
		transports::{BlockchainTransport, HttpTransportClient},
		FetchError,
	},
};

const WEI_PER_ETHER: f64 = 1e18;

#[derive(Debug, Deserialize)]
struct EthereumBlock {
	#[serde(default)]
	transactions: Vec<EthereumTransaction>,
}

#[derive(Debug, Deserialize)]
struct EthereumTransaction {
	hash: String,
	from: String,
	/// `null` for contract creation
	#[serde(default)]
	to: Option<String>,
	value: String,
}

/// Parses a `0x` prefixed quantity
fn parse_quantity(hex: &str) -> Result<u128, FetchError> {
	let digits = hex.trim_start_matches("0x");
	if digits.is_empty() {
		return Ok(0);
	}
	u128::from_str_radix(digits, 16)
		.map_err(|e| FetchError::request_error(format!("Invalid quantity {}: {}", hex, e)))
}

impl TryFrom<EthereumTransaction> for RawTransaction {
	type Error = FetchError;

	fn try_from(tx: EthereumTransaction) -> Result<Self, Self::Error> {
		let wei = parse_quantity(&tx.value)?;
		Ok(RawTransaction {
			id: tx.hash,
			inputs: vec![TxInput {
				referenced_tx_id: String::new(),
				referenced_output_index: 0,
				address: Some(tx.from),
			}],
			outputs: vec![TxOutput {
				value: wei as f64 / WEI_PER_ETHER,
				index: 0,
				address: tx.to.unwrap_or_default(),
			}],
		})
	}
}

fn parse_block(block: Value) -> Result<Vec<RawTransaction>, FetchError> {
	let block: EthereumBlock = serde_json::from_value(block)
		.map_err(|e| FetchError::request_error(format!("Failed to parse block: {}", e)))?;
	block
		.transactions
		.into_iter()
		.map(RawTransaction::try_from)
		.collect()
}

/// Client implementation for Ethereum-like account chains
#[derive(Clone)]
pub struct EthereumClient<T: Send + Sync + Clone> {
	http_client: T,
}

impl<T: Send + Sync + Clone> EthereumClient<T> {
	/// Creates a new Ethereum client instance with a specific transport client
	pub fn new_with_transport(http_client: T) -> Self {
		Self { http_client }
	}
}

impl EthereumClient<HttpTransportClient> {
	/// Creates a new Ethereum client instance
	pub fn new(config: &ChainConfig) -> Result<Self, anyhow::Error> {
		let http_client = HttpTransportClient::new(config)?;
		Ok(Self::new_with_transport(http_client))
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> BlockChainClient for EthereumClient<T> {
	async fn get_latest_block_number(&self) -> Result<u64, FetchError> {
		let response = self
			.http_client
			.send_raw_request::<Value>("eth_blockNumber", None)
			.await?;

		let result = take_result(response)?;
		let hex_str = result
			.as_str()
			.ok_or_else(|| FetchError::request_error("Block number is not a string"))?;

		u64::from_str_radix(hex_str.trim_start_matches("0x"), 16).map_err(|e| {
			FetchError::request_error(format!("Failed to parse block number: {}", e))
		})
	}

	async fn get_block_transactions(
		&self,
		block_number: u64,
	) -> Result<Vec<RawTransaction>, FetchError> {
		let params = json!([
			format!("0x{:x}", block_number),
			true // include full transaction objects
		]);

		let response = self
			.http_client
			.send_raw_request("eth_getBlockByNumber", Some(params))
			.await?;

		let block = take_result(response)?;
		if block.is_null() {
			return Err(FetchError::block_not_found(block_number));
		}

		parse_block(block)
	}

	async fn get_transaction(&self, tx_id: &str) -> Result<RawTransaction, FetchError> {
		let response = self
			.http_client
			.send_raw_request("eth_getTransactionByHash", Some(json!([tx_id])))
			.await?;

		let tx = take_result(response)?;
		if tx.is_null() {
			return Err(FetchError::transaction_not_found(tx_id));
		}

		let tx: EthereumTransaction = serde_json::from_value(tx).map_err(|e| {
			FetchError::request_error(format!("Failed to parse transaction: {}", e))
		})?;
		tx.try_into()
	}
}
