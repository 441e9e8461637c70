//! Bitcoin Core JSON-RPC client.
//!
//! Blocks are fetched with `getblock` verbosity 2 so every transaction arrives
//! decoded in one round trip; prior outputs are resolved with
//! `getrawtransaction` in verbose mode.

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

#[derive(Debug, Deserialize)]
struct BitcoinBlock {
	#[serde(default)]
	tx: Vec<BitcoinTransaction>,
}

#[derive(Debug, Deserialize)]
struct BitcoinTransaction {
	txid: String,
	#[serde(default)]
	vin: Vec<BitcoinInput>,
	#[serde(default)]
	vout: Vec<BitcoinOutput>,
}

#[derive(Debug, Deserialize)]
struct BitcoinInput {
	/// Absent on coinbase inputs
	#[serde(default)]
	txid: Option<String>,
	#[serde(default)]
	vout: Option<u32>,
	/// Only reported by nodes running with `-txindex` and verbosity 3
	#[serde(default)]
	prevout: Option<BitcoinPrevout>,
}

#[derive(Debug, Deserialize)]
struct BitcoinPrevout {
	#[serde(rename = "scriptPubKey", default)]
	script_pub_key: BitcoinScript,
}

#[derive(Debug, Deserialize)]
struct BitcoinOutput {
	value: f64,
	n: u32,
	#[serde(rename = "scriptPubKey", default)]
	script_pub_key: BitcoinScript,
}

#[derive(Debug, Default, Deserialize)]
struct BitcoinScript {
	#[serde(default)]
	address: Option<String>,
}

impl From<BitcoinTransaction> for RawTransaction {
	fn from(tx: BitcoinTransaction) -> Self {
		RawTransaction {
			id: tx.txid,
			inputs: tx
				.vin
				.into_iter()
				.map(|input| TxInput {
					referenced_tx_id: input.txid.unwrap_or_default(),
					referenced_output_index: input.vout.unwrap_or_default(),
					address: input.prevout.and_then(|p| p.script_pub_key.address),
				})
				.collect(),
			outputs: tx
				.vout
				.into_iter()
				.map(|output| TxOutput {
					value: output.value,
					index: output.n,
					address: output.script_pub_key.address.unwrap_or_default(),
				})
				.collect(),
		}
	}
}

fn parse_block(block: Value) -> Result<Vec<RawTransaction>, FetchError> {
	let block: BitcoinBlock = serde_json::from_value(block)
		.map_err(|e| FetchError::request_error(format!("Failed to parse block: {}", e)))?;
	Ok(block.tx.into_iter().map(RawTransaction::from).collect())
}

fn parse_transaction(tx: Value) -> Result<RawTransaction, FetchError> {
	let tx: BitcoinTransaction = serde_json::from_value(tx)
		.map_err(|e| FetchError::request_error(format!("Failed to parse transaction: {}", e)))?;
	Ok(tx.into())
}

/// Client implementation for Bitcoin-like UTXO chains
#[derive(Clone)]
pub struct BitcoinClient<T: Send + Sync + Clone> {
	http_client: T,
}

impl<T: Send + Sync + Clone> BitcoinClient<T> {
	/// Creates a new Bitcoin client instance with a specific transport client
	pub fn new_with_transport(http_client: T) -> Self {
		Self { http_client }
	}
}

impl BitcoinClient<HttpTransportClient> {
	/// Creates a new Bitcoin client instance
	///
	/// # Arguments
	/// * `config` - Chain configuration containing the RPC endpoint and limits
	///
	/// # Returns
	/// * `Result<Self, anyhow::Error>` - New client instance or configuration error
	pub fn new(config: &ChainConfig) -> Result<Self, anyhow::Error> {
		let http_client = HttpTransportClient::new(config)?;
		Ok(Self::new_with_transport(http_client))
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> BlockChainClient for BitcoinClient<T> {
	async fn get_latest_block_number(&self) -> Result<u64, FetchError> {
		let response = self
			.http_client
			.send_raw_request::<Value>("getblockcount", None)
			.await?;

		take_result(response)?.as_u64().ok_or_else(|| {
			FetchError::request_error("Failed to parse block count".to_string())
		})
	}

	/// Resolves the block hash for the height, then fetches the decoded block
	async fn get_block_transactions(
		&self,
		block_number: u64,
	) -> Result<Vec<RawTransaction>, FetchError> {
		let response = self
			.http_client
			.send_raw_request("getblockhash", Some(json!([block_number])))
			.await?;

		let hash = take_result(response)?;
		let hash = hash
			.as_str()
			.ok_or_else(|| FetchError::block_not_found(block_number))?;

		let response = self
			.http_client
			.send_raw_request("getblock", Some(json!([hash, 2])))
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
			.send_raw_request("getrawtransaction", Some(json!([tx_id, true])))
			.await?;

		let tx = take_result(response)?;
		if tx.is_null() {
			return Err(FetchError::transaction_not_found(tx_id));
		}

		parse_transaction(tx)
	}
}
