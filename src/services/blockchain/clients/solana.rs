//! Solana JSON-RPC client.
//!
//! Solana transactions expose no transfer outputs directly. They are
//! normalized from the balance changes recorded in the transaction meta:
//! accounts that gained lamports become outputs and accounts that lost
//! lamports become inputs.

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

const LAMPORTS_PER_SOL: f64 = 1e9;

#[derive(Debug, Deserialize)]
struct SolanaBlock {
	#[serde(default)]
	transactions: Vec<SolanaTransactionWithMeta>,
}

#[derive(Debug, Deserialize)]
struct SolanaTransactionWithMeta {
	transaction: SolanaTransaction,
	#[serde(default)]
	meta: Option<SolanaMeta>,
}

#[derive(Debug, Deserialize)]
struct SolanaTransaction {
	signatures: Vec<String>,
	message: SolanaMessage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolanaMessage {
	account_keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolanaMeta {
	#[serde(default)]
	pre_balances: Vec<u64>,
	#[serde(default)]
	post_balances: Vec<u64>,
	/// Accounts pulled in through address lookup tables (versioned transactions)
	#[serde(default)]
	loaded_addresses: Option<SolanaLoadedAddresses>,
}

#[derive(Debug, Default, Deserialize)]
struct SolanaLoadedAddresses {
	#[serde(default)]
	writable: Vec<String>,
	#[serde(default)]
	readonly: Vec<String>,
}

impl From<SolanaTransactionWithMeta> for RawTransaction {
	fn from(tx: SolanaTransactionWithMeta) -> Self {
		let id = tx
			.transaction
			.signatures
			.into_iter()
			.next()
			.unwrap_or_default();

		let mut raw = RawTransaction {
			id,
			..Default::default()
		};

		let Some(meta) = tx.meta else {
			return raw;
		};

		let loaded = meta.loaded_addresses.unwrap_or_default();
		let accounts = tx
			.transaction
			.message
			.account_keys
			.into_iter()
			.chain(loaded.writable)
			.chain(loaded.readonly);

		for (index, (address, (pre, post))) in accounts
			.zip(meta.pre_balances.iter().zip(meta.post_balances.iter()))
			.enumerate()
		{
			let index = index as u32;
			if post > pre {
				raw.outputs.push(TxOutput {
					value: (post - pre) as f64 / LAMPORTS_PER_SOL,
					index,
					address,
				});
			} else if pre > post {
				raw.inputs.push(TxInput {
					referenced_tx_id: String::new(),
					referenced_output_index: index,
					address: Some(address),
				});
			}
		}

		raw
	}
}

fn parse_block(block: Value) -> Result<Vec<RawTransaction>, FetchError> {
	let block: SolanaBlock = serde_json::from_value(block)
		.map_err(|e| FetchError::request_error(format!("Failed to parse block: {}", e)))?;
	Ok(block
		.transactions
		.into_iter()
		.map(RawTransaction::from)
		.collect())
}

/// Client implementation for Solana
#[derive(Clone)]
pub struct SolanaClient<T: Send + Sync + Clone> {
	http_client: T,
}

impl<T: Send + Sync + Clone> SolanaClient<T> {
	/// Creates a new Solana client instance with a specific transport client
	pub fn new_with_transport(http_client: T) -> Self {
		Self { http_client }
	}
}

impl SolanaClient<HttpTransportClient> {
	/// Creates a new Solana client instance
	pub fn new(config: &ChainConfig) -> Result<Self, anyhow::Error> {
		let http_client = HttpTransportClient::new(config)?;
		Ok(Self::new_with_transport(http_client))
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> BlockChainClient for SolanaClient<T> {
	/// Returns the current slot, which plays the role of the block height
	async fn get_latest_block_number(&self) -> Result<u64, FetchError> {
		let response = self
			.http_client
			.send_raw_request::<Value>("getSlot", None)
			.await?;

		take_result(response)?
			.as_u64()
			.ok_or_else(|| FetchError::request_error("Failed to parse slot"))
	}

	/// Fetches the block produced in `block_number` (a slot)
	///
	/// Skipped slots are reported by the node as an RPC error and surface as a
	/// [`FetchError`], so the caller skips them like any other unreadable block.
	async fn get_block_transactions(
		&self,
		block_number: u64,
	) -> Result<Vec<RawTransaction>, FetchError> {
		let params = json!([
			block_number,
			{
				"encoding": "json",
				"transactionDetails": "full",
				"rewards": false,
				"maxSupportedTransactionVersion": 0
			}
		]);

		let response = self
			.http_client
			.send_raw_request("getBlock", Some(params))
			.await?;

		let block = take_result(response)?;
		if block.is_null() {
			return Err(FetchError::block_not_found(block_number));
		}

		parse_block(block)
	}

	async fn get_transaction(&self, tx_id: &str) -> Result<RawTransaction, FetchError> {
		let params = json!([
			tx_id,
			{
				"encoding": "json",
				"maxSupportedTransactionVersion": 0
			}
		]);

		let response = self
			.http_client
			.send_raw_request("getTransaction", Some(params))
			.await?;

		let tx = take_result(response)?;
		if tx.is_null() {
			return Err(FetchError::transaction_not_found(tx_id));
		}

		let tx: SolanaTransactionWithMeta = serde_json::from_value(tx).map_err(|e| {
			FetchError::request_error(format!("Failed to parse transaction: {}", e))
		})?;
		Ok(tx.into())
	}
}
