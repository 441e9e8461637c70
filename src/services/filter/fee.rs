//! Fee resolution by input provenance.

use std::collections::HashMap;

use tracing::debug;

use crate::{
	models::RawTransaction,
	services::blockchain::{BlockChainClient, FetchError},
};

/// Estimates the network fee of `transaction`
///
/// The fee is the value of every referenced prior output minus the value of
/// the transaction's own outputs, floored at zero. Inputs without a referenced
/// transaction (coinbase or account-model inputs) contribute nothing, and so
/// does a referenced output index the prior transaction does not have. Each
/// referenced transaction is fetched at most once.
///
/// # Errors
/// Any failed transaction lookup fails the whole computation.
pub async fn calculate_fee(
	client: &dyn BlockChainClient,
	transaction: &RawTransaction,
) -> Result<f64, FetchError> {
	let mut resolved: HashMap<&str, RawTransaction> = HashMap::new();
	let mut input_total = 0.0;

	for input in &transaction.inputs {
		let tx_id = input.referenced_tx_id.as_str();
		if tx_id.is_empty() {
			continue;
		}

		if !resolved.contains_key(tx_id) {
			let referenced = client.get_transaction(tx_id).await?;
			resolved.insert(tx_id, referenced);
		}

		match resolved
			.get(tx_id)
			.and_then(|referenced| referenced.output(input.referenced_output_index))
		{
			Some(output) => input_total += output.value,
			None => debug!(
				tx_id,
				index = input.referenced_output_index,
				"Referenced output not found, input contributes nothing"
			),
		}
	}

	Ok((input_total - transaction.output_total()).max(0.0))
}
