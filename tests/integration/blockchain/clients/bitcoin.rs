use crate::integration::mocks::{rpc_response, MockRpcTransportClient};
use address_watch::{
	services::blockchain::{BitcoinClient, BlockChainClient, FetchError},
	utils::tests::ChainConfigBuilder,
};
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn test_get_latest_block_number() {
	let mut transport = MockRpcTransportClient::new();
	transport
		.expect_send_raw_request()
		.withf(|method, params| method == "getblockcount" && params.is_none())
		.times(1)
		.returning(|_, _| Ok(rpc_response(json!(105))));

	let client = BitcoinClient::new_with_transport(transport);
	assert_eq!(client.get_latest_block_number().await.unwrap(), 105);
}

#[tokio::test]
async fn test_get_block_transactions_resolves_hash_first() {
	let mut transport = MockRpcTransportClient::new();
	transport
		.expect_send_raw_request()
		.withf(|method, params| {
			method == "getblockhash" && params.as_ref() == Some(&json!([101]))
		})
		.times(1)
		.returning(|_, _| Ok(rpc_response(json!("00000000abc"))));
	transport
		.expect_send_raw_request()
		.withf(|method, params| {
			method == "getblock" && params.as_ref() == Some(&json!(["00000000abc", 2]))
		})
		.times(1)
		.returning(|_, _| {
			Ok(rpc_response(json!({
				"hash": "00000000abc",
				"tx": [{
					"txid": "tx-101",
					"vin": [{ "txid": "prev", "vout": 0 }],
					"vout": [{ "value": 0.5, "n": 0, "scriptPubKey": { "address": "addrX" } }]
				}]
			})))
		});

	let client = BitcoinClient::new_with_transport(transport);
	let txs = client.get_block_transactions(101).await.unwrap();

	assert_eq!(txs.len(), 1);
	assert_eq!(txs[0].id, "tx-101");
	assert_eq!(txs[0].outputs[0].address, "addrX");
	assert_eq!(txs[0].inputs[0].referenced_tx_id, "prev");
}

#[tokio::test]
async fn test_get_transaction_not_found() {
	let mut transport = MockRpcTransportClient::new();
	transport
		.expect_send_raw_request()
		.withf(|method, _| method == "getrawtransaction")
		.times(1)
		.returning(|_, _| Ok(rpc_response(json!(null))));

	let client = BitcoinClient::new_with_transport(transport);
	let result = client.get_transaction("missing").await;
	assert!(matches!(result, Err(FetchError::TransactionNotFound(id)) if id == "missing"));
}

#[tokio::test]
async fn test_transport_errors_propagate() {
	let mut transport = MockRpcTransportClient::new();
	transport
		.expect_send_raw_request()
		.returning(|_, _| Err(FetchError::connection_error("connection refused")));

	let client = BitcoinClient::new_with_transport(transport);
	assert!(matches!(
		client.get_latest_block_number().await,
		Err(FetchError::ConnectionError(_))
	));
}

#[tokio::test]
async fn test_get_transaction_over_http() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({
			"method": "getrawtransaction",
			"params": ["prev", true]
		})))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"result": {
					"txid": "prev",
					"vin": [],
					"vout": [
						{ "value": 1.0, "n": 0, "scriptPubKey": { "address": "a" } },
						{ "value": 2.0, "n": 1, "scriptPubKey": { "address": "b" } }
					]
				}
			})
			.to_string(),
		)
		.create_async()
		.await;

	let config = ChainConfigBuilder::new()
		.rpc_url(&server.url())
		.max_retries(0)
		.build();
	let client = BitcoinClient::new(&config).unwrap();

	let tx = client.get_transaction("prev").await.unwrap();
	assert_eq!(tx.output(1).map(|o| o.value), Some(2.0));
	mock.assert_async().await;
}
