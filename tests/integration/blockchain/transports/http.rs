use address_watch::{
	services::blockchain::{BlockchainTransport, FetchError, HttpTransportClient},
	utils::tests::ChainConfigBuilder,
};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

fn transport(url: &str) -> HttpTransportClient {
	let config = ChainConfigBuilder::new().rpc_url(url).max_retries(0).build();
	HttpTransportClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_sends_json_rpc_envelope() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_header("content-type", "application/json")
		.match_body(Matcher::Json(json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": "getblockhash",
			"params": [101]
		})))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"00ab"}"#)
		.create_async()
		.await;

	let client = transport(&server.url());
	let response = client
		.send_raw_request("getblockhash", Some(json!([101])))
		.await
		.unwrap();

	assert_eq!(response["result"], json!("00ab"));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_params_default_to_empty_array() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({ "method": "getSlot", "params": [] })))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":7}"#)
		.create_async()
		.await;

	let client = transport(&server.url());
	let response = client.send_raw_request::<Value>("getSlot", None).await.unwrap();

	assert_eq!(response["result"], json!(7));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_api_key_header() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_header("x-api-key", "secret")
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":1}"#)
		.create_async()
		.await;

	let config = ChainConfigBuilder::new()
		.rpc_url(&server.url())
		.api_key("secret")
		.max_retries(0)
		.build();
	let client = HttpTransportClient::new(&config).unwrap();

	assert!(client.send_raw_request::<Value>("getblockcount", None).await.is_ok());
	mock.assert_async().await;
}

#[tokio::test]
async fn test_rpc_error_member_is_request_error() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/")
		.with_status(200)
		.with_body(
			r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32007,"message":"Slot 42 was skipped"}}"#,
		)
		.create_async()
		.await;

	let client = transport(&server.url());
	let result = client.send_raw_request("getBlock", Some(json!([42]))).await;

	match result {
		Err(FetchError::RequestError(msg)) => assert!(msg.contains("skipped")),
		other => panic!("unexpected result: {:?}", other),
	}
}

#[tokio::test]
async fn test_non_success_status_is_request_error() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/")
		.with_status(401)
		.with_body("unauthorized")
		.create_async()
		.await;

	let client = transport(&server.url());
	let result = client.send_raw_request::<Value>("getblockcount", None).await;
	assert!(matches!(result, Err(FetchError::RequestError(_))));
}

#[tokio::test]
async fn test_unreachable_node_is_connection_error() {
	// Nothing listens on port 9 of localhost
	let client = transport("http://127.0.0.1:9");
	let result = client.send_raw_request::<Value>("getblockcount", None).await;
	assert!(matches!(result, Err(FetchError::ConnectionError(_))));
}

#[tokio::test]
async fn test_requests_share_one_rate_limiter() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/")
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":1}"#)
		.expect(4)
		.create_async()
		.await;

	let config = ChainConfigBuilder::new()
		.rpc_url(&server.url())
		.requests_per_second(2)
		.max_retries(0)
		.build();
	let client = HttpTransportClient::new(&config).unwrap();
	let clone = client.clone();

	let start = Instant::now();
	tokio::join!(
		async {
			for _ in 0..2 {
				client.send_raw_request::<Value>("getblockcount", None).await.unwrap();
			}
		},
		async {
			for _ in 0..2 {
				clone.send_raw_request::<Value>("getblockcount", None).await.unwrap();
			}
		}
	);

	// Two immediate permits, then one every 500ms
	assert!(start.elapsed() >= Duration::from_millis(900));
	assert_eq!(client.get_current_url(), clone.get_current_url());
}
