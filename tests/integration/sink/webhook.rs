use address_watch::{
	models::{ChainType, FilteredEvent},
	services::sink::{EventSink, SinkError, WebhookSink},
};
use mockito::{Matcher, Server};
use serde_json::json;

fn event() -> FilteredEvent {
	FilteredEvent {
		chain: ChainType::Bitcoin,
		tx_id: "tx-101".to_string(),
		from_address: "prev".to_string(),
		to_address: "addrX".to_string(),
		amount: 0.5,
		fee: 0.0001,
		owner_id: "user1".to_string(),
	}
}

#[tokio::test]
async fn test_publish_posts_event_as_json() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/events")
		.match_header("content-type", "application/json")
		.match_body(Matcher::Json(json!({
			"chain": "bitcoin",
			"tx_id": "tx-101",
			"from_address": "prev",
			"to_address": "addrX",
			"amount": 0.5,
			"fee": 0.0001,
			"owner_id": "user1"
		})))
		.with_status(200)
		.create_async()
		.await;

	let sink = WebhookSink::new(&format!("{}/events", server.url()), 0).unwrap();
	sink.publish(&event()).await.unwrap();

	mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_network_error() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/events")
		.with_status(400)
		.create_async()
		.await;

	let sink = WebhookSink::new(&format!("{}/events", server.url()), 0).unwrap();
	let result = sink.publish(&event()).await;

	assert!(matches!(result, Err(SinkError::NetworkError(_))));
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/events")
		.with_status(503)
		.expect(2)
		.create_async()
		.await;

	let sink = WebhookSink::new(&format!("{}/events", server.url()), 1).unwrap();
	let result = sink.publish(&event()).await;

	assert!(result.is_err());
	mock.assert_async().await;
}
