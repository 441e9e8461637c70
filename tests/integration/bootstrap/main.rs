use std::path::Path;

use address_watch::{
	bootstrap::{create_pipeline_configs, load_chain_configs, load_watch_list},
	models::{ChainType, ConfigError},
};

fn write(dir: &Path, name: &str, contents: &str) {
	std::fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_configuration_to_pipelines() {
	let dir = tempfile::tempdir().unwrap();
	let chains = dir.path().join("chains");
	std::fs::create_dir(&chains).unwrap();

	write(
		&chains,
		"bitcoin.json",
		r#"{
			"chain": "bitcoin",
			"rpc_url": "http://localhost:8332",
			"api_key": "key",
			"start_from": 800000,
			"batch_size": 3,
			"poll_interval_ms": 5000
		}"#,
	);
	write(
		&chains,
		"ethereum.json",
		r#"{"chain":"ethereum","rpc_url":"https://eth.example.com","start_from":19000000,"batch_size":10}"#,
	);
	write(
		&chains,
		"litecoin.json",
		r#"{"chain":"litecoin","rpc_url":"http://localhost:9332","start_from":1,"batch_size":3}"#,
	);
	write(dir.path(), "watchlist.json", r#"{"bc1qwatched": "user1"}"#);

	let watch_list = load_watch_list(Some(&dir.path().join("watchlist.json"))).unwrap();
	assert_eq!(watch_list.owner_of("bc1qwatched"), Some("user1"));

	let configs = load_chain_configs(Some(&chains)).unwrap();
	assert_eq!(configs.len(), 2);

	let pipelines = create_pipeline_configs(&configs);
	assert_eq!(pipelines.len(), 2);

	let bitcoin = &pipelines[0];
	assert_eq!(bitcoin.chain, ChainType::Bitcoin);
	assert_eq!(bitcoin.start_from, 800_000);
	assert_eq!(bitcoin.poll_interval.as_millis(), 5000);
	assert_eq!(bitcoin.fetch_workers, 2);
	assert_eq!(bitcoin.queue_capacity, 100);

	assert_eq!(pipelines[1].chain, ChainType::Ethereum);
	assert_eq!(pipelines[1].poll_interval.as_millis(), 10_000);
}

#[test]
fn test_missing_watch_list_is_an_error() {
	let result = load_watch_list(Some(Path::new("/nonexistent/watchlist.json")));
	assert!(matches!(result, Err(ConfigError::FileError(_))));
}
