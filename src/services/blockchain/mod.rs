//! Blockchain client interfaces and implementations.
//!
//! Provides abstractions and concrete implementations for interacting with
//! different blockchain networks. Includes:
//!
//! - The chain adapter trait consumed by the pipeline
//! - Chain specific clients
//! - A rate limited, retrying JSON-RPC transport
//! - Error handling for blockchain operations

mod client;
mod clients;
mod error;
mod factory;
mod transports;

pub use client::BlockChainClient;
pub use clients::{BitcoinClient, EthereumClient, SolanaClient};
pub use error::FetchError;
pub use factory::create_blockchain_client;
pub use transports::{BlockchainTransport, HttpTransportClient, RpcRateLimiter};
