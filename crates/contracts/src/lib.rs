//! Contract bindings and chain clients for Compound v2 style lending markets.
//!
//! This crate provides Solidity bindings for market tokens, the comptroller and
//! ERC-20 underlyings, together with the [`ChainClient`] abstraction every
//! market operation is written against.
//!
//! # Example
//!
//! ```no_run
//! use compound_rs_contracts::{read_call, ChainClient, RpcChainClient};
//! use compound_rs_contracts::ctoken::ICToken;
//! use alloy::primitives::Address;
//!
//! #[tokio::main]
//! async fn main() -> compound_rs_contracts::Result<()> {
//!     let client = RpcChainClient::new(
//!         "https://eth.llamarpc.com",
//!         "0x...", // private key
//!     )?;
//!
//!     // Market token balance of the signer
//!     let market: Address = "0x...".parse().unwrap();
//!     let call = ICToken::balanceOfCall { owner: client.signer_address() };
//!     let balance = read_call(&client, market, &call).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod chain_client;
pub mod comptroller;
pub mod ctoken;
pub mod erc20;
pub mod error;
pub mod prepared_call;
pub mod provider;

pub use chain_client::{read_call, ChainClient, MinedTransaction, PendingTransaction, TxOverrides};
pub use error::{ContractError, Result};
pub use prepared_call::PreparedCall;
pub use provider::{HttpProvider, RpcChainClient, RpcPendingTransaction};
