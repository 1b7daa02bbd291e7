//! Compound v2 Rust API Library
//!
//! This crate provides pre-flight checked transactions against Compound v2
//! style lending markets, and a GraphQL client for indexed account balances.
//!
//! # Example
//!
//! ```no_run
//! use compound_rs_api::{Amount, CompoundClient, CompoundClientConfig};
//! use compound_rs_contracts::PendingTransaction;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), compound_rs_api::ApiError> {
//!     // API-only client (no transactions)
//!     let client = CompoundClient::new();
//!     let balances = client
//!         .get_account_balances("0x1234567890123456789012345678901234567890")
//!         .await?;
//!
//!     // Full client with transaction support
//!     let config = CompoundClientConfig::new()
//!         .with_rpc_url("https://eth.llamarpc.com")
//!         .with_private_key("0x...");
//!     let client = CompoundClient::connect(config).await?;
//!     let markets = client.markets()?;
//!
//!     // Approves DAI for exactly 100 if needed, then mints cDAI
//!     markets.supply("DAI", &Amount::natural("100")).await?.wait().await?;
//!
//!     // Repay the whole USDC borrow
//!     markets.repay_borrow("USDC", &Amount::Max, None).await?.wait().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Operations
//!
//! Every operation in [`pipeline`] takes an explicit [`CallContext`]: the
//! resolved [`Network`], the [`ChainClient`](compound_rs_contracts::ChainClient)
//! and caller [`TxOptions`]. Validation and pre-condition failures are raised
//! before any transaction is submitted. Submitted transactions are never
//! retried; a revert surfaces from the pending handle's `wait()`.
//!
//! Concurrent operations for the same account and market are not
//! serialized. Two supplies in flight may both observe an insufficient
//! allowance and both approve.
//!
//! # Error Handling
//!
//! All errors are unified through [`ApiError`]. Use [`ApiError::category()`]
//! for high-level classification and [`ApiError::is_pre_flight()`] to check
//! whether anything was submitted.

pub mod amount;
pub mod client;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod queries;
pub mod registry;
pub mod types;

// Re-export main types at crate root
pub use amount::Amount;
pub use client::{
    BalanceClient, ClientConfig, CompoundClient, CompoundClientConfig, MarketOperations,
    DEFAULT_API_URL,
};
pub use compound_rs_contracts::{
    ChainClient, MinedTransaction, PendingTransaction, RpcChainClient, TxOverrides,
};
pub use context::{CallContext, MarketKind, Network, ResolvedMarket, TxOptions};
pub use error::{ApiError, ErrorCategory, Result};
pub use pipeline::ApprovalOutcome;
pub use registry::{AssetDescriptor, AssetRegistry, Deployment, MarketAbi, SymbolForm};
pub use types::{
    chain_from_id, chain_name, chain_serde, AccountBalances, AccountLiquidity, MarketBalance,
    MarketSummary, NamedChain, SUPPORTED_CHAINS,
};
