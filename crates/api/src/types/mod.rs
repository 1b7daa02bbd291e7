//! Type definitions shared by the market operations and the balance client.

pub mod account;
pub mod chain;
pub mod market;
pub mod scalars;

pub use account::{AccountBalances, AccountLiquidity, MarketBalance};
pub use alloy_chains::NamedChain;
pub use chain::{chain_from_id, chain_name, chain_serde, SUPPORTED_CHAINS};
pub use market::{GqlMarketRates, MarketSummary};
