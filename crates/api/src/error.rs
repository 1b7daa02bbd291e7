//! Error types for the Compound client.

use alloy_primitives::U256;
use compound_rs_contracts::ContractError;
use thiserror::Error;

/// Errors that can occur when using the Compound client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL error: {0}")]
    GraphQL(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The symbol does not name a market on the active network.
    #[error("Unsupported asset: {symbol} on chain {chain_id}")]
    UnsupportedAsset { symbol: String, chain_id: u64 },

    /// The connected chain has no known deployment.
    #[error("Unsupported network: no deployment for chain {0}")]
    UnsupportedNetwork(u64),

    /// Amount is malformed, negative, or not allowed for the operation.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid address format.
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    /// Supplying into a market the caller is borrowing from.
    #[error("Cannot supply {symbol}: outstanding borrow balance of {balance}")]
    OutstandingBorrow { symbol: String, balance: U256 },

    /// Requested more than the caller holds.
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: U256, need: U256 },

    /// The account is already under water.
    #[error("Account is at risk of liquidation: shortfall {shortfall}")]
    LiquidationRisk { shortfall: U256 },

    /// Not enough borrowing power for the requested amount.
    #[error("Insufficient collateral: liquidity {liquidity}, requested {requested}")]
    InsufficientCollateral { liquidity: U256, requested: U256 },

    /// Chain read, write, or revert failure.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Transaction support not configured.
    #[error("Transaction support not configured: provide an RPC URL and a private key")]
    TransactionNotConfigured,
}

/// High-level classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller input was rejected before touching the chain.
    Validation,
    /// A pre-flight check against chain state failed; nothing was written.
    Precondition,
    /// The node failed, or a submitted transaction reverted.
    Chain,
    /// The indexing API failed.
    Api,
    /// The client is missing configuration.
    Configuration,
}

impl ApiError {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedAsset { .. }
            | Self::InvalidAmount(_)
            | Self::InvalidAddress(_) => ErrorCategory::Validation,
            Self::OutstandingBorrow { .. }
            | Self::InsufficientBalance { .. }
            | Self::LiquidationRisk { .. }
            | Self::InsufficientCollateral { .. } => ErrorCategory::Precondition,
            Self::Contract(_) | Self::UnsupportedNetwork(_) => ErrorCategory::Chain,
            Self::Request(_) | Self::GraphQL(_) | Self::Parse(_) => ErrorCategory::Api,
            Self::TransactionNotConfigured => ErrorCategory::Configuration,
        }
    }

    /// Returns true if the error was raised before any transaction was submitted.
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Precondition
        )
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
