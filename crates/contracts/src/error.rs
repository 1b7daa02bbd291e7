//! Error types for the contracts crate.

use alloy_primitives::TxHash;
use thiserror::Error;

/// Errors that can occur when talking to a chain.
#[derive(Debug, Error)]
pub enum ContractError {
    /// RPC connection failed.
    #[error("RPC connection failed: {0}")]
    RpcConnection(String),

    /// Invalid private key.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// A read-only call failed, reverted, or returned undecodable data.
    #[error("Chain read failed: {0}")]
    ChainRead(String),

    /// A transaction could not be submitted.
    #[error("Chain write failed: {0}")]
    ChainWrite(String),

    /// A submitted transaction was mined but reverted.
    #[error("Transaction reverted: {0}")]
    TransactionReverted(TxHash),
}

/// Result type alias for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;
