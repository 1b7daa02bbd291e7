//! The chain client seam used by every market operation.
//!
//! A [`ChainClient`] performs raw read-only calls and submits transactions.
//! Typed access goes through [`read_call`] and [`PreparedCall`](crate::PreparedCall),
//! which encode and decode with the `sol!` bindings, so implementations only
//! deal in bytes and transaction requests.

#![allow(async_fn_in_trait)]

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;

use crate::error::{ContractError, Result};

/// Outcome of a mined, successful transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinedTransaction {
    /// Transaction hash.
    pub hash: TxHash,
    /// Block the transaction was included in, if the node reported it.
    pub block_number: Option<u64>,
    /// Gas used by the transaction.
    pub gas_used: u64,
}

/// A submitted transaction whose completion can be awaited.
///
/// The handle is owned by whoever submitted the transaction.
pub trait PendingTransaction {
    /// Hash of the submitted transaction.
    fn tx_hash(&self) -> TxHash;

    /// Wait until the transaction is mined.
    ///
    /// Fails with [`ContractError::TransactionReverted`] if the receipt reports failure.
    async fn wait(self) -> Result<MinedTransaction>;
}

/// Read/write access to a blockchain node on behalf of a single signer.
pub trait ChainClient {
    /// Handle type returned by [`ChainClient::write`].
    type Pending: PendingTransaction;

    /// Address transactions are signed with.
    fn signer_address(&self) -> Address;

    /// Chain id reported by the node.
    async fn chain_id(&self) -> Result<u64>;

    /// Execute a read-only call and return the raw return data.
    async fn read(&self, to: Address, input: Bytes) -> Result<Bytes>;

    /// Sign and submit a transaction.
    async fn write(&self, tx: TransactionRequest) -> Result<Self::Pending>;
}

/// Pass-through transaction parameters supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxOverrides {
    /// Value attached to the call, in wei.
    pub value: Option<U256>,
    /// Gas limit.
    pub gas_limit: Option<u64>,
    /// Legacy gas price, in wei.
    pub gas_price: Option<u128>,
    /// Explicit nonce.
    pub nonce: Option<u64>,
}

impl TxOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attached value.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the gas limit.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Set the gas price.
    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Set the nonce.
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Returns true if no override is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the overrides onto a transaction request.
    pub fn apply(&self, mut tx: TransactionRequest) -> TransactionRequest {
        if let Some(value) = self.value {
            tx.value = Some(value);
        }
        if let Some(gas_limit) = self.gas_limit {
            tx.gas = Some(gas_limit);
        }
        if let Some(gas_price) = self.gas_price {
            tx.gas_price = Some(gas_price);
        }
        if let Some(nonce) = self.nonce {
            tx.nonce = Some(nonce);
        }
        tx
    }
}

/// Execute a typed read-only call through a [`ChainClient`].
pub async fn read_call<C, S>(client: &C, to: Address, call: &S) -> Result<S::Return>
where
    C: ChainClient,
    S: SolCall,
{
    tracing::debug!(%to, method = S::SIGNATURE, "read call");
    let output = client.read(to, call.abi_encode().into()).await?;
    S::abi_decode_returns(&output).map_err(|e| {
        ContractError::ChainRead(format!("Failed to decode {} result: {}", S::SIGNATURE, e))
    })
}
