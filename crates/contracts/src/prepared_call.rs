//! Prepared call types for deferred transaction execution.
//!
//! A `PreparedCall` is a contract call that has been constructed but not yet
//! sent. It can be inspected, turned into a raw `TransactionRequest`, or
//! submitted through the [`ChainClient`] it was built against.

use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;

use crate::chain_client::{ChainClient, PendingTransaction, TxOverrides};
use crate::error::Result;

/// A prepared transaction that can be inspected or submitted.
///
/// # Example
///
/// ```rust,ignore
/// let call = ICErc20::mintCall { mintAmount: amount };
/// let pending = PreparedCall::new(market, call, U256::ZERO, &client).send().await?;
/// let mined = pending.wait().await?;
/// ```
pub struct PreparedCall<'a, S: SolCall, C: ChainClient> {
    to: Address,
    call: S,
    value: U256,
    overrides: TxOverrides,
    client: &'a C,
}

impl<'a, S: SolCall, C: ChainClient> PreparedCall<'a, S, C> {
    /// Create a new prepared call.
    pub fn new(to: Address, call: S, value: U256, client: &'a C) -> Self {
        Self {
            to,
            call,
            value,
            overrides: TxOverrides::default(),
            client,
        }
    }

    /// Attach caller-supplied transaction overrides.
    ///
    /// A value override only applies when the call itself attaches no value.
    pub fn with_overrides(mut self, overrides: TxOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Consumes self and returns `(address, call)`.
    pub fn prepare(self) -> (Address, S) {
        (self.to, self.call)
    }

    /// Returns the target address for this call.
    pub fn to(&self) -> Address {
        self.to
    }

    /// Returns the value (ETH) to send with this call.
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Build the transaction request without sending it.
    pub fn to_request(&self) -> TransactionRequest {
        let tx = TransactionRequest::default()
            .from(self.client.signer_address())
            .to(self.to)
            .input(self.call.abi_encode().into());
        let tx = self.overrides.apply(tx);

        if self.value.is_zero() && tx.value.is_some() {
            tx
        } else {
            tx.value(self.value)
        }
    }

    /// Submit the transaction, returning the pending handle without waiting.
    pub async fn send(self) -> Result<C::Pending> {
        let tx = self.to_request();
        let pending = self.client.write(tx).await?;
        tracing::info!(
            tx_hash = %pending.tx_hash(),
            to = %self.to,
            method = S::SIGNATURE,
            value = %self.value,
            "transaction submitted"
        );
        Ok(pending)
    }
}
