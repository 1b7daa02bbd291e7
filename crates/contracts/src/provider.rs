//! Alloy-backed [`ChainClient`] over HTTP JSON-RPC.

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, Bytes, TxHash},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};

use crate::chain_client::{ChainClient, MinedTransaction, PendingTransaction};
use crate::error::{ContractError, Result};

/// The provider type used by [`RpcChainClient`].
///
/// `ProviderBuilder::new()` installs the recommended fillers (gas, nonce,
/// chain id) and the wallet filler signs with the configured key.
pub type HttpProvider = DynProvider<Ethereum>;

/// Chain client that signs locally and talks to a node over HTTP.
#[derive(Clone)]
pub struct RpcChainClient {
    provider: HttpProvider,
    signer_address: Address,
}

impl RpcChainClient {
    /// Create a new client from an RPC URL and a hex private key.
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|_| ContractError::InvalidPrivateKey)?;
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| ContractError::RpcConnection(format!("{}", e)))?;

        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(url)
            .erased();

        Ok(Self {
            provider,
            signer_address,
        })
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("signer_address", &self.signer_address)
            .finish_non_exhaustive()
    }
}

impl ChainClient for RpcChainClient {
    type Pending = RpcPendingTransaction;

    fn signer_address(&self) -> Address {
        self.signer_address
    }

    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ContractError::RpcConnection(format!("Failed to get chain id: {}", e)))
    }

    async fn read(&self, to: Address, input: Bytes) -> Result<Bytes> {
        let tx = TransactionRequest::default()
            .from(self.signer_address)
            .to(to)
            .input(input.into());

        self.provider
            .call(tx)
            .await
            .map_err(|e| ContractError::ChainRead(format!("Call to {} failed: {}", to, e)))
    }

    async fn write(&self, tx: TransactionRequest) -> Result<RpcPendingTransaction> {
        let inner = self.provider.send_transaction(tx).await.map_err(|e| {
            ContractError::ChainWrite(format!("Failed to send transaction: {}", e))
        })?;
        Ok(RpcPendingTransaction { inner })
    }
}

/// Pending transaction submitted through an [`RpcChainClient`].
pub struct RpcPendingTransaction {
    inner: PendingTransactionBuilder<Ethereum>,
}

impl PendingTransaction for RpcPendingTransaction {
    fn tx_hash(&self) -> TxHash {
        *self.inner.tx_hash()
    }

    async fn wait(self) -> Result<MinedTransaction> {
        let hash = *self.inner.tx_hash();
        let receipt = self.inner.get_receipt().await.map_err(|e| {
            ContractError::ChainWrite(format!("Failed to get receipt for {}: {}", hash, e))
        })?;

        if !receipt.status() {
            tracing::warn!(tx_hash = %hash, "transaction reverted");
            return Err(ContractError::TransactionReverted(hash));
        }

        Ok(MinedTransaction {
            hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }
}
