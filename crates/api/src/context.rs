//! Per-call context for market operations.
//!
//! A [`Network`] is resolved once from the chain client's chain id and then
//! shared by every call. A [`CallContext`] is built for each call from the
//! network, the chain client, and caller options.

use alloy_primitives::{Address, U256};
use compound_rs_contracts::{ChainClient, TxOverrides};

use crate::error::{ApiError, Result};
use crate::registry::{AssetDescriptor, AssetRegistry, Deployment, MarketAbi, SymbolForm};
use crate::types::chain_name;

/// A network with a known deployment.
///
/// Holding a `Network` proves the chain id was resolved against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    deployment: Deployment,
}

impl Network {
    /// Ask the node for its chain id and look up the deployment.
    pub async fn resolve<C: ChainClient>(client: &C, registry: &AssetRegistry) -> Result<Self> {
        let chain_id = client.chain_id().await?;
        let network = Self::for_chain(registry, chain_id)?;
        tracing::debug!(chain_id, chain = %chain_name(chain_id), "network resolved");
        Ok(network)
    }

    /// Look up the deployment for a known chain id.
    pub fn for_chain(registry: &AssetRegistry, chain_id: u64) -> Result<Self> {
        registry
            .deployment(chain_id)
            .cloned()
            .map(|deployment| Self { deployment })
            .ok_or(ApiError::UnsupportedNetwork(chain_id))
    }

    /// Chain id.
    pub fn chain_id(&self) -> u64 {
        self.deployment.chain_id
    }

    /// Comptroller address.
    pub fn comptroller(&self) -> Address {
        self.deployment.comptroller
    }

    /// The deployment backing this network.
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Resolve a symbol in either form.
    pub fn resolve_asset(&self, symbol: &str) -> Result<(&AssetDescriptor, SymbolForm)> {
        self.deployment
            .resolve(symbol)
            .ok_or_else(|| ApiError::UnsupportedAsset {
                symbol: symbol.to_string(),
                chain_id: self.chain_id(),
            })
    }
}

/// Caller options for a single operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxOptions {
    /// Force the market interface instead of using the registry's.
    pub abi: Option<MarketAbi>,
    /// Pass-through transaction parameters for the final call.
    pub overrides: TxOverrides,
}

impl TxOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a market interface.
    pub fn with_abi(mut self, abi: MarketAbi) -> Self {
        self.abi = Some(abi);
        self
    }

    /// Set transaction overrides.
    pub fn with_overrides(mut self, overrides: TxOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the attached value.
    pub fn with_value(mut self, value: U256) -> Self {
        self.overrides = self.overrides.with_value(value);
        self
    }

    /// Set the gas limit.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.overrides = self.overrides.with_gas_limit(gas_limit);
        self
    }

    /// Set the gas price.
    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.overrides = self.overrides.with_gas_price(gas_price);
        self
    }

    /// Set the nonce of the first transaction the operation sends.
    ///
    /// Approvals sent ahead of the final call take this nonce and the ones
    /// after it; the final call follows them.
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.overrides = self.overrides.with_nonce(nonce);
        self
    }
}

/// How the final call moves funds into a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketKind {
    /// Funds are attached as call value.
    Native,
    /// Funds are pulled from an ERC-20 allowance.
    Token {
        /// Underlying token address.
        underlying: Address,
    },
}

/// A market resolved for one call, with the ABI override applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMarket {
    /// Registry entry.
    pub descriptor: AssetDescriptor,
    /// Form of the symbol the caller used.
    pub form: SymbolForm,
    /// Interface used for this call.
    pub kind: MarketKind,
}

impl ResolvedMarket {
    /// Market contract address.
    pub fn address(&self) -> Address {
        self.descriptor.market
    }

    /// Decimals for amounts given in the caller's symbol form.
    pub fn decimals(&self) -> u8 {
        self.descriptor.decimals_for(self.form)
    }

    /// Underlying symbol.
    pub fn symbol(&self) -> &str {
        &self.descriptor.symbol
    }
}

/// Everything an operation needs, passed explicitly.
#[derive(Debug)]
pub struct CallContext<'a, C> {
    /// The resolved network.
    pub network: &'a Network,
    /// Chain client used for reads and writes.
    pub client: &'a C,
    /// Account that signs and on whose behalf positions are read.
    pub caller: Address,
    /// Caller options.
    pub options: TxOptions,
}

impl<'a, C: ChainClient> CallContext<'a, C> {
    /// Context with default options. The caller is the client's signer.
    pub fn new(network: &'a Network, client: &'a C) -> Self {
        Self {
            network,
            client,
            caller: client.signer_address(),
            options: TxOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: TxOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve a symbol in either form and apply the ABI override.
    ///
    /// Forcing the token interface on a market without an underlying fails
    /// with [`ApiError::UnsupportedAsset`].
    pub fn market(&self, symbol: &str) -> Result<ResolvedMarket> {
        let (descriptor, form) = self.network.resolve_asset(symbol)?;

        let kind = match (self.options.abi.unwrap_or(descriptor.abi), descriptor.underlying) {
            (MarketAbi::Native, _) => MarketKind::Native,
            (MarketAbi::Token, Some(underlying)) => MarketKind::Token { underlying },
            (MarketAbi::Token, None) => return Err(self.unsupported(symbol)),
        };

        Ok(ResolvedMarket {
            descriptor: descriptor.clone(),
            form,
            kind,
        })
    }

    /// Resolve a symbol that must name the underlying asset.
    ///
    /// Supply, borrow and repay amounts are always in underlying units, so a
    /// market-token symbol is rejected.
    pub fn underlying_market(&self, symbol: &str) -> Result<ResolvedMarket> {
        let market = self.market(symbol)?;
        if market.form == SymbolForm::MarketToken {
            return Err(self.unsupported(symbol));
        }
        Ok(market)
    }

    fn unsupported(&self, symbol: &str) -> ApiError {
        ApiError::UnsupportedAsset {
            symbol: symbol.to_string(),
            chain_id: self.network.chain_id(),
        }
    }
}
