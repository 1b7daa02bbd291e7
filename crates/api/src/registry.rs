//! Static market deployments per network.
//!
//! The registry maps `(chain id, symbol)` to an [`AssetDescriptor`]. Symbols
//! come in two forms: the underlying asset (`DAI`) and the market token
//! (`cDAI`). Lookups are pure and never touch the network.

use std::collections::HashMap;

use alloy_chains::NamedChain;
use alloy_primitives::{address, Address};
use serde::Serialize;

/// Prefix that turns an underlying symbol into its market-token symbol.
pub const MARKET_PREFIX: &str = "c";

/// Decimals of every market token.
pub const MARKET_TOKEN_DECIMALS: u8 = 8;

/// Which market contract interface applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketAbi {
    /// Market for the chain's native currency. Value is attached to calls.
    Native,
    /// Market for an ERC-20 underlying. Requires an allowance.
    Token,
}

/// The form in which a symbol named a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolForm {
    /// The underlying asset symbol, e.g. `DAI`.
    Underlying,
    /// The market token symbol, e.g. `cDAI`.
    MarketToken,
}

/// Everything needed to talk to one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetDescriptor {
    /// Underlying asset symbol.
    pub symbol: String,
    /// Market token symbol.
    pub market_symbol: String,
    /// Market contract address.
    pub market: Address,
    /// Underlying token address. `None` for native markets.
    pub underlying: Option<Address>,
    /// Decimals of the underlying asset.
    pub decimals: u8,
    /// Decimals of the market token.
    pub market_decimals: u8,
    /// Interface of the market contract.
    pub abi: MarketAbi,
}

impl AssetDescriptor {
    /// Descriptor for a native-currency market.
    pub fn native(symbol: impl Into<String>, market: Address, decimals: u8) -> Self {
        let symbol = symbol.into();
        Self {
            market_symbol: format!("{}{}", MARKET_PREFIX, symbol),
            symbol,
            market,
            underlying: None,
            decimals,
            market_decimals: MARKET_TOKEN_DECIMALS,
            abi: MarketAbi::Native,
        }
    }

    /// Descriptor for an ERC-20 market.
    pub fn token(
        symbol: impl Into<String>,
        market: Address,
        underlying: Address,
        decimals: u8,
    ) -> Self {
        let symbol = symbol.into();
        Self {
            market_symbol: format!("{}{}", MARKET_PREFIX, symbol),
            symbol,
            market,
            underlying: Some(underlying),
            decimals,
            market_decimals: MARKET_TOKEN_DECIMALS,
            abi: MarketAbi::Token,
        }
    }

    /// Decimals used to scale an amount given in `form`.
    pub fn decimals_for(&self, form: SymbolForm) -> u8 {
        match form {
            SymbolForm::Underlying => self.decimals,
            SymbolForm::MarketToken => self.market_decimals,
        }
    }

    /// Returns true for native-currency markets.
    pub fn is_native(&self) -> bool {
        self.abi == MarketAbi::Native
    }
}

/// Protocol deployment on one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Chain id.
    pub chain_id: u64,
    /// Comptroller contract address.
    pub comptroller: Address,
    markets: Vec<AssetDescriptor>,
}

impl Deployment {
    /// Empty deployment.
    pub fn new(chain_id: u64, comptroller: Address) -> Self {
        Self {
            chain_id,
            comptroller,
            markets: Vec::new(),
        }
    }

    /// Add a market. A market with the same underlying symbol is replaced.
    pub fn with_market(mut self, descriptor: AssetDescriptor) -> Self {
        self.markets.retain(|m| m.symbol != descriptor.symbol);
        self.markets.push(descriptor);
        self
    }

    /// Markets in this deployment.
    pub fn markets(&self) -> &[AssetDescriptor] {
        &self.markets
    }

    /// Find a market by symbol in either form. Matching ignores ASCII case.
    pub fn resolve(&self, symbol: &str) -> Option<(&AssetDescriptor, SymbolForm)> {
        let symbol = symbol.trim();
        self.markets
            .iter()
            .find(|m| m.symbol.eq_ignore_ascii_case(symbol))
            .map(|m| (m, SymbolForm::Underlying))
            .or_else(|| {
                self.markets
                    .iter()
                    .find(|m| m.market_symbol.eq_ignore_ascii_case(symbol))
                    .map(|m| (m, SymbolForm::MarketToken))
            })
    }

    /// Find a market by its contract address.
    pub fn by_market(&self, market: Address) -> Option<&AssetDescriptor> {
        self.markets.iter().find(|m| m.market == market)
    }

    /// The Ethereum mainnet deployment.
    pub fn mainnet() -> Self {
        Self::new(
            NamedChain::Mainnet.into(),
            address!("3d9819210A31b4961b30EF54bE2aeD79B9c9Cd3B"),
        )
        .with_market(AssetDescriptor::native(
            "ETH",
            address!("4Ddc2D193948926D02f9B1fE9e1daa0718270ED5"),
            18,
        ))
        .with_market(AssetDescriptor::token(
            "DAI",
            address!("5d3a536E4D6DbD6114cc1Ead35777bAB948E3643"),
            address!("6B175474E89094C44Da98b954EedeAC495271d0F"),
            18,
        ))
        .with_market(AssetDescriptor::token(
            "USDC",
            address!("39AA39c021dfbaE8faC545936693aC917d5E7563"),
            address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            6,
        ))
        .with_market(AssetDescriptor::token(
            "USDT",
            address!("f650C3d88D12dB855b8bf7D11Be6C55A4e07dCC9"),
            address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
            6,
        ))
        .with_market(AssetDescriptor::token(
            "WBTC",
            address!("ccF4429DB6322D5C611ee964527D42E5d685DD6a"),
            address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
            8,
        ))
        .with_market(AssetDescriptor::token(
            "COMP",
            address!("70e36f6BF80a52b3B46b3aF8e106CC0ed743E8e4"),
            address!("c00e94Cb662C3520282E6f5717214004A7f26888"),
            18,
        ))
        .with_market(AssetDescriptor::token(
            "UNI",
            address!("35A18000230DA775CAc24873d00Ff85BccdeD550"),
            address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
            18,
        ))
        .with_market(AssetDescriptor::token(
            "BAT",
            address!("6C8c6b02E7b2BE14d4fA6022Dfd6d75921D90E4E"),
            address!("0D8775F648430679A709E98d2b0Cb6250d2887EF"),
            18,
        ))
        .with_market(AssetDescriptor::token(
            "ZRX",
            address!("B3319f5D18Bc0D84dD1b4825Dcde5d5f7266d407"),
            address!("E41d2489571d322189246DaFA5ebDe1F4699F498"),
            18,
        ))
        .with_market(AssetDescriptor::token(
            "LINK",
            address!("FAce851a4921ce59e912d19329929CE6da6EB0c7"),
            address!("514910771AF9Ca656af840dff83E8264EcF986CA"),
            18,
        ))
    }
}

/// Known deployments, keyed by chain id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRegistry {
    deployments: HashMap<u64, Deployment>,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::empty().with_deployment(Deployment::mainnet())
    }
}

impl AssetRegistry {
    /// Registry with the built-in deployments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with no deployments.
    pub fn empty() -> Self {
        Self {
            deployments: HashMap::new(),
        }
    }

    /// Register a deployment, replacing any existing one for the same chain.
    pub fn with_deployment(mut self, deployment: Deployment) -> Self {
        self.deployments.insert(deployment.chain_id, deployment);
        self
    }

    /// Deployment for a chain.
    pub fn deployment(&self, chain_id: u64) -> Option<&Deployment> {
        self.deployments.get(&chain_id)
    }

    /// Chain ids with a deployment, ascending.
    pub fn chain_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.deployments.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolve a symbol in either form on a chain.
    pub fn resolve(&self, chain_id: u64, symbol: &str) -> Option<(&AssetDescriptor, SymbolForm)> {
        let resolved = self.deployment(chain_id)?.resolve(symbol);
        tracing::debug!(chain_id, symbol, found = resolved.is_some(), "resolve asset");
        resolved
    }
}
