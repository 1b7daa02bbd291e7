//! CLI argument definitions using clap.

use alloy_primitives::U256;
use clap::{Args, Parser, Subcommand, ValueEnum};
use compound_rs_api::{MarketAbi, TxOptions};

/// Compound CLI - Supply, borrow and inspect lending markets
#[derive(Parser, Debug)]
#[command(name = "compound")]
#[command(about = "CLI tool for Compound lending markets", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// GraphQL API URL for balance and market queries
    #[arg(long, global = true, env = "COMPOUND_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Supply an underlying asset to its market
    Supply(AmountArgs),
    /// Redeem a supplied position, by underlying or market token symbol
    Redeem(AmountArgs),
    /// Borrow an underlying asset against entered collateral
    Borrow(AmountArgs),
    /// Repay a borrow, use -1 to repay everything owed
    Repay(RepayArgs),
    /// Use markets as collateral
    #[command(name = "enter-markets")]
    EnterMarkets(EnterMarketsArgs),
    /// Stop using a market as collateral
    #[command(name = "exit-market")]
    ExitMarket(ExitMarketArgs),
    /// Show account liquidity, entered markets and on-chain positions
    Liquidity(LiquidityArgs),
    /// Query an account's indexed balances
    Balances(BalancesArgs),
    /// List indexed markets
    Markets,
}

/// Connection to a node with a signing key.
#[derive(Args, Debug)]
pub struct SignerArgs {
    /// RPC URL for the target chain (can also use ETH_RPC_URL env var)
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Private key for signing transactions (can also use PRIVATE_KEY env var)
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

/// Overrides applied to the final transaction.
#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    /// Force the market ABI instead of the registry's
    #[arg(long)]
    pub abi: Option<AbiArg>,

    /// Value to attach, in wei
    #[arg(long)]
    pub value: Option<U256>,

    /// Gas limit
    #[arg(long)]
    pub gas_limit: Option<u64>,

    /// Gas price, in wei
    #[arg(long)]
    pub gas_price: Option<u128>,

    /// Explicit nonce
    #[arg(long)]
    pub nonce: Option<u64>,
}

impl OverrideArgs {
    pub fn to_options(&self) -> TxOptions {
        let mut options = TxOptions::new();
        if let Some(abi) = self.abi {
            options = options.with_abi(abi.into());
        }
        if let Some(value) = self.value {
            options = options.with_value(value);
        }
        if let Some(gas_limit) = self.gas_limit {
            options = options.with_gas_limit(gas_limit);
        }
        if let Some(gas_price) = self.gas_price {
            options = options.with_gas_price(gas_price);
        }
        if let Some(nonce) = self.nonce {
            options = options.with_nonce(nonce);
        }
        options
    }
}

#[derive(Parser, Debug)]
pub struct AmountArgs {
    /// Asset symbol (e.g., ETH, DAI, cUSDC)
    pub asset: String,

    /// Amount in human-readable units (e.g., "100.5")
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// Treat the amount as already scaled to the asset's smallest unit
    #[arg(long)]
    pub mantissa: bool,

    #[command(flatten)]
    pub signer: SignerArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Parser, Debug)]
pub struct RepayArgs {
    #[command(flatten)]
    pub amount: AmountArgs,

    /// Repay on behalf of this borrower instead of the signer
    #[arg(long)]
    pub borrower: Option<String>,
}

#[derive(Parser, Debug)]
pub struct EnterMarketsArgs {
    /// Asset symbols to enter
    #[arg(required = true)]
    pub assets: Vec<String>,

    #[command(flatten)]
    pub signer: SignerArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Parser, Debug)]
pub struct ExitMarketArgs {
    /// Asset symbol to exit
    pub asset: String,

    #[command(flatten)]
    pub signer: SignerArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Parser, Debug)]
pub struct LiquidityArgs {
    /// Account to inspect (default: the signer)
    #[arg(long)]
    pub account: Option<String>,

    #[command(flatten)]
    pub signer: SignerArgs,
}

#[derive(Parser, Debug)]
pub struct BalancesArgs {
    /// Account address to query balances for
    pub address: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum AbiArg {
    Native,
    Token,
}

impl From<AbiArg> for MarketAbi {
    fn from(abi: AbiArg) -> Self {
        match abi {
            AbiArg::Native => MarketAbi::Native,
            AbiArg::Token => MarketAbi::Token,
        }
    }
}
