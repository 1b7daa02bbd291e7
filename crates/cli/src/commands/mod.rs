//! Command implementations.

pub mod balances;
pub mod liquidity;
pub mod markets;
pub mod transact;

pub use balances::run_balances;
pub use liquidity::run_liquidity;
pub use markets::run_markets;
pub use transact::{run_borrow, run_enter_markets, run_exit_market, run_redeem, run_repay, run_supply};

use anyhow::{Context, Result};
use compound_rs_api::{ClientConfig, CompoundClient, CompoundClientConfig};

use crate::cli::SignerArgs;

/// Create a default ClientConfig with optional API URL.
fn client_config(api_url: Option<&str>) -> ClientConfig {
    let config = ClientConfig::new();
    match api_url {
        Some(url) => config.with_api_url(url),
        None => config,
    }
}

/// Connect to the node and resolve its deployment.
async fn connect(signer: &SignerArgs, api_url: Option<&str>) -> Result<CompoundClient> {
    let config = CompoundClientConfig::new()
        .with_api_config(client_config(api_url))
        .with_rpc_url(&signer.rpc_url)
        .with_private_key(&signer.private_key);

    CompoundClient::connect(config)
        .await
        .context("Failed to connect to RPC")
}
