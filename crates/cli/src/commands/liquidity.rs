//! Account liquidity command implementation.

use alloy_primitives::Address;
use anyhow::{Context, Result};
use compound_rs_api::amount::to_natural;

use super::connect;
use crate::cli::{LiquidityArgs, OutputFormat};
use crate::output::{format_liquidity, Position};

pub async fn run_liquidity(args: &LiquidityArgs, format: OutputFormat, api_url: Option<&str>) -> Result<()> {
    let account = args
        .account
        .as_deref()
        .map(|a| a.parse::<Address>().context("Invalid account address"))
        .transpose()?;

    let client = connect(&args.signer, api_url).await?;
    let operations = client.markets()?;
    let account = account.unwrap_or_else(|| operations.signer_address());

    let liquidity = operations.account_liquidity(Some(account)).await?;
    let entered = operations.assets_in(Some(account)).await?;

    let mut positions = Vec::with_capacity(entered.len());
    for asset in &entered {
        let supplied = operations.supply_balance(&asset.symbol, Some(account)).await?;
        let borrowed = operations.borrow_balance(&asset.symbol, Some(account)).await?;
        positions.push(Position {
            symbol: asset.symbol.clone(),
            market_symbol: asset.market_symbol.clone(),
            supplied: to_natural(supplied, asset.decimals),
            borrowed: to_natural(borrowed, asset.decimals),
        });
    }

    match format {
        OutputFormat::Table => {
            println!("{}", format_liquidity(account, &liquidity, &positions));
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "account": account.to_string(),
                "liquidity": to_natural(liquidity.liquidity, 18),
                "shortfall": to_natural(liquidity.shortfall, 18),
                "markets": positions
                    .iter()
                    .map(|p| serde_json::json!({
                        "symbol": p.symbol,
                        "market_symbol": p.market_symbol,
                        "supplied": p.supplied,
                        "borrowed": p.borrowed,
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
