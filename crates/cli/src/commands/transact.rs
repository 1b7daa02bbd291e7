//! Transaction commands: supply, redeem, borrow, repay and market membership.

use anyhow::{Context, Result};
use compound_rs_api::{Amount, CompoundClient, MarketOperations, PendingTransaction, RpcChainClient};

use super::connect;
use crate::cli::{
    AmountArgs, EnterMarketsArgs, ExitMarketArgs, OutputFormat, OverrideArgs, RepayArgs,
};
use crate::output::format_mined_transaction;

/// Wait for a submitted transaction and print its receipt.
async fn confirm<P: PendingTransaction>(
    pending: P,
    action: &str,
    format: OutputFormat,
) -> Result<()> {
    let hash = pending.tx_hash();
    if matches!(format, OutputFormat::Table) {
        println!("Transaction submitted: {} ({:#x})", action, hash);
        println!("Waiting for confirmation...\n");
    }

    let mined = pending
        .wait()
        .await
        .with_context(|| format!("{} failed", action))?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_mined_transaction(&mined));
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "action": action,
                "hash": format!("{:#x}", mined.hash),
                "block_number": mined.block_number,
                "gas_used": mined.gas_used,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

fn parse_amount(args: &AmountArgs) -> Result<Amount> {
    Amount::parse(&args.amount, args.mantissa)
        .with_context(|| format!("Invalid amount: {}", args.amount))
}

fn operations<'a>(
    client: &'a CompoundClient,
    overrides: &OverrideArgs,
) -> Result<MarketOperations<'a, RpcChainClient>> {
    Ok(client.markets()?.with_options(overrides.to_options()))
}

pub async fn run_supply(args: &AmountArgs, format: OutputFormat, api_url: Option<&str>) -> Result<()> {
    let amount = parse_amount(args)?;
    let client = connect(&args.signer, api_url).await?;
    let pending = operations(&client, &args.overrides)?
        .supply(&args.asset, &amount)
        .await?;

    confirm(pending, &format!("supply {} {}", args.amount, args.asset), format).await
}

pub async fn run_redeem(args: &AmountArgs, format: OutputFormat, api_url: Option<&str>) -> Result<()> {
    let amount = parse_amount(args)?;
    let client = connect(&args.signer, api_url).await?;
    let pending = operations(&client, &args.overrides)?
        .redeem(&args.asset, &amount)
        .await?;

    confirm(pending, &format!("redeem {} {}", args.amount, args.asset), format).await
}

pub async fn run_borrow(args: &AmountArgs, format: OutputFormat, api_url: Option<&str>) -> Result<()> {
    let amount = parse_amount(args)?;
    let client = connect(&args.signer, api_url).await?;
    let pending = operations(&client, &args.overrides)?
        .borrow(&args.asset, &amount)
        .await?;

    confirm(pending, &format!("borrow {} {}", args.amount, args.asset), format).await
}

pub async fn run_repay(args: &RepayArgs, format: OutputFormat, api_url: Option<&str>) -> Result<()> {
    let inner = &args.amount;
    let amount = parse_amount(inner)?;
    let client = connect(&inner.signer, api_url).await?;
    let pending = operations(&client, &inner.overrides)?
        .repay_borrow(&inner.asset, &amount, args.borrower.as_deref())
        .await?;

    let action = if amount.is_max() {
        format!("repay all {}", inner.asset)
    } else {
        format!("repay {} {}", inner.amount, inner.asset)
    };
    confirm(pending, &action, format).await
}

pub async fn run_enter_markets(
    args: &EnterMarketsArgs,
    format: OutputFormat,
    api_url: Option<&str>,
) -> Result<()> {
    let client = connect(&args.signer, api_url).await?;
    let symbols: Vec<&str> = args.assets.iter().map(String::as_str).collect();
    let pending = operations(&client, &args.overrides)?
        .enter_markets(&symbols)
        .await?;

    confirm(pending, &format!("enter {}", symbols.join(", ")), format).await
}

pub async fn run_exit_market(
    args: &ExitMarketArgs,
    format: OutputFormat,
    api_url: Option<&str>,
) -> Result<()> {
    let client = connect(&args.signer, api_url).await?;
    let pending = operations(&client, &args.overrides)?
        .exit_market(&args.asset)
        .await?;

    confirm(pending, &format!("exit {}", args.asset), format).await
}
