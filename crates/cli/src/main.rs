//! Compound CLI - Supply, borrow and inspect lending markets.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use commands::{
    run_balances, run_borrow, run_enter_markets, run_exit_market, run_liquidity, run_markets,
    run_redeem, run_repay, run_supply,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let api_url = cli.api_url.as_deref();

    match &cli.command {
        Commands::Supply(args) => run_supply(args, cli.format, api_url).await?,
        Commands::Redeem(args) => run_redeem(args, cli.format, api_url).await?,
        Commands::Borrow(args) => run_borrow(args, cli.format, api_url).await?,
        Commands::Repay(args) => run_repay(args, cli.format, api_url).await?,
        Commands::EnterMarkets(args) => run_enter_markets(args, cli.format, api_url).await?,
        Commands::ExitMarket(args) => run_exit_market(args, cli.format, api_url).await?,
        Commands::Liquidity(args) => run_liquidity(args, cli.format, api_url).await?,
        Commands::Balances(args) => run_balances(args, cli.format, api_url).await?,
        Commands::Markets => run_markets(cli.format, api_url).await?,
    }

    Ok(())
}
