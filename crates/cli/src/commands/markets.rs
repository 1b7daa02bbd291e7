//! Market listing command implementation.

use anyhow::Result;
use compound_rs_api::BalanceClient;

use super::client_config;
use crate::cli::OutputFormat;
use crate::output::format_markets_table;

pub async fn run_markets(format: OutputFormat, api_url: Option<&str>) -> Result<()> {
    let client = BalanceClient::with_config(client_config(api_url));
    let mut markets = client.get_markets().await?;
    markets.sort_by(|a, b| a.market_symbol.cmp(&b.market_symbol));

    match format {
        OutputFormat::Table => {
            println!("{}", format_markets_table(&markets));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&markets)?;
            println!("{}", json);
        }
    }

    Ok(())
}
