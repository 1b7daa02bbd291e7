//! Indexed balances command implementation.

use anyhow::Result;
use compound_rs_api::BalanceClient;

use super::client_config;
use crate::cli::{BalancesArgs, OutputFormat};
use crate::output::format_account_balances;

pub async fn run_balances(args: &BalancesArgs, format: OutputFormat, api_url: Option<&str>) -> Result<()> {
    let client = BalanceClient::with_config(client_config(api_url));
    let balances = client.get_account_balances(&args.address).await?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_account_balances(&balances));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&balances)?;
            println!("{}", json);
        }
    }

    Ok(())
}
