//! Detailed output for transactions and account liquidity.

use alloy_primitives::Address;
use colored::Colorize;
use compound_rs_api::amount::to_natural;
use compound_rs_api::{AccountLiquidity, MinedTransaction};

/// On-chain position in one entered market, in underlying units.
pub struct Position {
    pub symbol: String,
    pub market_symbol: String,
    pub supplied: String,
    pub borrowed: String,
}

/// Format gas with thousands separators.
fn format_gas(gas: u64) -> String {
    let s = gas.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

pub fn format_mined_transaction(mined: &MinedTransaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "Transaction confirmed!".green().bold()));
    output.push_str(&format!("  Tx Hash:   {:#x}\n", mined.hash));
    output.push_str(&format!(
        "  Block:     {}\n",
        mined
            .block_number
            .map_or_else(|| "-".to_string(), |b| b.to_string())
    ));
    output.push_str(&format!("  Gas Used:  {}", format_gas(mined.gas_used)));

    output
}

pub fn format_liquidity(
    account: Address,
    liquidity: &AccountLiquidity,
    positions: &[Position],
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "=".repeat(60)));
    output.push_str(&format!("{}\n", account.to_string().bold()));
    output.push_str(&format!("{}\n\n", "=".repeat(60)));

    output.push_str(&format!("{}\n", "Account Liquidity".cyan().bold()));
    output.push_str(&format!(
        "  Liquidity: ${}\n",
        to_natural(liquidity.liquidity, 18)
    ));
    if liquidity.is_at_risk() {
        output.push_str(&format!(
            "  Shortfall: {}\n\n",
            format!("${}", to_natural(liquidity.shortfall, 18)).red().bold()
        ));
    } else {
        output.push_str("  Shortfall: -\n\n");
    }

    output.push_str(&format!("{}\n", "Entered Markets".cyan().bold()));
    if positions.is_empty() {
        output.push_str("  None\n");
    }
    for position in positions {
        output.push_str(&format!(
            "  {:<8} {:<6} supplied {:<24} borrowed {}\n",
            position.market_symbol, position.symbol, position.supplied, position.borrowed
        ));
    }

    if liquidity.is_at_risk() {
        output.push('\n');
        output.push_str(&format!("{}\n", "Warnings".yellow().bold()));
        output.push_str("  Account is under-collateralized and can be liquidated\n");
    }

    output
}
