//! Table formatting for balances and market lists.

use compound_rs_api::{AccountBalances, MarketSummary};
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Collateral")]
    collateral: String,
    #[tabled(rename = "Supplied")]
    supplied: String,
    #[tabled(rename = "Borrowed")]
    borrowed: String,
    #[tabled(rename = "Supplied (USD)")]
    supply_usd: String,
    #[tabled(rename = "Borrowed (USD)")]
    borrow_usd: String,
}

#[derive(Tabled)]
struct MarketRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Price (USD)")]
    price: String,
    #[tabled(rename = "Supply APR")]
    supply_rate: String,
    #[tabled(rename = "Borrow APR")]
    borrow_rate: String,
    #[tabled(rename = "Collateral Factor")]
    collateral_factor: String,
}

fn truncate_address(addr: &str) -> String {
    if addr.len() > 10 {
        format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
    } else {
        addr.to_string()
    }
}

fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", rate * Decimal::ONE_HUNDRED)
}

fn format_usd(value: Decimal) -> String {
    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let abs = value.abs();

    if abs >= million {
        format!("{}${:.2}M", sign, abs / million)
    } else if abs >= thousand {
        format!("{}${:.2}K", sign, abs / thousand)
    } else {
        format!("{}${:.2}", sign, abs)
    }
}

fn format_amount(value: Decimal) -> String {
    if value.is_zero() {
        "-".to_string()
    } else {
        value.round_dp(6).normalize().to_string()
    }
}

pub fn format_account_balances(balances: &AccountBalances) -> String {
    if balances.markets.is_empty() {
        return "No balances found.".to_string();
    }

    let rows: Vec<BalanceRow> = balances
        .markets
        .iter()
        .map(|m| BalanceRow {
            market: m.market_symbol.clone(),
            asset: m.underlying_symbol.clone(),
            collateral: if m.entered_market { "Yes" } else { "No" }.to_string(),
            supplied: format_amount(m.supply),
            borrowed: format_amount(m.borrow),
            supply_usd: format_usd(m.supply_usd),
            borrow_usd: format_usd(m.borrow_usd),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    format!(
        "{}\nTotal supplied: {}  Total borrowed: {}  Net: {}",
        table,
        format_usd(balances.total_supply_usd),
        format_usd(balances.total_borrow_usd),
        format_usd(balances.net_usd()),
    )
}

pub fn format_markets_table(markets: &[MarketSummary]) -> String {
    if markets.is_empty() {
        return "No markets found.".to_string();
    }

    let rows: Vec<MarketRow> = markets
        .iter()
        .map(|m| MarketRow {
            market: m.market_symbol.clone(),
            asset: m.underlying_symbol.clone(),
            address: truncate_address(&m.market.to_string()),
            price: format_usd(m.price_usd),
            supply_rate: format_percent(m.supply_rate),
            borrow_rate: format_percent(m.borrow_rate),
            collateral_factor: format_percent(m.collateral_factor),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    table.to_string()
}
