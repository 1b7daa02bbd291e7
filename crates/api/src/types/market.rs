//! Indexed market state.

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::scalars::{parse_address, parse_decimal};

/// Snapshot of one market as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    /// Market contract address.
    pub market: Address,
    /// Market token symbol.
    pub market_symbol: String,
    /// Underlying symbol.
    pub underlying_symbol: String,
    /// Underlying decimals.
    pub underlying_decimals: u8,
    /// Underlying per market token.
    pub exchange_rate: Decimal,
    /// Underlying price in USD.
    pub price_usd: Decimal,
    /// Supply rate per year.
    pub supply_rate: Decimal,
    /// Borrow rate per year.
    pub borrow_rate: Decimal,
    /// Fraction of supplied value usable as collateral.
    pub collateral_factor: Decimal,
}

impl MarketSummary {
    /// Convert GraphQL response fields into a [`MarketSummary`].
    ///
    /// Returns `None` if the id is not an address or a decimal field does not parse.
    pub fn from_gql(
        id: &str,
        market_symbol: String,
        underlying_symbol: String,
        underlying_decimals: i64,
        rates: GqlMarketRates<'_>,
    ) -> Option<Self> {
        Some(Self {
            market: parse_address(id)?,
            market_symbol,
            underlying_symbol,
            underlying_decimals: u8::try_from(underlying_decimals).ok()?,
            exchange_rate: parse_decimal(rates.exchange_rate)?,
            price_usd: parse_decimal(rates.price_usd)?,
            supply_rate: parse_decimal(rates.supply_rate)?,
            borrow_rate: parse_decimal(rates.borrow_rate)?,
            collateral_factor: parse_decimal(rates.collateral_factor)?,
        })
    }
}

/// Decimal fields of a market as returned by the indexer.
#[derive(Debug, Clone, Copy)]
pub struct GqlMarketRates<'a> {
    pub exchange_rate: &'a str,
    pub price_usd: &'a str,
    pub supply_rate: &'a str,
    pub borrow_rate: &'a str,
    pub collateral_factor: &'a str,
}
