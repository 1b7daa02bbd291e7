//! Account-level types: indexed balances and on-chain liquidity.

use alloy_chains::NamedChain;
use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::chain::chain_serde;
use super::scalars::{parse_address, parse_decimal};

/// An account's position in one market, in natural units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketBalance {
    /// Market contract address.
    pub market: Address,
    /// Market token symbol (e.g., "cDAI").
    pub market_symbol: String,
    /// Underlying symbol (e.g., "DAI").
    pub underlying_symbol: String,
    /// Whether the market counts as collateral for the account.
    pub entered_market: bool,
    /// Market tokens held.
    pub market_token_balance: Decimal,
    /// Underlying value of the market tokens held.
    pub supply: Decimal,
    /// Outstanding borrow, as last stored on chain.
    pub borrow: Decimal,
    /// USD value of `supply`.
    pub supply_usd: Decimal,
    /// USD value of `borrow`.
    pub borrow_usd: Decimal,
}

impl MarketBalance {
    /// Build a balance from indexed strings.
    ///
    /// Returns `None` if the market id is not an address or a numeric field does not parse.
    pub fn from_gql(
        market_id: &str,
        market_symbol: String,
        underlying_symbol: String,
        entered_market: bool,
        market_token_balance: &str,
        stored_borrow_balance: &str,
        exchange_rate: &str,
        underlying_price_usd: &str,
    ) -> Option<Self> {
        let market_token_balance = parse_decimal(market_token_balance)?;
        let borrow = parse_decimal(stored_borrow_balance)?;
        let exchange_rate = parse_decimal(exchange_rate)?;
        let price = parse_decimal(underlying_price_usd)?;

        let supply = market_token_balance.checked_mul(exchange_rate)?;

        Some(Self {
            market: parse_address(market_id)?,
            market_symbol,
            underlying_symbol,
            entered_market,
            market_token_balance,
            supply,
            borrow,
            supply_usd: supply.checked_mul(price)?,
            borrow_usd: borrow.checked_mul(price)?,
        })
    }

    /// Returns true if the account neither supplies nor borrows here.
    pub fn is_empty(&self) -> bool {
        self.supply.is_zero() && self.borrow.is_zero()
    }
}

/// Indexed balances of one account across all markets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalances {
    /// The account.
    pub account: Address,
    /// Chain the balances were indexed from.
    #[serde(with = "chain_serde")]
    pub chain: NamedChain,
    /// Whether the account has ever borrowed.
    pub has_borrowed: bool,
    /// Per-market positions.
    pub markets: Vec<MarketBalance>,
    /// Sum of `supply_usd` over all markets.
    pub total_supply_usd: Decimal,
    /// Sum of `borrow_usd` over all markets.
    pub total_borrow_usd: Decimal,
}

impl AccountBalances {
    /// Balances of an account the indexer has never seen.
    pub fn empty(account: Address, chain: NamedChain) -> Self {
        Self::new(account, chain, false, Vec::new())
    }

    /// Build balances and compute totals.
    pub fn new(
        account: Address,
        chain: NamedChain,
        has_borrowed: bool,
        markets: Vec<MarketBalance>,
    ) -> Self {
        let total_supply_usd = markets.iter().map(|m| m.supply_usd).sum();
        let total_borrow_usd = markets.iter().map(|m| m.borrow_usd).sum();
        Self {
            account,
            chain,
            has_borrowed,
            markets,
            total_supply_usd,
            total_borrow_usd,
        }
    }

    /// Supplied minus borrowed, in USD.
    pub fn net_usd(&self) -> Decimal {
        self.total_supply_usd - self.total_borrow_usd
    }

    /// Position in a market by symbol in either form.
    pub fn market(&self, symbol: &str) -> Option<&MarketBalance> {
        self.markets.iter().find(|m| {
            m.underlying_symbol.eq_ignore_ascii_case(symbol)
                || m.market_symbol.eq_ignore_ascii_case(symbol)
        })
    }
}

/// Aggregate borrowing headroom reported by the comptroller.
///
/// Both values are USD amounts scaled by 1e18. At most one is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLiquidity {
    /// Remaining borrowing power.
    pub liquidity: U256,
    /// Amount by which the account is under-collateralized.
    pub shortfall: U256,
}

impl AccountLiquidity {
    /// Returns true if the account can be liquidated.
    pub fn is_at_risk(&self) -> bool {
        !self.shortfall.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const MARKET: &str = "0x5d3a536e4d6dbd6114cc1ead35777bab948e3643";

    fn dai_balance(tokens: &str, borrow: &str) -> MarketBalance {
        MarketBalance::from_gql(
            MARKET,
            "cDAI".to_string(),
            "DAI".to_string(),
            true,
            tokens,
            borrow,
            "0.0200",
            "1.01",
        )
        .unwrap()
    }

    #[test]
    fn test_market_balance_from_gql() {
        let balance = dai_balance("500", "2");
        assert_eq!(balance.supply, dec!(10));
        assert_eq!(balance.supply_usd, dec!(10.1));
        assert_eq!(balance.borrow_usd, dec!(2.02));
        assert!(!balance.is_empty());
    }

    #[test]
    fn test_market_balance_rejects_bad_fields() {
        let bad = MarketBalance::from_gql(
            "not-an-address",
            "cDAI".to_string(),
            "DAI".to_string(),
            false,
            "1",
            "0",
            "0.02",
            "1",
        );
        assert!(bad.is_none());
    }

    #[test]
    fn test_account_totals() {
        let balances = AccountBalances::new(
            Address::ZERO,
            NamedChain::Mainnet,
            true,
            vec![dai_balance("500", "0"), dai_balance("0", "5")],
        );
        assert_eq!(balances.total_supply_usd, dec!(10.1));
        assert_eq!(balances.total_borrow_usd, dec!(5.05));
        assert_eq!(balances.net_usd(), dec!(5.05));
        assert!(balances.market("cdai").is_some());
    }

    #[test]
    fn test_empty_account() {
        let balances = AccountBalances::empty(Address::ZERO, NamedChain::Mainnet);
        assert!(balances.markets.is_empty());
        assert!(balances.net_usd().is_zero());
    }

    #[test]
    fn test_liquidity_risk() {
        let healthy = AccountLiquidity {
            liquidity: U256::from(10),
            shortfall: U256::ZERO,
        };
        assert!(!healthy.is_at_risk());
        assert!(AccountLiquidity {
            liquidity: U256::ZERO,
            shortfall: U256::from(1),
        }
        .is_at_risk());
    }
}
