//! Output formatting for CLI results.

pub mod detail;
pub mod table;

pub use detail::{format_liquidity, format_mined_transaction, Position};
pub use table::{format_account_balances, format_markets_table};
