//! Pre-flight checked market operations.
//!
//! Each operation resolves the market, scales the amount, runs its pre-flight
//! reads, issues an approval when the market pulls an ERC-20 allowance, and
//! submits the final call. Every rejection happens before the first write.
//! Submitted transactions are never retried.

pub mod approval;
pub mod borrow;
pub mod comptroller;
pub mod redeem;
pub mod repay;
pub mod supply;

pub use approval::{ensure_allowance, ApprovalOutcome};
pub use borrow::borrow;
pub use comptroller::{
    account_liquidity, assets_in, borrow_balance, enter_markets, exit_market, supply_balance,
};
pub use redeem::redeem;
pub use repay::repay_borrow;
pub use supply::supply;

use alloy_primitives::{Address, U256};
use compound_rs_contracts::ctoken::ICToken;
use compound_rs_contracts::{read_call, ChainClient};

use crate::amount::Amount;
use crate::context::CallContext;
use crate::error::{ApiError, Result};

/// Scale an amount that must be finite.
fn scale_finite(amount: &Amount, decimals: u8, operation: &str) -> Result<U256> {
    if amount.is_max() {
        return Err(ApiError::InvalidAmount(format!(
            "{} does not accept the repay-all sentinel",
            operation
        )));
    }
    amount.to_scaled(decimals)
}

/// Current borrow balance of `account` in `market`, with interest accrued.
async fn current_borrow_balance<C: ChainClient>(
    ctx: &CallContext<'_, C>,
    market: Address,
    account: Address,
) -> Result<U256> {
    let balance = read_call(
        ctx.client,
        market,
        &ICToken::borrowBalanceCurrentCall { account },
    )
    .await?;
    Ok(balance)
}
