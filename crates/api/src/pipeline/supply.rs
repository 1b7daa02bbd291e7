//! Supply an asset to its market.

use alloy_primitives::U256;
use compound_rs_contracts::ctoken::{ICErc20, ICEther};
use compound_rs_contracts::{ChainClient, PreparedCall};

use super::{current_borrow_balance, ensure_allowance, scale_finite};
use crate::amount::Amount;
use crate::context::{CallContext, MarketKind};
use crate::error::{ApiError, Result};

/// Supply `amount` of `asset` and mint market tokens.
///
/// Rejected with [`ApiError::OutstandingBorrow`] while the caller borrows
/// from the same market. Token markets are approved for exactly `amount`
/// first. Returns the pending mint.
pub async fn supply<C: ChainClient>(
    asset: &str,
    amount: &Amount,
    ctx: &CallContext<'_, C>,
) -> Result<C::Pending> {
    let market = ctx.underlying_market(asset)?;
    let amount = scale_finite(amount, market.decimals(), "supply")?;

    let borrowed = current_borrow_balance(ctx, market.address(), ctx.caller).await?;
    if !borrowed.is_zero() {
        return Err(ApiError::OutstandingBorrow {
            symbol: market.symbol().to_string(),
            balance: borrowed,
        });
    }

    let pending = match market.kind {
        MarketKind::Native => {
            PreparedCall::new(market.address(), ICEther::mintCall {}, amount, ctx.client)
                .with_overrides(ctx.options.overrides)
                .send()
                .await?
        }
        MarketKind::Token { underlying } => {
            let approval = ensure_allowance(ctx, underlying, market.address(), amount).await?;
            let mint = ICErc20::mintCall { mintAmount: amount };
            PreparedCall::new(market.address(), mint, U256::ZERO, ctx.client)
                .with_overrides(approval.final_overrides(ctx.options.overrides))
                .send()
                .await?
        }
    };

    tracing::info!(asset = market.symbol(), %amount, "supply submitted");
    Ok(pending)
}
