//! Borrow an asset against entered collateral.

use alloy_primitives::U256;
use compound_rs_contracts::ctoken::ICToken;
use compound_rs_contracts::{ChainClient, PreparedCall};

use super::{account_liquidity, scale_finite};
use crate::amount::Amount;
use crate::context::CallContext;
use crate::error::{ApiError, Result};

/// Borrow `amount` of `asset`.
///
/// Rejected with [`ApiError::LiquidationRisk`] whenever the account has a
/// shortfall, and with [`ApiError::InsufficientCollateral`] when the
/// comptroller's liquidity figure is below the scaled amount.
pub async fn borrow<C: ChainClient>(
    asset: &str,
    amount: &Amount,
    ctx: &CallContext<'_, C>,
) -> Result<C::Pending> {
    let market = ctx.underlying_market(asset)?;
    let amount = scale_finite(amount, market.decimals(), "borrow")?;

    let liquidity = account_liquidity(ctx.caller, ctx).await?;
    if liquidity.is_at_risk() {
        return Err(ApiError::LiquidationRisk {
            shortfall: liquidity.shortfall,
        });
    }
    // Liquidity is a USD figure; the comparison is against the raw amount.
    if liquidity.liquidity < amount {
        return Err(ApiError::InsufficientCollateral {
            liquidity: liquidity.liquidity,
            requested: amount,
        });
    }

    let call = ICToken::borrowCall {
        borrowAmount: amount,
    };
    let pending = PreparedCall::new(market.address(), call, U256::ZERO, ctx.client)
        .with_overrides(ctx.options.overrides)
        .send()
        .await?;

    tracing::info!(asset = market.symbol(), %amount, "borrow submitted");
    Ok(pending)
}
