//! Redeem market tokens for the underlying asset.

use alloy_primitives::U256;
use compound_rs_contracts::ctoken::ICToken;
use compound_rs_contracts::{read_call, ChainClient, PreparedCall};

use super::scale_finite;
use crate::amount::Amount;
use crate::context::CallContext;
use crate::error::{ApiError, Result};
use crate::registry::SymbolForm;

/// Redeem `amount` from a market.
///
/// With an underlying symbol (`DAI`) the amount is in underlying units and
/// `redeemUnderlying` is called. With a market symbol (`cDAI`) it is a
/// number of market tokens and `redeem` is called. The two entry points
/// round differently on chain.
pub async fn redeem<C: ChainClient>(
    symbol: &str,
    amount: &Amount,
    ctx: &CallContext<'_, C>,
) -> Result<C::Pending> {
    let market = ctx.market(symbol)?;
    let requested = scale_finite(amount, market.decimals(), "redeem")?;
    let owner = ctx.caller;

    let position = match market.form {
        SymbolForm::Underlying => {
            read_call(ctx.client, market.address(), &ICToken::balanceOfUnderlyingCall { owner })
                .await?
        }
        SymbolForm::MarketToken => {
            read_call(ctx.client, market.address(), &ICToken::balanceOfCall { owner }).await?
        }
    };

    if requested > position {
        return Err(ApiError::InsufficientBalance {
            have: position,
            need: requested,
        });
    }

    let pending = match market.form {
        SymbolForm::Underlying => {
            let call = ICToken::redeemUnderlyingCall {
                redeemAmount: requested,
            };
            PreparedCall::new(market.address(), call, U256::ZERO, ctx.client)
                .with_overrides(ctx.options.overrides)
                .send()
                .await?
        }
        SymbolForm::MarketToken => {
            let call = ICToken::redeemCall {
                redeemTokens: requested,
            };
            PreparedCall::new(market.address(), call, U256::ZERO, ctx.client)
                .with_overrides(ctx.options.overrides)
                .send()
                .await?
        }
    };

    tracing::info!(market = %market.descriptor.market_symbol, %requested, form = ?market.form, "redeem submitted");
    Ok(pending)
}
