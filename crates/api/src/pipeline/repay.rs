//! Repay a borrow, for the caller or on behalf of another account.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use compound_rs_contracts::ctoken::{ICErc20, ICEther};
use compound_rs_contracts::{ChainClient, PreparedCall};

use super::{current_borrow_balance, ensure_allowance};
use crate::amount::Amount;
use crate::context::{CallContext, MarketKind};
use crate::error::{ApiError, Result};

/// Repay `amount` of `asset`.
///
/// With `borrower` set the debt of that account is repaid through
/// `repayBorrowBehalf`. [`Amount::Max`] repays everything: the on-chain
/// argument is `U256::MAX` and the approval covers the current borrow
/// balance plus one to absorb interest accrued before mining. Native
/// markets take the repayment as value and cannot repay with `Max`.
pub async fn repay_borrow<C: ChainClient>(
    asset: &str,
    amount: &Amount,
    borrower: Option<&str>,
    ctx: &CallContext<'_, C>,
) -> Result<C::Pending> {
    let market = ctx.underlying_market(asset)?;
    let borrower = borrower.map(parse_borrower).transpose()?;

    let (argument, approval_target) = if amount.is_max() {
        if market.kind == MarketKind::Native {
            return Err(ApiError::InvalidAmount(format!(
                "cannot repay the full {} borrow with an unbounded value",
                market.symbol()
            )));
        }
        let account = borrower.unwrap_or(ctx.caller);
        let owed = current_borrow_balance(ctx, market.address(), account).await?;
        (U256::MAX, owed.saturating_add(U256::from(1)))
    } else {
        let scaled = amount.to_scaled(market.decimals())?;
        (scaled, scaled)
    };

    let pending = match (market.kind, borrower) {
        (MarketKind::Token { underlying }, borrower) => {
            let approval =
                ensure_allowance(ctx, underlying, market.address(), approval_target).await?;
            let overrides = approval.final_overrides(ctx.options.overrides);
            match borrower {
                Some(borrower) => {
                    let call = ICErc20::repayBorrowBehalfCall {
                        borrower,
                        repayAmount: argument,
                    };
                    PreparedCall::new(market.address(), call, U256::ZERO, ctx.client)
                        .with_overrides(overrides)
                        .send()
                        .await?
                }
                None => {
                    let call = ICErc20::repayBorrowCall {
                        repayAmount: argument,
                    };
                    PreparedCall::new(market.address(), call, U256::ZERO, ctx.client)
                        .with_overrides(overrides)
                        .send()
                        .await?
                }
            }
        }
        (MarketKind::Native, Some(borrower)) => {
            let call = ICEther::repayBorrowBehalfCall { borrower };
            PreparedCall::new(market.address(), call, argument, ctx.client)
                .with_overrides(ctx.options.overrides)
                .send()
                .await?
        }
        (MarketKind::Native, None) => {
            PreparedCall::new(market.address(), ICEther::repayBorrowCall {}, argument, ctx.client)
                .with_overrides(ctx.options.overrides)
                .send()
                .await?
        }
    };

    tracing::info!(
        asset = market.symbol(),
        amount = %argument,
        borrower = ?borrower,
        "repay submitted"
    );
    Ok(pending)
}

fn parse_borrower(input: &str) -> Result<Address> {
    Address::from_str(input.trim()).map_err(|_| ApiError::InvalidAddress(input.to_string()))
}
