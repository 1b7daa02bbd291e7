//! Market membership and position reads.

use alloy_primitives::{Address, U256};
use compound_rs_contracts::comptroller::IComptroller;
use compound_rs_contracts::ctoken::ICToken;
use compound_rs_contracts::{read_call, ChainClient, ContractError, PreparedCall};

use super::current_borrow_balance;
use crate::context::CallContext;
use crate::error::Result;
use crate::registry::AssetDescriptor;
use crate::types::AccountLiquidity;

/// Enter markets so their supplied balances count as collateral.
///
/// Symbols may be given in either form. Every symbol must resolve before
/// anything is submitted.
pub async fn enter_markets<C: ChainClient>(
    symbols: &[&str],
    ctx: &CallContext<'_, C>,
) -> Result<C::Pending> {
    let markets = symbols
        .iter()
        .map(|symbol| ctx.market(symbol).map(|m| m.address()))
        .collect::<Result<Vec<Address>>>()?;

    let call = IComptroller::enterMarketsCall {
        cTokens: markets.clone(),
    };
    let pending = PreparedCall::new(ctx.network.comptroller(), call, U256::ZERO, ctx.client)
        .with_overrides(ctx.options.overrides)
        .send()
        .await?;

    tracing::info!(markets = ?markets, "enter markets submitted");
    Ok(pending)
}

/// Stop using a market as collateral.
pub async fn exit_market<C: ChainClient>(
    symbol: &str,
    ctx: &CallContext<'_, C>,
) -> Result<C::Pending> {
    let market = ctx.market(symbol)?;

    let call = IComptroller::exitMarketCall {
        cTokenAddress: market.address(),
    };
    let pending = PreparedCall::new(ctx.network.comptroller(), call, U256::ZERO, ctx.client)
        .with_overrides(ctx.options.overrides)
        .send()
        .await?;

    tracing::info!(market = %market.descriptor.market_symbol, "exit market submitted");
    Ok(pending)
}

/// Liquidity and shortfall of `account` across entered markets.
///
/// A non-zero comptroller error code is reported as a failed chain read.
pub async fn account_liquidity<C: ChainClient>(
    account: Address,
    ctx: &CallContext<'_, C>,
) -> Result<AccountLiquidity> {
    let result = read_call(
        ctx.client,
        ctx.network.comptroller(),
        &IComptroller::getAccountLiquidityCall { account },
    )
    .await?;

    if !result.errorCode.is_zero() {
        return Err(ContractError::ChainRead(format!(
            "getAccountLiquidity returned error code {}",
            result.errorCode
        ))
        .into());
    }

    Ok(AccountLiquidity {
        liquidity: result.liquidity,
        shortfall: result.shortfall,
    })
}

/// Markets `account` has entered.
///
/// Addresses missing from the registry are skipped.
pub async fn assets_in<C: ChainClient>(
    account: Address,
    ctx: &CallContext<'_, C>,
) -> Result<Vec<AssetDescriptor>> {
    let markets = read_call(
        ctx.client,
        ctx.network.comptroller(),
        &IComptroller::getAssetsInCall { account },
    )
    .await?;

    let deployment = ctx.network.deployment();
    Ok(markets
        .into_iter()
        .filter_map(|market| {
            let descriptor = deployment.by_market(market).cloned();
            if descriptor.is_none() {
                tracing::warn!(%market, "entered market not in registry, skipping");
            }
            descriptor
        })
        .collect())
}

/// Underlying value of `account`'s market tokens, in underlying units.
pub async fn supply_balance<C: ChainClient>(
    symbol: &str,
    account: Address,
    ctx: &CallContext<'_, C>,
) -> Result<U256> {
    let market = ctx.market(symbol)?;
    let balance = read_call(
        ctx.client,
        market.address(),
        &ICToken::balanceOfUnderlyingCall { owner: account },
    )
    .await?;
    Ok(balance)
}

/// Outstanding borrow of `account`, including accrued interest.
pub async fn borrow_balance<C: ChainClient>(
    symbol: &str,
    account: Address,
    ctx: &CallContext<'_, C>,
) -> Result<U256> {
    let market = ctx.market(symbol)?;
    current_borrow_balance(ctx, market.address(), account).await
}
