//! Allowance check and approval before a market pulls tokens.

use alloy_primitives::{Address, U256};
use compound_rs_contracts::erc20::IERC20;
use compound_rs_contracts::{
    read_call, ChainClient, MinedTransaction, PendingTransaction, PreparedCall, TxOverrides,
};

use crate::context::CallContext;
use crate::error::Result;

/// Result of [`ensure_allowance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// The existing allowance already covers the target.
    Sufficient {
        /// Allowance read from the token.
        allowance: U256,
    },
    /// An approval for exactly the target was mined.
    Approved {
        /// Approval to zero mined first when a smaller allowance was left over.
        reset: Option<MinedTransaction>,
        /// Approval of the target.
        approval: MinedTransaction,
    },
}

impl ApprovalOutcome {
    /// Number of transactions sent from the caller's account.
    pub fn transactions_sent(&self) -> u64 {
        match self {
            Self::Sufficient { .. } => 0,
            Self::Approved { reset: None, .. } => 1,
            Self::Approved { reset: Some(_), .. } => 2,
        }
    }

    /// Caller overrides for the call that follows the approvals.
    ///
    /// An explicit nonce is moved past the nonces the approvals consumed.
    pub fn final_overrides(&self, overrides: TxOverrides) -> TxOverrides {
        match overrides.nonce {
            Some(nonce) => overrides.with_nonce(nonce.saturating_add(self.transactions_sent())),
            None => overrides,
        }
    }
}

/// Make sure `spender` may pull at least `target` of `token` from the caller.
///
/// If the allowance is short, approves exactly `target` and waits for the
/// approval to be mined. A non-zero leftover allowance is first reset to
/// zero, since some tokens (USDT) revert when one non-zero allowance replaces
/// another. Approvals carry no caller overrides except the nonce: with an
/// explicit nonce they take it and the following nonces, and
/// [`ApprovalOutcome::final_overrides`] shifts the final call past them.
/// A failed or reverted approval aborts the operation.
pub async fn ensure_allowance<C: ChainClient>(
    ctx: &CallContext<'_, C>,
    token: Address,
    spender: Address,
    target: U256,
) -> Result<ApprovalOutcome> {
    let allowance = read_call(
        ctx.client,
        token,
        &IERC20::allowanceCall {
            owner: ctx.caller,
            spender,
        },
    )
    .await?;

    if allowance >= target {
        tracing::debug!(%token, %spender, %allowance, %target, "allowance sufficient");
        return Ok(ApprovalOutcome::Sufficient { allowance });
    }

    let mut nonce = ctx.options.overrides.nonce;

    let reset = if allowance.is_zero() {
        None
    } else {
        tracing::info!(%token, %spender, %allowance, "resetting allowance");
        let mined = approve(ctx, token, spender, U256::ZERO, nonce).await?;
        nonce = nonce.map(|n| n.saturating_add(1));
        Some(mined)
    };

    tracing::info!(%token, %spender, %allowance, %target, "approving");
    let approval = approve(ctx, token, spender, target, nonce).await?;

    Ok(ApprovalOutcome::Approved { reset, approval })
}

async fn approve<C: ChainClient>(
    ctx: &CallContext<'_, C>,
    token: Address,
    spender: Address,
    amount: U256,
    nonce: Option<u64>,
) -> Result<MinedTransaction> {
    let overrides = TxOverrides {
        nonce,
        ..TxOverrides::default()
    };
    let pending = PreparedCall::new(
        token,
        IERC20::approveCall { spender, amount },
        U256::ZERO,
        ctx.client,
    )
    .with_overrides(overrides)
    .send()
    .await?;

    Ok(pending.wait().await?)
}
