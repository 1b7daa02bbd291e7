//! Repay pipeline tests.


use alloy::primitives::{address, Address, U256};
use alloy::sol_types::SolCall;
use compound_rs_api::{pipeline, Amount, ApiError, CallContext, TxOptions};
use compound_rs_contracts::ctoken::{ICErc20, ICEther, ICToken};
use compound_rs_contracts::erc20::IERC20;
use mock_chain::{asset, mainnet, uint, MockChainClient, CALLER};

const BORROWER: Address = address!("b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0");

#[tokio::test]
async fn test_repay_all_sends_max_and_approves_balance_plus_one() {
    let network = mainnet();
    let client = MockChainClient::mainnet();
    let dai = asset("DAI");
    let token = dai.underlying.unwrap();
    client
        .on_read::<ICToken::borrowBalanceCurrentCall>(dai.market, uint(1_000u64))
        .on_read::<IERC20::allowanceCall>(token, uint(0u64));

    let ctx = CallContext::new(&network, &client);
    let amount: Amount = "-1".parse().unwrap();
    pipeline::repay_borrow("DAI", &amount, None, &ctx)
        .await
        .unwrap();

    let approvals = client.writes_of::<IERC20::approveCall>();
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0].1.amount, U256::from(1_001u64));

    let repays = client.writes_of::<ICErc20::repayBorrowCall>();
    assert_eq!(repays.len(), 1);
    assert_eq!(repays[0].1.repayAmount, U256::MAX);

    let balance_reads = client.reads_of::<ICToken::borrowBalanceCurrentCall>();
    assert_eq!(balance_reads[0].account, CALLER);
}

#[tokio::test]
async fn test_repay_all_skips_approval_when_allowance_covers_balance() {
    let network = mainnet();
    let client = MockChainClient::mainnet();
    let usdc = asset("USDC");
    client
        .on_read::<ICToken::borrowBalanceCurrentCall>(usdc.market, uint(1_000u64))
        .on_read::<IERC20::allowanceCall>(usdc.underlying.unwrap(), uint(1_001u64));

    let ctx = CallContext::new(&network, &client);
    pipeline::repay_borrow("USDC", &Amount::Max, None, &ctx)
        .await
        .unwrap();

    let writes = client.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].selector(), ICErc20::repayBorrowCall::SELECTOR);
}

#[tokio::test]
async fn test_repay_literal_amount_approves_that_amount() {
    let network = mainnet();
    let client = MockChainClient::mainnet();
    let usdc = asset("USDC");
    client.on_read::<IERC20::allowanceCall>(usdc.underlying.unwrap(), uint(0u64));

    let ctx = CallContext::new(&network, &client);
    pipeline::repay_borrow("USDC", &Amount::natural("12.5"), None, &ctx)
        .await
        .unwrap();

    // No balance lookup for a literal amount.
    assert!(client
        .reads_of::<ICToken::borrowBalanceCurrentCall>()
        .is_empty());
    assert_eq!(
        client.writes_of::<IERC20::approveCall>()[0].1.amount,
        U256::from(12_500_000u64)
    );
    assert_eq!(
        client.writes_of::<ICErc20::repayBorrowCall>()[0].1.repayAmount,
        U256::from(12_500_000u64)
    );
}

#[tokio::test]
async fn test_repay_with_explicit_nonce_orders_approval_first() {
    let network = mainnet();
    let client = MockChainClient::mainnet();
    let usdc = asset("USDC");
    client.on_read::<IERC20::allowanceCall>(usdc.underlying.unwrap(), uint(0u64));

    let ctx = CallContext::new(&network, &client).with_options(TxOptions::new().with_nonce(11));
    pipeline::repay_borrow("USDC", &Amount::natural("5"), None, &ctx)
        .await
        .unwrap();

    let writes = client.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].selector(), IERC20::approveCall::SELECTOR);
    assert_eq!(writes[0].nonce, Some(11));
    assert_eq!(writes[1].selector(), ICErc20::repayBorrowCall::SELECTOR);
    assert_eq!(writes[1].nonce, Some(12));
}

#[tokio::test]
async fn test_repay_on_behalf_reads_borrower_balance() {
    let network = mainnet();
    let client = MockChainClient::mainnet();
    let dai = asset("DAI");
    client
        .on_read::<ICToken::borrowBalanceCurrentCall>(dai.market, uint(77u64))
        .on_read::<IERC20::allowanceCall>(dai.underlying.unwrap(), uint(0u64));

    let ctx = CallContext::new(&network, &client);
    let borrower = BORROWER.to_string();
    pipeline::repay_borrow("DAI", &Amount::Max, Some(&borrower), &ctx)
        .await
        .unwrap();

    let balance_reads = client.reads_of::<ICToken::borrowBalanceCurrentCall>();
    assert_eq!(balance_reads[0].account, BORROWER);

    // Allowance is still the caller's own.
    assert_eq!(client.reads_of::<IERC20::allowanceCall>()[0].owner, CALLER);
    assert_eq!(
        client.writes_of::<IERC20::approveCall>()[0].1.amount,
        U256::from(78u64)
    );

    let repays = client.writes_of::<ICErc20::repayBorrowBehalfCall>();
    assert_eq!(repays.len(), 1);
    assert_eq!(repays[0].1.borrower, BORROWER);
    assert_eq!(repays[0].1.repayAmount, U256::MAX);
}

#[tokio::test]
async fn test_repay_with_invalid_borrower_is_rejected_without_touching_chain() {
    let network = mainnet();
    let client = MockChainClient::mainnet();

    let ctx = CallContext::new(&network, &client);
    let result =
        pipeline::repay_borrow("DAI", &Amount::natural("1"), Some("not-an-address"), &ctx).await;

    assert!(matches!(result, Err(ApiError::InvalidAddress(_))));
    assert!(client.events().is_empty());
}

#[tokio::test]
async fn test_native_repay_attaches_value() {
    let network = mainnet();
    let client = MockChainClient::mainnet();
    let eth = asset("ETH");

    let ctx = CallContext::new(&network, &client);
    pipeline::repay_borrow("ETH", &Amount::natural("0.25"), None, &ctx)
        .await
        .unwrap();

    let writes = client.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].to, eth.market);
    assert_eq!(writes[0].selector(), ICEther::repayBorrowCall::SELECTOR);
    assert_eq!(writes[0].value, U256::from(250_000_000_000_000_000u64));
    assert!(client.reads_of::<IERC20::allowanceCall>().is_empty());
}

#[tokio::test]
async fn test_native_repay_on_behalf() {
    let network = mainnet();
    let client = MockChainClient::mainnet();

    let ctx = CallContext::new(&network, &client);
    let borrower = BORROWER.to_string();
    pipeline::repay_borrow("ETH", &Amount::natural("1"), Some(&borrower), &ctx)
        .await
        .unwrap();

    let repays = client.writes_of::<ICEther::repayBorrowBehalfCall>();
    assert_eq!(repays.len(), 1);
    assert_eq!(repays[0].1.borrower, BORROWER);
}

#[tokio::test]
async fn test_native_repay_all_is_rejected() {
    let network = mainnet();
    let client = MockChainClient::mainnet();

    let ctx = CallContext::new(&network, &client);
    let result = pipeline::repay_borrow("ETH", &Amount::Max, None, &ctx).await;

    assert!(matches!(result, Err(ApiError::InvalidAmount(_))));
    assert!(client.writes().is_empty());
}
