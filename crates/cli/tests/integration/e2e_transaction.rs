//! End-to-end transaction tests against an Anvil fork.
//!
//! These tests are ignored by default because they require a mainnet fork
//! listening on `ANVIL_URL` (default `http://127.0.0.1:8545`), e.g.
//! `anvil --fork-url $ETH_RPC_URL`.

use predicates::prelude::*;

use super::helpers::compound_cmd;

// Anvil's default account 0 private key
const TEST_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn anvil_url() -> String {
    std::env::var("ANVIL_URL").unwrap_or_else(|_| "http://127.0.0.1:8545".to_string())
}

#[test]
#[ignore]
fn test_supply_eth_then_redeem() {
    let rpc_url = anvil_url();

    compound_cmd()
        .args(["supply", "ETH", "1", "--rpc-url", &rpc_url, "--private-key", TEST_PRIVATE_KEY])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transaction confirmed!"));

    compound_cmd()
        .args(["redeem", "ETH", "0.5", "--rpc-url", &rpc_url, "--private-key", TEST_PRIVATE_KEY])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transaction confirmed!"));
}

#[test]
#[ignore]
fn test_liquidity_after_entering_market() {
    let rpc_url = anvil_url();

    compound_cmd()
        .args(["supply", "ETH", "2", "--rpc-url", &rpc_url, "--private-key", TEST_PRIVATE_KEY])
        .assert()
        .success();

    compound_cmd()
        .args(["enter-markets", "ETH", "--rpc-url", &rpc_url, "--private-key", TEST_PRIVATE_KEY])
        .assert()
        .success();

    compound_cmd()
        .args(["liquidity", "--rpc-url", &rpc_url, "--private-key", TEST_PRIVATE_KEY])
        .assert()
        .success()
        .stdout(predicate::str::contains("cETH"))
        .stdout(predicate::str::contains("Shortfall: -"));
}

#[test]
#[ignore]
fn test_redeem_more_than_supplied_fails_before_sending() {
    let rpc_url = anvil_url();

    compound_cmd()
        .args([
            "redeem",
            "USDC",
            "1000000000",
            "--rpc-url",
            &rpc_url,
            "--private-key",
            TEST_PRIVATE_KEY,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient balance"));
}
