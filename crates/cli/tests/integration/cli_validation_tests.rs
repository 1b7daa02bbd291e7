//! CLI argument validation tests.
//!
//! These tests verify that the CLI properly validates arguments and provides
//! helpful error messages without requiring network access.

use predicates::prelude::*;

use super::helpers::compound_cmd;

const RPC_ARGS: [&str; 4] = [
    "--rpc-url",
    "http://127.0.0.1:1",
    "--private-key",
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
];

#[test]
fn test_help_output() {
    compound_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compound"))
        .stdout(predicate::str::contains("supply"))
        .stdout(predicate::str::contains("redeem"))
        .stdout(predicate::str::contains("borrow"))
        .stdout(predicate::str::contains("repay"))
        .stdout(predicate::str::contains("enter-markets"))
        .stdout(predicate::str::contains("exit-market"))
        .stdout(predicate::str::contains("balances"));
}

#[test]
fn test_supply_help_lists_overrides() {
    compound_cmd()
        .args(["supply", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--mantissa"))
        .stdout(predicate::str::contains("--abi"))
        .stdout(predicate::str::contains("--gas-limit"))
        .stdout(predicate::str::contains("--nonce"));
}

#[test]
fn test_repay_help_lists_borrower() {
    compound_cmd()
        .args(["repay", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--borrower"))
        .stdout(predicate::str::contains("-1"));
}

#[test]
fn test_invalid_command() {
    compound_cmd()
        .arg("invalid_command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_supply_missing_amount() {
    compound_cmd()
        .args(["supply", "DAI"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_supply_missing_private_key() {
    compound_cmd()
        .args(["supply", "DAI", "1", "--rpc-url", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--private-key"));
}

#[test]
fn test_borrow_missing_rpc_url() {
    compound_cmd()
        .args(["borrow", "DAI", "1", "--private-key", "0x01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rpc-url"));
}

#[test]
fn test_enter_markets_requires_an_asset() {
    compound_cmd()
        .arg("enter-markets")
        .args(RPC_ARGS)
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_invalid_amount_is_rejected_before_connecting() {
    compound_cmd()
        .args(["supply", "DAI", "1.2.3"])
        .args(RPC_ARGS)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_negative_amount_other_than_repay_all_is_rejected() {
    compound_cmd()
        .args(["borrow", "DAI", "-5"])
        .args(RPC_ARGS)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_invalid_abi_value() {
    compound_cmd()
        .args(["supply", "ETH", "1", "--abi", "proxy"])
        .args(RPC_ARGS)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_invalid_output_format() {
    compound_cmd()
        .args(["markets", "--format", "invalid_format"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_balances_missing_address() {
    compound_cmd()
        .arg("balances")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
