//! Integration tests for the balances command.

use predicates::prelude::*;

use super::helpers::{Subgraph, ACCOUNT};

#[tokio::test]
async fn test_balances_success() {
    let subgraph = Subgraph::start()
        .await
        .with_account(ACCOUNT, "account_balances")
        .await;

    subgraph
        .cmd()
        .args(["balances", ACCOUNT])
        .assert()
        .success()
        .stdout(predicate::str::contains("cDAI"))
        .stdout(predicate::str::contains("USDC"))
        .stdout(predicate::str::contains("$1.10K"))
        .stdout(predicate::str::contains("Net: $849.50"));
}

#[tokio::test]
async fn test_balances_json_output() {
    let subgraph = Subgraph::start()
        .await
        .with_account(ACCOUNT, "account_balances")
        .await;

    let output = subgraph
        .cmd()
        .args(["balances", ACCOUNT, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["chain"], 1);
    assert_eq!(json["has_borrowed"], true);
    assert_eq!(json["markets"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_balances_address_is_case_insensitive() {
    let subgraph = Subgraph::start()
        .await
        .with_account(ACCOUNT, "account_balances")
        .await;

    subgraph
        .cmd()
        .args(["balances", &ACCOUNT.to_uppercase().replacen("0X", "0x", 1)])
        .assert()
        .success()
        .stdout(predicate::str::contains("cDAI"));
}

#[tokio::test]
async fn test_balances_unknown_account() {
    let subgraph = Subgraph::start()
        .await
        .with_account(ACCOUNT, "account_unknown")
        .await;

    subgraph
        .cmd()
        .args(["balances", ACCOUNT])
        .assert()
        .success()
        .stdout(predicate::str::contains("No balances found."));
}

#[tokio::test]
async fn test_balances_invalid_address() {
    let subgraph = Subgraph::start().await;

    subgraph
        .cmd()
        .args(["balances", "not-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid address format"));
}

#[tokio::test]
async fn test_balances_api_error() {
    let subgraph = Subgraph::start().await.failing("indexer unavailable").await;

    subgraph
        .cmd()
        .args(["balances", ACCOUNT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("indexer unavailable"));
}
