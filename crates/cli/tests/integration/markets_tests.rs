//! Integration tests for the markets command.

use predicates::prelude::*;

use super::helpers::Subgraph;

#[tokio::test]
async fn test_markets_table() {
    let subgraph = Subgraph::start().await.with_markets("markets").await;

    subgraph
        .cmd()
        .arg("markets")
        .assert()
        .success()
        .stdout(predicate::str::contains("cETH"))
        .stdout(predicate::str::contains("cDAI"))
        .stdout(predicate::str::contains("82.50%"))
        .stdout(predicate::str::contains("$3.00K"));
}

#[tokio::test]
async fn test_markets_json_sorted_by_symbol() {
    let subgraph = Subgraph::start().await.with_markets("markets").await;

    let output = subgraph
        .cmd()
        .args(["markets", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let symbols: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["market_symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["cDAI", "cETH"]);
}
