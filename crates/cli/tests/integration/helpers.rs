//! Test helper utilities for CLI integration tests.

#![allow(deprecated)] // Command::cargo_bin deprecation

use assert_cmd::Command;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCOUNT: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

/// The `compound` binary with chain credentials and API url cleared from the environment.
pub fn compound_cmd() -> Command {
    let mut cmd = Command::cargo_bin("compound").unwrap();
    cmd.env_remove("ETH_RPC_URL")
        .env_remove("PRIVATE_KEY")
        .env_remove("COMPOUND_API_URL")
        .env("NO_COLOR", "1");
    cmd
}

fn load_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}.json", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

/// A mocked subgraph the CLI is pointed at through `COMPOUND_API_URL`.
pub struct Subgraph {
    server: MockServer,
}

impl Subgraph {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Answer the balances query for `account` with a fixture.
    pub async fn with_account(self, account: &str, fixture: &str) -> Self {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "operationName": "GetAccountBalances",
                "variables": { "id": account.to_lowercase() }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
            .mount(&self.server)
            .await;
        self
    }

    /// Answer the markets query with a fixture.
    pub async fn with_markets(self, fixture: &str) -> Self {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "GetMarkets" })))
            .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
            .mount(&self.server)
            .await;
        self
    }

    /// Answer every query with a single GraphQL error.
    pub async fn failing(self, message: &str) -> Self {
        let body = json!({ "errors": [{ "message": message }], "data": null });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
        self
    }

    /// The CLI pointed at this subgraph.
    pub fn cmd(&self) -> Command {
        let mut cmd = compound_cmd();
        cmd.env("COMPOUND_API_URL", self.server.uri());
        cmd
    }
}
