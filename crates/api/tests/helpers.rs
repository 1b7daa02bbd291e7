//! Subgraph stubs for balance client integration tests.
//!
//! Stubs match on the GraphQL `operationName` so a test only answers the
//! query it expects; anything else falls through to wiremock's 404.

#![allow(dead_code)]

use compound_rs_api::{BalanceClient, ClientConfig};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCOUNT: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

pub const GET_ACCOUNT_BALANCES: &str = "GetAccountBalances";
pub const GET_MARKETS: &str = "GetMarkets";

/// Load a subgraph response from `tests/fixtures`.
pub fn load_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}.json", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

/// Body of a GraphQL response carrying only errors.
pub fn graphql_errors_body(messages: &[&str]) -> String {
    let errors: Vec<Value> = messages.iter().map(|m| json!({ "message": m })).collect();
    json!({ "errors": errors, "data": null }).to_string()
}

/// A mock subgraph endpoint and the config pointing at it.
pub struct ApiStub {
    pub server: MockServer,
}

impl ApiStub {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Client config with retries shortened so failure tests stay fast.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_api_url(self.server.uri())
            .with_retry_base_delay_ms(1)
    }

    pub fn client(&self) -> BalanceClient {
        BalanceClient::with_config(self.config())
    }

    pub fn client_with_retries(&self, max_retries: u32) -> BalanceClient {
        BalanceClient::with_config(self.config().with_max_retries(max_retries))
    }

    fn operation(operation: &str) -> wiremock::MockBuilder {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": operation })))
    }

    /// Answer `operation` with a fixture file.
    pub async fn answer(&self, operation: &str, fixture: &str) {
        Self::operation(operation)
            .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
            .mount(&self.server)
            .await;
    }

    /// Answer the balances query for one account only, matching its lowercased id.
    pub async fn answer_account(&self, account: &str, fixture: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "operationName": GET_ACCOUNT_BALANCES,
                "variables": { "id": account.to_lowercase() }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    /// Answer `operation` with GraphQL errors and a null payload.
    pub async fn fail_with_errors(&self, operation: &str, messages: &[&str]) {
        Self::operation(operation)
            .respond_with(ResponseTemplate::new(200).set_body_string(graphql_errors_body(messages)))
            .mount(&self.server)
            .await;
    }

    /// Answer `operation` with `{"data":null}` and no errors.
    pub async fn answer_null_data(&self, operation: &str) {
        Self::operation(operation)
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":null}"#))
            .mount(&self.server)
            .await;
    }

    /// Fail every request with `status`, asserting the number of attempts when given.
    pub async fn fail_with_status(&self, status: u16, expected_attempts: Option<u64>) {
        let mut mock = Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("Server Error"));
        if let Some(attempts) = expected_attempts {
            mock = mock.expect(attempts);
        }
        mock.mount(&self.server).await;
    }

    /// Fail the first `failures` requests with `status`, then fall through to later mounts.
    pub async fn fail_first(&self, failures: u64, status: u16) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("Server Error"))
            .up_to_n_times(failures)
            .mount(&self.server)
            .await;
    }

    /// Reject any request; the test fails if the client reaches the network.
    pub async fn forbid_requests(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }
}
