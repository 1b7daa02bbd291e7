//! Balance client for the indexing API and the unified Compound client.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use compound_rs_contracts::{ChainClient, RpcChainClient};
use graphql_client::{GraphQLQuery, Response};
use reqwest::Client;

use crate::amount::Amount;
use crate::context::{CallContext, Network, TxOptions};
use crate::error::{ApiError, Result};
use crate::pipeline;
use crate::queries::account::{get_account_balances, GetAccountBalances};
use crate::queries::markets::{get_markets, GetMarkets};
use crate::registry::{AssetDescriptor, AssetRegistry};
use crate::types::scalars::parse_address;
use crate::types::{
    AccountBalances, AccountLiquidity, GqlMarketRates, MarketBalance, MarketSummary, NamedChain,
};

/// Default Compound v2 subgraph endpoint.
pub const DEFAULT_API_URL: &str =
    "https://api.thegraph.com/subgraphs/name/graphprotocol/compound-v2";

/// Default number of retries for failed read requests.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay between retries, doubled on every attempt.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 250;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of markets fetched by [`BalanceClient::get_markets`].
pub const DEFAULT_MARKET_LIMIT: i64 = 100;

/// Configuration for the balance client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL API URL.
    pub api_url: String,
    /// Chain the API indexes.
    pub chain: NamedChain,
    /// Retries after a connection failure or 5xx response.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub retry_base_delay_ms: u64,
    /// Timeout for a single HTTP request.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            chain: NamedChain::Mainnet,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom API URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the indexed chain.
    pub fn with_chain(mut self, chain: NamedChain) -> Self {
        self.chain = chain;
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base retry delay.
    pub fn with_retry_base_delay_ms(mut self, delay_ms: u64) -> Self {
        self.retry_base_delay_ms = delay_ms;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Delay before retry number `attempt` (zero-based).
    fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.min(16);
        Duration::from_millis(self.retry_base_delay_ms.saturating_mul(factor))
    }
}

/// Client for account balances and market data from the indexing API.
#[derive(Debug, Clone)]
pub struct BalanceClient {
    http_client: Client,
    config: ClientConfig,
}

impl Default for BalanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceClient {
    /// Create a new balance client with default configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new balance client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                Client::new()
            });
        Self {
            http_client,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a GraphQL query.
    ///
    /// Connection failures, timeouts and 5xx responses are retried with
    /// exponential backoff. Other failures, including GraphQL errors, are not.
    async fn execute<Q: GraphQLQuery>(&self, variables: Q::Variables) -> Result<Q::ResponseData> {
        let request_body = Q::build_query(variables);

        let mut attempt = 0;
        let response = loop {
            let result = self
                .http_client
                .post(&self.config.api_url)
                .json(&request_body)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            match result {
                Ok(response) => break response,
                Err(e) if attempt < self.config.max_retries && is_retryable(&e) => {
                    let delay = self.config.retry_delay(attempt);
                    attempt += 1;
                    tracing::warn!(
                        operation = request_body.operation_name,
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        };

        let response_body: Response<Q::ResponseData> = response.json().await?;

        if let Some(errors) = response_body.errors {
            if !errors.is_empty() {
                return Err(ApiError::GraphQL(
                    errors
                        .iter()
                        .map(|e| e.message.clone())
                        .collect::<Vec<_>>()
                        .join("; "),
                ));
            }
        }

        response_body
            .data
            .ok_or_else(|| ApiError::Parse("No data in response".to_string()))
    }

    /// Get an account's positions in every market it has touched.
    ///
    /// An account the indexer has never seen has no positions.
    pub async fn get_account_balances(&self, address: &str) -> Result<AccountBalances> {
        let account =
            parse_address(address).ok_or_else(|| ApiError::InvalidAddress(address.to_string()))?;

        let variables = get_account_balances::Variables {
            id: account.to_string().to_lowercase(),
        };
        let data = self.execute::<GetAccountBalances>(variables).await?;

        let Some(indexed) = data.account else {
            tracing::debug!(%account, "account not indexed");
            return Ok(AccountBalances::empty(account, self.config.chain));
        };

        let markets = indexed
            .tokens
            .into_iter()
            .filter_map(|token| {
                let balance = MarketBalance::from_gql(
                    &token.market.id,
                    token.symbol.clone(),
                    token.market.underlying_symbol,
                    token.entered_market,
                    &token.c_token_balance,
                    &token.stored_borrow_balance,
                    &token.market.exchange_rate,
                    &token.market.underlying_price_usd,
                );
                if balance.is_none() {
                    tracing::warn!(symbol = %token.symbol, "skipping unparseable market balance");
                }
                balance
            })
            .collect();

        Ok(AccountBalances::new(
            account,
            self.config.chain,
            indexed.has_borrowed,
            markets,
        ))
    }

    /// Get the current state of every indexed market.
    pub async fn get_markets(&self) -> Result<Vec<MarketSummary>> {
        let variables = get_markets::Variables {
            first: DEFAULT_MARKET_LIMIT,
        };
        let data = self.execute::<GetMarkets>(variables).await?;

        Ok(data
            .markets
            .into_iter()
            .filter_map(|m| {
                let rates = GqlMarketRates {
                    exchange_rate: &m.exchange_rate,
                    price_usd: &m.underlying_price_usd,
                    supply_rate: &m.supply_rate,
                    borrow_rate: &m.borrow_rate,
                    collateral_factor: &m.collateral_factor,
                };
                let summary = MarketSummary::from_gql(
                    &m.id,
                    m.symbol.clone(),
                    m.underlying_symbol.clone(),
                    m.underlying_decimals,
                    rates,
                );
                if summary.is_none() {
                    tracing::warn!(symbol = %m.symbol, "skipping unparseable market");
                }
                summary
            })
            .collect())
    }
}

fn is_retryable(error: &reqwest::Error) -> bool {
    error.is_connect()
        || error.is_timeout()
        || error.status().is_some_and(|status| status.is_server_error())
}

/// Configuration for the unified [`CompoundClient`].
#[derive(Debug, Clone, Default)]
pub struct CompoundClientConfig {
    /// API configuration.
    pub api_config: Option<ClientConfig>,
    /// RPC URL for on-chain interactions.
    pub rpc_url: Option<String>,
    /// Private key for signing transactions.
    pub private_key: Option<String>,
    /// Market deployments. Defaults to the built-in ones.
    pub registry: AssetRegistry,
}

impl CompoundClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API configuration.
    pub fn with_api_config(mut self, config: ClientConfig) -> Self {
        self.api_config = Some(config);
        self
    }

    /// Set the RPC URL.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Set the private key.
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Use a custom registry, e.g. one with a local fork deployment.
    pub fn with_registry(mut self, registry: AssetRegistry) -> Self {
        self.registry = registry;
        self
    }
}

/// Market operations bound to a chain client, a resolved network and options.
///
/// Account arguments default to the signer when `None`.
#[derive(Debug)]
pub struct MarketOperations<'a, C> {
    client: &'a C,
    network: &'a Network,
    options: TxOptions,
}

impl<'a, C: ChainClient> MarketOperations<'a, C> {
    /// Bind operations to a chain client and network.
    pub fn new(client: &'a C, network: &'a Network) -> Self {
        Self {
            client,
            network,
            options: TxOptions::default(),
        }
    }

    /// Use these options for every operation.
    pub fn with_options(mut self, options: TxOptions) -> Self {
        self.options = options;
        self
    }

    fn context(&self) -> CallContext<'a, C> {
        CallContext::new(self.network, self.client).with_options(self.options)
    }

    fn account_or_signer(&self, account: Option<Address>) -> Address {
        account.unwrap_or_else(|| self.client.signer_address())
    }

    /// The signer's address.
    pub fn signer_address(&self) -> Address {
        self.client.signer_address()
    }

    /// The resolved network.
    pub fn network(&self) -> &Network {
        self.network
    }

    /// Supply an asset. See [`pipeline::supply`].
    pub async fn supply(&self, asset: &str, amount: &Amount) -> Result<C::Pending> {
        pipeline::supply(asset, amount, &self.context()).await
    }

    /// Redeem by underlying or market-token symbol. See [`pipeline::redeem`].
    pub async fn redeem(&self, symbol: &str, amount: &Amount) -> Result<C::Pending> {
        pipeline::redeem(symbol, amount, &self.context()).await
    }

    /// Borrow an asset. See [`pipeline::borrow`].
    pub async fn borrow(&self, asset: &str, amount: &Amount) -> Result<C::Pending> {
        pipeline::borrow(asset, amount, &self.context()).await
    }

    /// Repay a borrow. See [`pipeline::repay_borrow`].
    pub async fn repay_borrow(
        &self,
        asset: &str,
        amount: &Amount,
        borrower: Option<&str>,
    ) -> Result<C::Pending> {
        pipeline::repay_borrow(asset, amount, borrower, &self.context()).await
    }

    /// Enter markets as collateral.
    pub async fn enter_markets(&self, symbols: &[&str]) -> Result<C::Pending> {
        pipeline::enter_markets(symbols, &self.context()).await
    }

    /// Exit a market.
    pub async fn exit_market(&self, symbol: &str) -> Result<C::Pending> {
        pipeline::exit_market(symbol, &self.context()).await
    }

    /// Account liquidity and shortfall.
    pub async fn account_liquidity(&self, account: Option<Address>) -> Result<AccountLiquidity> {
        let account = self.account_or_signer(account);
        pipeline::account_liquidity(account, &self.context()).await
    }

    /// Entered markets.
    pub async fn assets_in(&self, account: Option<Address>) -> Result<Vec<AssetDescriptor>> {
        let account = self.account_or_signer(account);
        pipeline::assets_in(account, &self.context()).await
    }

    /// Supplied balance in underlying units.
    pub async fn supply_balance(&self, symbol: &str, account: Option<Address>) -> Result<U256> {
        let account = self.account_or_signer(account);
        pipeline::supply_balance(symbol, account, &self.context()).await
    }

    /// Borrowed balance in underlying units.
    pub async fn borrow_balance(&self, symbol: &str, account: Option<Address>) -> Result<U256> {
        let account = self.account_or_signer(account);
        pipeline::borrow_balance(symbol, account, &self.context()).await
    }
}

/// Unified client for Compound markets.
///
/// - `client.api()` - balance and market queries against the indexing API
/// - `client.markets()` - pre-flight checked market transactions
///
/// # Example
///
/// ```no_run
/// use compound_rs_api::{Amount, CompoundClient, CompoundClientConfig};
/// use compound_rs_contracts::PendingTransaction;
///
/// #[tokio::main]
/// async fn main() -> Result<(), compound_rs_api::ApiError> {
///     let config = CompoundClientConfig::new()
///         .with_rpc_url("https://eth.llamarpc.com")
///         .with_private_key("0x...");
///     let client = CompoundClient::connect(config).await?;
///
///     let pending = client.markets()?.supply("ETH", &"0.5".parse()?).await?;
///     let mined = pending.wait().await?;
///     println!("supplied in block {:?}", mined.block_number);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct CompoundClient {
    api: BalanceClient,
    chain: Option<ConnectedChain>,
}

#[derive(Debug)]
struct ConnectedChain {
    client: RpcChainClient,
    network: Network,
}

impl Default for CompoundClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CompoundClient {
    /// Create a client with default API configuration (no transaction support).
    pub fn new() -> Self {
        Self {
            api: BalanceClient::new(),
            chain: None,
        }
    }

    /// Create a client and, if both an RPC URL and a private key are set,
    /// connect to the node and resolve its network.
    ///
    /// Fails with [`ApiError::UnsupportedNetwork`] if the node's chain has no
    /// deployment in the registry.
    pub async fn connect(config: CompoundClientConfig) -> Result<Self> {
        let api = match config.api_config {
            Some(api_config) => BalanceClient::with_config(api_config),
            None => BalanceClient::new(),
        };

        let chain = match (&config.rpc_url, &config.private_key) {
            (Some(rpc_url), Some(private_key)) => {
                let client = RpcChainClient::new(rpc_url, private_key)?;
                let network = Network::resolve(&client, &config.registry).await?;
                Some(ConnectedChain { client, network })
            }
            _ => None,
        };

        Ok(Self { api, chain })
    }

    /// Market operations with default options.
    ///
    /// Returns an error if transaction support is not configured.
    pub fn markets(&self) -> Result<MarketOperations<'_, RpcChainClient>> {
        match &self.chain {
            Some(chain) => Ok(MarketOperations::new(&chain.client, &chain.network)),
            None => Err(ApiError::TransactionNotConfigured),
        }
    }

    /// Get the balance client.
    pub fn api(&self) -> &BalanceClient {
        &self.api
    }

    /// Get an account's indexed balances.
    pub async fn get_account_balances(&self, address: &str) -> Result<AccountBalances> {
        self.api.get_account_balances(address).await
    }

    /// Check if transaction support is configured.
    pub fn has_transaction_support(&self) -> bool {
        self.chain.is_some()
    }

    /// Get the signer's address if transaction support is configured.
    pub fn signer_address(&self) -> Option<Address> {
        self.chain.as_ref().map(|c| c.client.signer_address())
    }

    /// The resolved network, if connected.
    pub fn network(&self) -> Option<&Network> {
        self.chain.as_ref().map(|c| &c.network)
    }
}
