//! Account balance GraphQL query.

use graphql_client::GraphQLQuery;

/// Custom scalar type mappings for GraphQL.
pub type BigDecimal = String;

/// Query for an account's per-market token positions.
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "schema/compound.graphql",
    query_path = "queries/compound.graphql",
    response_derives = "Debug, Clone",
    variables_derives = "Debug, Clone"
)]
pub struct GetAccountBalances;
