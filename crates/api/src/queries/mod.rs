//! GraphQL query definitions.

pub mod account;
pub mod markets;

pub use account::GetAccountBalances;
pub use markets::GetMarkets;
