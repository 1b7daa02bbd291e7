//! Chain helpers for networks with a known market deployment.
//!
//! The full `NamedChain` type is re-exported from `alloy_chains`.

use alloy_chains::NamedChain;

/// Chains with a built-in deployment in [`AssetRegistry`](crate::AssetRegistry).
pub const SUPPORTED_CHAINS: &[NamedChain] = &[NamedChain::Mainnet];

/// Try to create a NamedChain from a chain ID.
pub fn chain_from_id(id: u64) -> Option<NamedChain> {
    NamedChain::try_from(id).ok()
}

/// Human-readable name for a chain id, falling back to the number.
pub fn chain_name(id: u64) -> String {
    chain_from_id(id).map_or_else(|| id.to_string(), |chain| chain.to_string())
}

/// Serde helper module for serializing/deserializing NamedChain as a numeric chain ID.
///
/// # Example
///
/// ```ignore
/// use alloy_chains::NamedChain;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Balances {
///     #[serde(with = "chain_serde")]
///     chain: NamedChain,
/// }
/// ```
pub mod chain_serde {
    use alloy_chains::NamedChain;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(chain: &NamedChain, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let id: u64 = (*chain).into();
        serializer.serialize_u64(id)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NamedChain, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = u64::deserialize(deserializer)?;
        NamedChain::try_from(id)
            .map_err(|_| serde::de::Error::custom(format!("Unknown chain ID: {}", id)))
    }
}
