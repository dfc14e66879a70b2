//! Known naming services.
//!
//! Both ENS and Basenames expose the same registry/resolver contract
//! surface; they differ only in registry address, chain, and which
//! name suffixes they own.

use alloy_primitives::{Address, address};

/// Ethereum mainnet ENS registry.
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// Basenames registry on Base.
pub const BASENAMES_REGISTRY: Address = address!("B94704422c2a1E396835A571837Aa5AE53285a95");

/// Base mainnet chain id.
pub const BASE_CHAIN_ID: u64 = 8453;

/// A naming service: a registry deployment plus the name suffixes it
/// is authoritative for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameService {
    /// Human-readable service name.
    pub name: &'static str,
    /// Name suffix this service owns (e.g. `.eth`).
    pub suffix: &'static str,
    /// Chain the registry is deployed on.
    pub chain_id: u64,
    /// Registry contract address.
    pub registry: Address,
}

/// ENS on Ethereum mainnet.
pub const ENS: NameService = NameService {
    name: "ens",
    suffix: ".eth",
    chain_id: 1,
    registry: ENS_REGISTRY,
};

/// Basenames on Base. Subnames of `base.eth`, so this entry must be
/// matched before the plain `.eth` suffix.
pub const BASENAMES: NameService = NameService {
    name: "basenames",
    suffix: ".base.eth",
    chain_id: BASE_CHAIN_ID,
    registry: BASENAMES_REGISTRY,
};

/// All known services, in match-priority order (most specific suffix
/// first).
pub const KNOWN_SERVICES: &[NameService] = &[BASENAMES, ENS];

/// Finds the service authoritative for `name`, if any.
#[must_use]
pub fn service_for(name: &str) -> Option<&'static NameService> {
    let lower = name.to_ascii_lowercase();
    KNOWN_SERVICES.iter().find(|s| lower.ends_with(s.suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basenames_wins_over_ens() {
        assert_eq!(service_for("alice.base.eth"), Some(&BASENAMES));
        assert_eq!(service_for("alice.eth"), Some(&ENS));
    }

    #[test]
    fn test_suffix_match_is_case_insensitive() {
        assert_eq!(service_for("Alice.ETH"), Some(&ENS));
    }

    #[test]
    fn test_unknown_suffix() {
        assert_eq!(service_for("alice.xyz"), None);
        assert_eq!(service_for("alice"), None);
    }
}
