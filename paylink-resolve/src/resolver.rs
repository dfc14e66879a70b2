//! Registry/resolver contract reads and recipient-input resolution.
//!
//! The contract surface is the minimal ENS ABI: the registry's
//! `resolver(node)` plus the resolver profiles actually read here
//! (`addr`, `name`, `text`). Basenames expose the same interface on
//! Base, so one resolver type serves both services.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, B256};
use alloy_provider::DynProvider;
use alloy_sol_types::sol;
use async_trait::async_trait;

use paylink::address::{is_hex_address, to_checksum};
use paylink::cache::TtlCache;

use crate::namehash::{namehash, reverse_name};
use crate::service::{NameService, service_for};

sol! {
    /// ENS registry: maps a namehash node to its resolver contract.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IEnsRegistry {
        function resolver(bytes32 node) external view returns (address);
    }
}

sol! {
    /// Resolver profiles read by this crate.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IEnsResolver {
        function addr(bytes32 node) external view returns (address);
        function name(bytes32 node) external view returns (string);
        function text(bytes32 node, string key) external view returns (string);
    }
}

/// How long resolved names stay cached by default.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Error reading from a registry or resolver contract.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Contract call failed (transport error, revert, bad ABI data).
    #[error("resolver call failed: {0}")]
    Contract(#[from] alloy_contract::Error),
}

/// The outcome of resolving a human-entered recipient string.
///
/// Mirrors what a payment form needs: the codec-ready address (when
/// one exists), something to show the user, and validity flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    /// Checksummed address, when the input resolved to one.
    pub address: Option<String>,
    /// What to display for this recipient (the name, the reverse
    /// record, or the checksummed address itself).
    pub display_name: String,
    /// Avatar text record URL, when the service has one.
    pub avatar_url: Option<String>,
    /// Whether the input yielded a usable address.
    pub is_valid: bool,
    /// Whether the input was a service name rather than a hex address.
    pub is_name: bool,
}

impl ResolvedInput {
    fn invalid(input: &str) -> Self {
        Self {
            address: None,
            display_name: input.to_owned(),
            avatar_url: None,
            is_valid: false,
            is_name: false,
        }
    }
}

/// Reads names from one naming service over an alloy provider.
///
/// Lookups go through the registry to find the responsible resolver,
/// then query it. A zero address anywhere means "no record" and is
/// reported as [`None`], matching the contract convention.
#[derive(Debug)]
pub struct NameResolver {
    provider: DynProvider,
    service: NameService,
    cache: Arc<TtlCache<String, Address>>,
}

impl NameResolver {
    /// Creates a resolver for `service` with a default five-minute
    /// name cache.
    #[must_use]
    pub fn new(provider: DynProvider, service: NameService) -> Self {
        Self {
            provider,
            service,
            cache: Arc::new(TtlCache::new(DEFAULT_CACHE_TTL)),
        }
    }

    /// Replaces the name cache, e.g. to share one across resolvers or
    /// shorten the TTL in tests.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<TtlCache<String, Address>>) -> Self {
        self.cache = cache;
        self
    }

    /// Returns the service this resolver reads from.
    #[must_use]
    pub fn service(&self) -> &NameService {
        &self.service
    }

    async fn resolver_for(&self, node: B256) -> Result<Option<Address>, ResolveError> {
        let registry = IEnsRegistry::new(self.service.registry, self.provider.clone());
        let resolver = registry.resolver(node).call().await?;
        Ok((resolver != Address::ZERO).then_some(resolver))
    }

    /// Resolves a name to its address record. `Ok(None)` when the name
    /// has no resolver or no address set.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Contract`] when a registry or resolver
    /// call fails.
    pub async fn resolve_name(&self, name: &str) -> Result<Option<Address>, ResolveError> {
        let key = name.to_ascii_lowercase();
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(name = %key, service = self.service.name, "name cache hit");
            return Ok(Some(hit));
        }
        let node = namehash(name);
        let Some(resolver_addr) = self.resolver_for(node).await? else {
            return Ok(None);
        };
        let resolver = IEnsResolver::new(resolver_addr, self.provider.clone());
        let addr = resolver.addr(node).call().await?;
        if addr == Address::ZERO {
            return Ok(None);
        }
        self.cache.insert(key, addr);
        Ok(Some(addr))
    }

    /// Looks up the reverse record for an address and verifies it by
    /// forward-resolving the claimed name. Unverified or absent
    /// records come back as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Contract`] when a registry or resolver
    /// call fails.
    pub async fn lookup_reverse(&self, address: Address) -> Result<Option<String>, ResolveError> {
        let node = namehash(&reverse_name(address));
        let Some(resolver_addr) = self.resolver_for(node).await? else {
            return Ok(None);
        };
        let resolver = IEnsResolver::new(resolver_addr, self.provider.clone());
        let claimed = resolver.name(node).call().await?;
        if claimed.is_empty() {
            return Ok(None);
        }
        match self.resolve_name(&claimed).await? {
            Some(forward) if forward == address => Ok(Some(claimed)),
            _ => {
                tracing::warn!(%address, name = %claimed, "reverse record failed forward check");
                Ok(None)
            }
        }
    }

    /// Reads the `avatar` text record for a name, if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Contract`] when a registry or resolver
    /// call fails.
    pub async fn avatar_url(&self, name: &str) -> Result<Option<String>, ResolveError> {
        let node = namehash(name);
        let Some(resolver_addr) = self.resolver_for(node).await? else {
            return Ok(None);
        };
        let resolver = IEnsResolver::new(resolver_addr, self.provider.clone());
        let value = resolver.text(node, "avatar".to_owned()).call().await?;
        Ok((!value.is_empty()).then_some(value))
    }
}

/// Seam for turning form input into a codec-ready address, so callers
/// can stub resolution in tests.
#[async_trait]
pub trait ResolveInput: Send + Sync {
    /// Resolves a human-entered recipient string. Total: failures are
    /// reported through [`ResolvedInput::is_valid`], never panics.
    async fn resolve_address_input(&self, input: &str, chain_id: u64) -> ResolvedInput;
}

/// Routes input across the known naming services.
///
/// Hex input short-circuits to checksum normalization (with a
/// best-effort reverse lookup for the display name); dotted input goes
/// to whichever service owns the suffix.
#[derive(Debug, Default)]
pub struct InputResolver {
    resolvers: Vec<NameResolver>,
}

impl InputResolver {
    /// Creates an empty router; add services with
    /// [`with_resolver`](Self::with_resolver).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: NameResolver) -> Self {
        self.resolvers.push(resolver);
        self
    }

    fn resolver_for_service(&self, service: &NameService) -> Option<&NameResolver> {
        self.resolvers.iter().find(|r| r.service() == service)
    }

    /// Best-effort reverse lookup on the service registered for
    /// `chain_id`, falling back to the first registered resolver.
    async fn display_for_address(&self, address: Address, chain_id: u64) -> Option<String> {
        let resolver = self
            .resolvers
            .iter()
            .find(|r| r.service().chain_id == chain_id)
            .or_else(|| self.resolvers.first())?;
        match resolver.lookup_reverse(address).await {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(%address, error = %e, "reverse lookup failed");
                None
            }
        }
    }
}

#[async_trait]
impl ResolveInput for InputResolver {
    async fn resolve_address_input(&self, input: &str, chain_id: u64) -> ResolvedInput {
        let input = input.trim();

        if is_hex_address(input) {
            // to_checksum cannot fail on a syntactically valid address
            let checksummed = to_checksum(input).unwrap_or_else(|| input.to_owned());
            let display = self
                .display_for_address(checksummed.parse().unwrap_or(Address::ZERO), chain_id)
                .await
                .unwrap_or_else(|| checksummed.clone());
            return ResolvedInput {
                address: Some(checksummed),
                display_name: display,
                avatar_url: None,
                is_valid: true,
                is_name: false,
            };
        }

        let Some(service) = service_for(input) else {
            return ResolvedInput::invalid(input);
        };
        let Some(resolver) = self.resolver_for_service(service) else {
            tracing::debug!(name = %input, service = service.name, "no resolver registered");
            return ResolvedInput::invalid(input);
        };

        match resolver.resolve_name(input).await {
            Ok(Some(address)) => {
                let avatar_url = resolver.avatar_url(input).await.unwrap_or_default();
                ResolvedInput {
                    address: Some(address.to_checksum(None)),
                    display_name: input.to_owned(),
                    avatar_url,
                    is_valid: true,
                    is_name: true,
                }
            }
            Ok(None) => {
                let mut unresolved = ResolvedInput::invalid(input);
                unresolved.is_name = true;
                unresolved
            }
            Err(e) => {
                tracing::warn!(name = %input, error = %e, "name resolution failed");
                let mut unresolved = ResolvedInput::invalid(input);
                unresolved.is_name = true;
                unresolved
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hex_input_is_checksummed_without_network() {
        // No resolvers registered: hex input must still resolve locally.
        let resolver = InputResolver::new();
        let out = resolver
            .resolve_address_input("0x742e1e5e0adf53cbb81d725d5a8b2cd5b10b5e2f", 1)
            .await;
        assert!(out.is_valid);
        assert!(!out.is_name);
        assert_eq!(
            out.address.as_deref(),
            Some("0x742e1E5e0adf53Cbb81D725d5a8b2cD5B10B5E2F")
        );
        assert_eq!(
            out.display_name,
            "0x742e1E5e0adf53Cbb81D725d5a8b2cD5B10B5E2F"
        );
    }

    #[tokio::test]
    async fn test_unknown_suffix_is_invalid() {
        let resolver = InputResolver::new();
        let out = resolver.resolve_address_input("alice.xyz", 1).await;
        assert!(!out.is_valid);
        assert!(!out.is_name);
        assert_eq!(out.address, None);
        assert_eq!(out.display_name, "alice.xyz");
    }

    #[tokio::test]
    async fn test_known_suffix_without_registered_resolver_is_invalid() {
        let resolver = InputResolver::new();
        let out = resolver.resolve_address_input("alice.eth", 1).await;
        assert!(!out.is_valid);
        assert_eq!(out.address, None);
    }
}
