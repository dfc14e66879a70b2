//! Chain metadata: built-in registry plus a JSON feed client.
//!
//! The registry answers "what is the native currency and where do I
//! RPC for chain N" for the handful of networks a payment form cares
//! about, and can be refreshed from a chains.json-style metadata feed.

use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

use crate::error::HttpError;

/// Native-currency and RPC metadata for one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMetadata {
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Network display name.
    pub name: String,
    /// Native currency ticker (e.g. `ETH`).
    pub native_symbol: String,
    /// Native currency decimals (18 for every chain listed here).
    pub native_decimals: u8,
    /// Public HTTP RPC endpoints.
    pub rpc_endpoints: Vec<String>,
}

fn chain(
    chain_id: u64,
    name: &str,
    native_symbol: &str,
    rpc_endpoints: &[&str],
) -> ChainMetadata {
    ChainMetadata {
        chain_id,
        name: name.to_owned(),
        native_symbol: native_symbol.to_owned(),
        native_decimals: 18,
        rpc_endpoints: rpc_endpoints.iter().map(|&s| s.to_owned()).collect(),
    }
}

/// Built-in metadata for well-known networks.
#[must_use]
pub fn known_chains() -> Vec<ChainMetadata> {
    vec![
        chain(1, "Ethereum Mainnet", "ETH", &["https://eth.llamarpc.com"]),
        chain(8453, "Base", "ETH", &["https://mainnet.base.org"]),
        chain(10, "OP Mainnet", "ETH", &["https://mainnet.optimism.io"]),
        chain(42161, "Arbitrum One", "ETH", &["https://arb1.arbitrum.io/rpc"]),
        chain(137, "Polygon", "POL", &["https://polygon-rpc.com"]),
        chain(11155111, "Sepolia", "ETH", &["https://rpc.sepolia.org"]),
    ]
}

/// Lookup table from chain id to [`ChainMetadata`].
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<u64, ChainMetadata>,
}

impl ChainRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with [`known_chains`].
    #[must_use]
    pub fn from_known() -> Self {
        let mut registry = Self::new();
        registry.merge(known_chains());
        registry
    }

    /// Inserts or replaces entries.
    pub fn merge(&mut self, chains: Vec<ChainMetadata>) {
        for metadata in chains {
            self.chains.insert(metadata.chain_id, metadata);
        }
    }

    /// Looks up metadata for a chain id.
    #[must_use]
    pub fn get(&self, chain_id: u64) -> Option<&ChainMetadata> {
        self.chains.get(&chain_id)
    }

    /// Number of known chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns `true` when no chains are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// Wire format of a chains.json-style feed entry. Entries with shapes
/// we do not understand are skipped, not fatal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedChain {
    name: String,
    chain_id: u64,
    #[serde(default)]
    rpc: Vec<String>,
    native_currency: FeedNativeCurrency,
}

#[derive(Debug, Deserialize)]
struct FeedNativeCurrency {
    symbol: String,
    decimals: u8,
}

impl From<FeedChain> for ChainMetadata {
    fn from(feed: FeedChain) -> Self {
        Self {
            chain_id: feed.chain_id,
            name: feed.name,
            native_symbol: feed.native_currency.symbol,
            native_decimals: feed.native_currency.decimals,
            // Feeds interpolate API keys as ${VAR}; those endpoints are
            // unusable without credentials and are dropped.
            rpc_endpoints: feed.rpc.into_iter().filter(|u| !u.contains("${")).collect(),
        }
    }
}

/// Fetches chain metadata from a chains.json-style feed.
#[derive(Debug)]
pub struct ChainFeedClient {
    http: reqwest::Client,
    feed_url: Url,
}

impl ChainFeedClient {
    /// Creates a client for the feed at `feed_url`.
    #[must_use]
    pub fn new(feed_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            feed_url,
        }
    }

    /// Downloads the feed and converts every entry it understands.
    /// Individually malformed entries are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure, a non-success
    /// status, or a body that is not a JSON array.
    pub async fn fetch(&self) -> Result<Vec<ChainMetadata>, HttpError> {
        let response = self.http.get(self.feed_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                endpoint: self.feed_url.to_string(),
            });
        }
        let entries: Vec<serde_json::Value> = response.json().await?;
        let mut chains = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<FeedChain>(entry) {
                Ok(feed) => chains.push(ChainMetadata::from(feed)),
                Err(e) => tracing::debug!(error = %e, "skipping malformed feed entry"),
            }
        }
        tracing::debug!(chains = chains.len(), "fetched chain metadata feed");
        Ok(chains)
    }

    /// Fetches the feed and merges it into `registry`.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn refresh(&self, registry: &mut ChainRegistry) -> Result<(), HttpError> {
        let chains = self.fetch().await?;
        registry.merge(chains);
        Ok(())
    }
}
