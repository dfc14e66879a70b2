//! Token-search client.
//!
//! Queries a third-party token-search API for candidate tokens by
//! symbol or name, scoped to a chain. Results feed the contract
//! address and decimals of a token-transfer payment link; nothing here
//! is part of the codec's own invariants.

use std::time::Duration;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use url::Url;

use paylink::cache::TtlCache;

use crate::error::HttpError;
use crate::throttle::Throttle;

/// How long search results stay cached by default.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Default minimum spacing between upstream calls.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(250);

/// A candidate token returned by the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    /// Ticker symbol (e.g. `USDC`).
    pub symbol: String,
    /// Display name (e.g. `USD Coin`).
    pub name: String,
    /// Token contract address.
    pub address: Address,
    /// Token decimals.
    pub decimals: u8,
    /// Chain the deployment lives on.
    pub chain_id: u64,
    /// Logo image URL, when the API has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tokens: Vec<TokenRecord>,
}

/// Client for a token-search HTTP API.
///
/// `GET {base}/search?query=<q>&chainId=<id>` returning
/// `{"tokens": [...]}`. Responses are cached per `(query, chain)` with
/// a bounded TTL and calls are spaced by a [`Throttle`].
#[derive(Debug)]
pub struct TokenSearchClient {
    http: reqwest::Client,
    search_url: Url,
    cache: TtlCache<(String, u64), Vec<TokenRecord>>,
    throttle: Throttle,
}

impl TokenSearchClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Url`] when the search endpoint cannot be
    /// derived from `base_url`.
    pub fn try_new(base_url: Url) -> Result<Self, HttpError> {
        let search_url = base_url.join("search")?;
        Ok(Self {
            http: reqwest::Client::new(),
            search_url,
            cache: TtlCache::new(DEFAULT_CACHE_TTL),
            throttle: Throttle::new(DEFAULT_MIN_INTERVAL),
        })
    }

    /// Replaces the result-cache TTL.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = TtlCache::new(ttl);
        self
    }

    /// Replaces the minimum spacing between upstream calls.
    #[must_use]
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.throttle = Throttle::new(interval);
        self
    }

    /// Searches for tokens matching `query` on `chain_id`.
    ///
    /// An empty query short-circuits to an empty result without a
    /// network call.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure, a non-success
    /// status, or an undecodable body.
    pub async fn search(
        &self,
        query: &str,
        chain_id: u64,
    ) -> Result<Vec<TokenRecord>, HttpError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let key = (query.to_ascii_lowercase(), chain_id);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(query, chain_id, "token search cache hit");
            return Ok(hit);
        }

        self.throttle.wait().await;
        let response = self
            .http
            .get(self.search_url.clone())
            .query(&[("query", query), ("chainId", &chain_id.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                endpoint: self.search_url.to_string(),
            });
        }

        let body: SearchResponse = response.json().await?;
        tracing::debug!(query, chain_id, hits = body.tokens.len(), "token search");
        self.cache.insert(key, body.tokens.clone());
        Ok(body.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn usdc_body() -> serde_json::Value {
        serde_json::json!({
            "tokens": [{
                "symbol": "USDC",
                "name": "USD Coin",
                "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                "decimals": 6,
                "chainId": 1,
                "logoUrl": "https://example.com/usdc.png"
            }]
        })
    }

    fn client_for(server: &MockServer) -> TokenSearchClient {
        TokenSearchClient::try_new(server.uri().parse().unwrap())
            .unwrap()
            .with_min_interval(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_search_decodes_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "usdc"))
            .and(query_param("chainId", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(usdc_body()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let tokens = client.search("usdc", 1).await.unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].symbol, "USDC");
        assert_eq!(tokens[0].decimals, 6);
        assert_eq!(
            tokens[0].address.to_checksum(None),
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"
        );
    }

    #[tokio::test]
    async fn test_search_caches_per_query_and_chain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(usdc_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.search("usdc", 1).await.unwrap();
        // Same query, different casing: still one upstream call.
        let second = client.search("USDC", 1).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_search_surfaces_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.search("usdc", 1).await.unwrap_err();
        assert!(matches!(err, HttpError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_empty_query_is_local() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        assert!(client.search("  ", 1).await.unwrap().is_empty());
    }

    #[test]
    fn test_token_record_tolerates_missing_logo() {
        let record: TokenRecord = serde_json::from_value(serde_json::json!({
            "symbol": "DAI",
            "name": "Dai Stablecoin",
            "address": "0x6B175474E89094C44Da98b954EedeAC495271d0F",
            "decimals": 18,
            "chainId": 1
        }))
        .unwrap();
        assert_eq!(record.logo_url, None);
    }
}
