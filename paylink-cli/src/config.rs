//! CLI configuration.
//!
//! Loads configuration from a TOML file with support for environment
//! variable expansion in string values. Variables use `$VAR` or
//! `${VAR}` syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! token_search_url = "https://tokens.example.com/"
//! chain_feed_url = "https://chainid.network/chains.json"
//!
//! [rpc]
//! "1" = "$MAINNET_RPC_URL"
//! "8453" = "https://mainnet.base.org"
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` — Path to configuration file (default: `paylink.toml`)
//! - Values referenced by `$VAR` in the config file

use std::collections::HashMap;
use std::path::Path;

use paylink_http::ChainRegistry;
use serde::Deserialize;

/// Top-level CLI configuration. Every field is optional; a missing
/// config file means defaults throughout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaylinkConfig {
    /// Base URL of the token-search API.
    pub token_search_url: Option<String>,

    /// Chain-metadata feed to refresh the built-in registry from.
    pub chain_feed_url: Option<String>,

    /// RPC endpoint overrides keyed by chain id (TOML keys are
    /// strings, so `"1" = "..."`).
    #[serde(default)]
    pub rpc: HashMap<String, String>,
}

impl PaylinkConfig {
    /// Loads configuration from the path given by the `CONFIG`
    /// environment variable, falling back to `paylink.toml` in the
    /// current directory. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| "paylink.toml".to_owned());
        Self::load_from(&path)
    }

    /// Loads configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_from(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = if Path::new(path).exists() {
            std::fs::read_to_string(path)?
        } else {
            String::new()
        };
        let expanded = expand_env_vars(&content);
        Ok(toml::from_str(&expanded)?)
    }

    /// Picks the RPC endpoint for a chain: the config override when
    /// set, otherwise the first endpoint the registry knows.
    #[must_use]
    pub fn rpc_for(&self, chain_id: u64, registry: &ChainRegistry) -> Option<String> {
        if let Some(url) = self.rpc.get(&chain_id.to_string()) {
            return Some(url.clone());
        }
        registry
            .get(chain_id)
            .and_then(|c| c.rpc_endpoints.first().cloned())
    }
}

/// Substitutes `$NAME` and `${NAME}` references in the raw config text
/// with environment-variable values. A reference to an unset variable
/// stays verbatim, so the eventual TOML error points at the real value
/// rather than an empty string.
fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        rest = &rest[dollar + 1..];

        let (name, tail, braced) = if let Some(body) = rest.strip_prefix('{') {
            match body.split_once('}') {
                Some((name, tail)) => (name, tail, true),
                // Unclosed brace: not a reference.
                None => {
                    out.push('$');
                    continue;
                }
            }
        } else {
            let end = rest
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(rest.len());
            (&rest[..end], &rest[end..], false)
        };

        if name.is_empty() {
            out.push('$');
            continue;
        }

        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            Err(_) => {
                if braced {
                    out.push_str("${");
                    out.push_str(name);
                    out.push('}');
                } else {
                    out.push('$');
                    out.push_str(name);
                }
            }
        }
        rest = tail;
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PaylinkConfig = toml::from_str("").unwrap();
        assert_eq!(config.token_search_url, None);
        assert!(config.rpc.is_empty());
    }

    #[test]
    fn test_rpc_override_wins_over_registry() {
        let config: PaylinkConfig = toml::from_str(
            r#"
            [rpc]
            "1" = "https://my-node.internal"
            "#,
        )
        .unwrap();
        let registry = ChainRegistry::from_known();
        assert_eq!(
            config.rpc_for(1, &registry).as_deref(),
            Some("https://my-node.internal")
        );
        // No override: registry endpoint
        assert!(config.rpc_for(8453, &registry).is_some());
        // Unknown everywhere
        assert_eq!(config.rpc_for(424_242, &registry), None);
    }

    #[test]
    fn test_expand_env_vars_substitutes_and_preserves() {
        // SAFETY: test-local variable name, no concurrent reader cares
        unsafe { std::env::set_var("PAYLINK_TEST_RPC", "https://node.example") };
        let expanded = expand_env_vars("a = \"$PAYLINK_TEST_RPC\"\nb = \"${NOPE_UNSET}\"");
        assert!(expanded.contains("https://node.example"));
        assert!(expanded.contains("${NOPE_UNSET}"));
    }

    #[test]
    fn test_expand_env_vars_leaves_non_references_alone() {
        assert_eq!(expand_env_vars("cost = \"$5\""), "cost = \"$5\"");
        assert_eq!(expand_env_vars("a${unclosed"), "a${unclosed");
        assert_eq!(expand_env_vars("$NOPE_UNSET_BARE"), "$NOPE_UNSET_BARE");
    }
}
