//! The structured payment record encoded into and decoded from a link.

use serde::{Deserialize, Serialize};

/// A payment intent: the payload of an EIP-681 `ethereum:` URL.
///
/// An intent is constructed transiently from user input, encoded once
/// into a shareable URL, and discarded; there is no persisted store.
///
/// Numeric fields (`value`, `gas`, `gas_limit`, `gas_price`) are
/// base-10 integer strings in the smallest unit and are passed through
/// the codec verbatim. `parameters` holds every query pair outside the
/// recognized set, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    /// Recipient or token-contract address as entered. Emitted
    /// checksum-cased when syntactically valid, verbatim otherwise.
    pub target: String,

    /// EIP-155 chain id. `None` means the implicit default (mainnet).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// Contract function name for call intents (e.g. `transfer`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,

    /// Amount in the smallest unit (wei or token base units).
    /// Absent or `"0"` means no amount specified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Gas amount, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,

    /// Gas limit, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,

    /// Gas price, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,

    /// Additional call arguments as ordered `key=value` pairs
    /// (e.g. `address`, `uint256` for ERC-20 transfers).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<(String, String)>,
}

impl PaymentIntent {
    /// Creates an intent targeting the given address string.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Sets the chain id.
    #[must_use]
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Sets the contract function name.
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    /// Sets the amount in base units.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Appends an extra query parameter, preserving insertion order.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }

    /// Returns `true` when this intent is a contract call rather than
    /// a plain native-currency transfer.
    #[must_use]
    pub fn is_contract_call(&self) -> bool {
        self.function_name.is_some()
    }
}
