//! The EIP-681 URL codec.
//!
//! Bidirectional transform between a [`PaymentIntent`] and a URI of
//! the form:
//!
//! ```text
//! ethereum:<address>[@<chainId>][/<functionName>][?<key>=<value>&...]
//! ```
//!
//! All three entry points ([`encode`], [`decode`], [`validate`]) are
//! total functions: no input panics, and failure at the decode boundary
//! is always a value.
//!
//! # Canonical policies
//!
//! - `@1` is never emitted: mainnet is the implicit default chain, any
//!   other explicit chain id is emitted.
//! - Amounts are plain base-10 integer strings, never exponential.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::address::{checksum_or_echo, is_hex_address};
use crate::intent::PaymentIntent;

/// The URI scheme prefix, including the colon.
pub const SCHEME: &str = "ethereum:";

/// The implicit default chain id (Ethereum mainnet). Intents on this
/// chain encode without an `@` segment.
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Escape set for opaque query values: everything except unreserved
/// characters, matching standard URI component escaping.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Query keys extracted into dedicated [`PaymentIntent`] fields, in
/// their fixed emission order.
const VALUE_KEY: &str = "value";
const GAS_KEY: &str = "gas";
const GAS_LIMIT_KEY: &str = "gasLimit";
const GAS_PRICE_KEY: &str = "gasPrice";

/// Serializes an intent into an `ethereum:` URL.
///
/// The address is checksum-cased when syntactically valid and echoed
/// verbatim otherwise; callers are expected to have validated upstream.
/// Query parameters appear in fixed order (`value`, `gas`, `gasLimit`,
/// `gasPrice`, then extras in insertion order), with empty and `"0"`
/// values omitted entirely. When no parameter survives filtering the
/// trailing `?` is omitted.
#[must_use]
pub fn encode(intent: &PaymentIntent) -> String {
    let mut out = String::from(SCHEME);
    out.push_str(&checksum_or_echo(&intent.target));

    if let Some(chain_id) = intent.chain_id {
        if chain_id != DEFAULT_CHAIN_ID {
            out.push('@');
            out.push_str(&chain_id.to_string());
        }
    }

    if let Some(function_name) = &intent.function_name {
        out.push('/');
        out.push_str(function_name);
    }

    let mut query: Vec<(&str, String)> = Vec::new();

    if let Some(value) = &intent.value {
        if is_positive_integer(value) {
            query.push((VALUE_KEY, value.clone()));
        }
    }
    for (key, field) in [
        (GAS_KEY, &intent.gas),
        (GAS_LIMIT_KEY, &intent.gas_limit),
        (GAS_PRICE_KEY, &intent.gas_price),
    ] {
        if let Some(v) = field {
            if !is_omitted(v) {
                query.push((key, v.clone()));
            }
        }
    }
    for (key, value) in &intent.parameters {
        if is_omitted(value) {
            continue;
        }
        // Address-typed parameters are checksum-cased, not escaped.
        let rendered = if key == "address" {
            checksum_or_echo(value)
        } else {
            utf8_percent_encode(value, COMPONENT).to_string()
        };
        query.push((key.as_str(), rendered));
    }

    for (i, (key, value)) in query.iter().enumerate() {
        out.push(if i == 0 { '?' } else { '&' });
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }

    out
}

/// Parses a string claiming to be an EIP-681 URL.
///
/// Returns `None` when the scheme prefix is missing or a query pair
/// fails to percent-decode. Parsing is otherwise permissive: a
/// non-numeric chain segment yields an absent chain id, unknown query
/// keys are collected into `parameters` in encounter order, and the
/// address segment is re-emitted checksum-cased when valid.
///
/// The decoder applies the same omission filter as the encoder (empty
/// and `"0"` values disappear), which makes decoding idempotent:
/// `decode(url) == decode(encode(decode(url)))`.
#[must_use]
pub fn decode(input: &str) -> Option<PaymentIntent> {
    let rest = input.strip_prefix(SCHEME)?;

    let (head, query) = match rest.split_once('?') {
        Some((head, query)) => (head, Some(query)),
        None => (rest, None),
    };

    let (target, chain_id, function_name) = match head.split_once('@') {
        Some((target, after_at)) => match after_at.split_once('/') {
            Some((chain, func)) => (target, parse_chain_segment(chain), non_empty(func)),
            None => (target, parse_chain_segment(after_at), None),
        },
        None => match head.split_once('/') {
            Some((target, func)) => (target, None, non_empty(func)),
            None => (head, None, None),
        },
    };

    let mut intent = PaymentIntent::new(checksum_or_echo(target));
    intent.chain_id = chain_id;
    intent.function_name = function_name;

    if let Some(query) = query {
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = percent_decode_str(key).decode_utf8().ok()?.into_owned();
            let value = percent_decode_str(value).decode_utf8().ok()?.into_owned();
            if is_omitted(&value) {
                continue;
            }
            match key.as_str() {
                VALUE_KEY => intent.value = Some(value),
                GAS_KEY => intent.gas = Some(value),
                GAS_LIMIT_KEY => intent.gas_limit = Some(value),
                GAS_PRICE_KEY => intent.gas_price = Some(value),
                _ => intent.parameters.push((key, value)),
            }
        }
    }

    Some(intent)
}

/// Sanity-checks a payment URL.
///
/// Returns `true` iff the scheme is present, the URL decodes, the
/// address segment is a syntactically valid hex address, and any `@`
/// chain segment parses as an integer ≥ 1. Never panics.
#[must_use]
pub fn validate(url: &str) -> bool {
    let Some(intent) = decode(url) else {
        return false;
    };
    if !is_hex_address(&intent.target) {
        return false;
    }

    // The permissive decoder maps a malformed chain segment to absence,
    // so re-check the raw segment here.
    let rest = url.strip_prefix(SCHEME).unwrap_or("");
    let head = rest.split('?').next().unwrap_or("");
    if let Some((_, after_at)) = head.split_once('@') {
        let chain = after_at.split('/').next().unwrap_or(after_at);
        if parse_chain_segment(chain).is_none_or(|id| id < 1) {
            return false;
        }
    }
    true
}

/// A value the codec omits entirely: empty or the literal `"0"`.
fn is_omitted(value: &str) -> bool {
    value.is_empty() || value == "0"
}

/// `true` for base-10 integer strings strictly greater than zero,
/// at arbitrary precision.
fn is_positive_integer(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && value.bytes().any(|b| b != b'0')
}

/// Chain segments are bare decimal digits; `u64::from_str`'s tolerance
/// for a leading `+` is not part of the URL grammar.
fn parse_chain_segment(segment: &str) -> Option<u64> {
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.parse().ok()
    } else {
        None
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_owned()) }
}
