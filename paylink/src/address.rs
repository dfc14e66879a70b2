//! Hex-address syntax checks and EIP-55 checksum casing.
//!
//! Addresses flow through the codec as strings: form input arrives in
//! arbitrary casing, and output is always checksum-cased when the input
//! is a syntactically valid address. Malformed input is echoed back
//! unchanged rather than rejected; rejecting is the validator's job.

use std::str::FromStr;

use alloy_primitives::Address;

/// Returns `true` if `s` is a 40-hex-digit address, with or without
/// the `0x` prefix. Casing is not checked.
#[must_use]
pub fn is_hex_address(s: &str) -> bool {
    let hex = s.strip_prefix("0x").unwrap_or(s);
    hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parses `s` as an address and re-emits it EIP-55 checksum-cased.
///
/// Returns `None` when `s` is not a syntactically valid address.
#[must_use]
pub fn to_checksum(s: &str) -> Option<String> {
    Address::from_str(s).ok().map(|a| a.to_checksum(None))
}

/// Checksum-cases `s` when it is a valid address, otherwise echoes the
/// input verbatim.
///
/// This is the encoder's permissive normalization: a malformed address
/// degrades to pass-through instead of failing the whole encode.
#[must_use]
pub fn checksum_or_echo(s: &str) -> String {
    to_checksum(s).unwrap_or_else(|| s.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWER: &str = "0x742e1e5e0adf53cbb81d725d5a8b2cd5b10b5e2f";
    const CHECKSUMMED: &str = "0x742e1E5e0adf53Cbb81D725d5a8b2cD5B10B5E2F";

    #[test]
    fn test_is_hex_address_accepts_any_casing() {
        assert!(is_hex_address(LOWER));
        assert!(is_hex_address(&LOWER.to_uppercase().replace("0X", "0x")));
        assert!(is_hex_address(CHECKSUMMED));
    }

    #[test]
    fn test_is_hex_address_accepts_unprefixed() {
        assert!(is_hex_address(&LOWER[2..]));
    }

    #[test]
    fn test_is_hex_address_rejects_wrong_length() {
        assert!(!is_hex_address("0x742e1e5e"));
        assert!(!is_hex_address(""));
        assert!(!is_hex_address(&format!("{LOWER}00")));
    }

    #[test]
    fn test_is_hex_address_rejects_non_hex() {
        assert!(!is_hex_address("0x742e1e5e0adf53cbb81d725d5a8b2cd5b10b5xyz"));
        assert!(!is_hex_address("vitalik.eth"));
    }

    #[test]
    fn test_to_checksum_normalizes_casing() {
        assert_eq!(to_checksum(LOWER).as_deref(), Some(CHECKSUMMED));
        assert_eq!(
            to_checksum(&LOWER.to_uppercase().replace("0X", "0x")).as_deref(),
            Some(CHECKSUMMED)
        );
        assert_eq!(to_checksum(CHECKSUMMED).as_deref(), Some(CHECKSUMMED));
    }

    #[test]
    fn test_to_checksum_rejects_malformed() {
        assert_eq!(to_checksum("not-an-address"), None);
        assert_eq!(to_checksum(""), None);
    }

    #[test]
    fn test_checksum_or_echo_falls_back_verbatim() {
        assert_eq!(checksum_or_echo("vitalik.eth"), "vitalik.eth");
        assert_eq!(checksum_or_echo(LOWER), CHECKSUMMED);
    }
}
