//! Amount conversion between human-readable decimal strings and base
//! units (wei or token decimals).
//!
//! All math is arbitrary-precision over [`U256`]; floating point is
//! never involved. Excess fractional digits are truncated toward zero
//! before scaling, so `"1.0000000000000000019"` at 18 decimals parses
//! to `1000000000000000001` wei.

use alloy_primitives::U256;
use alloy_primitives::utils::{UnitsError, format_units, parse_units};

/// Decimals of the native currency (ether).
pub const ETHER_DECIMALS: u8 = 18;

/// Error converting a decimal amount string to base units.
#[derive(Debug, thiserror::Error)]
pub enum AmountError {
    /// The amount is not a well-formed non-negative decimal number, or
    /// the scaled value overflows 256 bits.
    #[error("invalid amount: {0}")]
    Invalid(#[from] UnitsError),
    /// Negative amounts have no meaning in a payment link.
    #[error("amount must not be negative")]
    Negative,
    /// The amount string is empty.
    #[error("empty amount")]
    Empty,
}

/// Parses a decimal amount string into base units at the given number
/// of decimals, truncating excess fractional digits toward zero.
///
/// # Errors
///
/// Returns [`AmountError::Empty`] for blank input,
/// [`AmountError::Negative`] for signed input, and
/// [`AmountError::Invalid`] for malformed numbers or overflow.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(AmountError::Empty);
    }
    if amount.starts_with('-') {
        return Err(AmountError::Negative);
    }
    let truncated = truncate_fraction(amount, decimals);
    let parsed = parse_units(&truncated, decimals)?;
    Ok(parsed.get_absolute())
}

/// Parses an ether amount string into wei.
///
/// # Errors
///
/// See [`parse_amount`].
pub fn parse_ether(amount: &str) -> Result<U256, AmountError> {
    parse_amount(amount, ETHER_DECIMALS)
}

/// Formats a base-unit value as a decimal string at the given number
/// of decimals, with trailing fractional zeros trimmed. Display only.
///
/// # Errors
///
/// Returns [`AmountError::Invalid`] when `decimals` exceeds the
/// representable range (more than 77 digits).
pub fn format_amount(value: U256, decimals: u8) -> Result<String, AmountError> {
    let formatted = format_units(value, decimals)?;
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        Ok("0".to_owned())
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Formats a wei value as an ether string for display.
///
/// # Errors
///
/// See [`format_amount`].
pub fn format_ether(value: U256) -> Result<String, AmountError> {
    format_amount(value, ETHER_DECIMALS)
}

/// Truncates the fractional part of `amount` to at most `decimals`
/// digits, toward zero. Leaves malformed input alone for the parser
/// to reject.
fn truncate_fraction(amount: &str, decimals: u8) -> String {
    let Some((int, frac)) = amount.split_once('.') else {
        return amount.to_owned();
    };
    let int = if int.is_empty() { "0" } else { int };
    let kept = frac.get(..decimals as usize).unwrap_or(frac);
    if kept.is_empty() {
        int.to_owned()
    } else {
        format!("{int}.{kept}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(s: &str) -> U256 {
        U256::from_str_radix(s, 10).unwrap()
    }

    #[test]
    fn test_parse_ether_whole() {
        assert_eq!(parse_ether("1").unwrap(), wei("1000000000000000000"));
        assert_eq!(parse_ether("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_ether_fractional() {
        assert_eq!(parse_ether("1.5").unwrap(), wei("1500000000000000000"));
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), U256::from(1));
        assert_eq!(parse_ether(".5").unwrap(), wei("500000000000000000"));
    }

    #[test]
    fn test_parse_ether_truncates_toward_zero() {
        // The 19th fractional digit is dropped, not rounded.
        assert_eq!(
            parse_ether("1.0000000000000000019").unwrap(),
            wei("1000000000000000001")
        );
    }

    #[test]
    fn test_parse_ether_large_values_are_exact() {
        // Well beyond f64 precision.
        assert_eq!(
            parse_ether("123456789123456789.123456789123456789").unwrap(),
            wei("123456789123456789123456789123456789")
        );
    }

    #[test]
    fn test_parse_amount_token_decimals() {
        assert_eq!(parse_amount("100", 6).unwrap(), wei("100000000"));
        assert_eq!(parse_amount("0.5", 6).unwrap(), wei("500000"));
        assert_eq!(parse_amount("1.9999999", 6).unwrap(), wei("1999999"));
        assert_eq!(parse_amount("3.7", 0).unwrap(), U256::from(3));
    }

    #[test]
    fn test_parse_amount_rejects_negative() {
        assert!(matches!(parse_ether("-1"), Err(AmountError::Negative)));
    }

    #[test]
    fn test_parse_amount_rejects_malformed() {
        assert!(parse_ether("abc").is_err());
        assert!(parse_ether("1.2.3").is_err());
    }

    #[test]
    fn test_parse_amount_rejects_blank() {
        assert!(matches!(parse_ether(""), Err(AmountError::Empty)));
        assert!(matches!(parse_ether("   "), Err(AmountError::Empty)));
    }

    #[test]
    fn test_format_ether_trims_trailing_zeros() {
        assert_eq!(format_ether(wei("1500000000000000000")).unwrap(), "1.5");
        assert_eq!(format_ether(wei("1000000000000000000")).unwrap(), "1");
        assert_eq!(format_ether(U256::ZERO).unwrap(), "0");
    }

    #[test]
    fn test_format_amount_token_decimals() {
        assert_eq!(format_amount(wei("100000000"), 6).unwrap(), "100");
        assert_eq!(format_amount(wei("1"), 6).unwrap(), "0.000001");
    }

    #[test]
    fn test_parse_format_roundtrip() {
        let v = parse_amount("12.345678", 6).unwrap();
        assert_eq!(format_amount(v, 6).unwrap(), "12.345678");
    }
}
