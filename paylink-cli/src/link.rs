//! Payment-link assembly: turning resolved form input into a
//! [`PaymentIntent`] and a human-readable title.

use alloy_primitives::U256;
use paylink::PaymentIntent;

/// Builds an intent for a native-currency transfer.
#[must_use]
pub fn native_transfer(recipient: &str, wei: Option<U256>, chain_id: u64) -> PaymentIntent {
    let mut intent = PaymentIntent::new(recipient).with_chain_id(chain_id);
    if let Some(wei) = wei {
        intent.value = Some(wei.to_string());
    }
    intent
}

/// Builds an intent for an ERC-20 `transfer` call. A zero or absent
/// amount still produces a valid link; the codec drops the `uint256`
/// parameter.
#[must_use]
pub fn token_transfer(
    token_address: &str,
    recipient: &str,
    base_units: Option<U256>,
    chain_id: u64,
) -> PaymentIntent {
    PaymentIntent::new(token_address)
        .with_chain_id(chain_id)
        .with_function("transfer")
        .with_parameter("address", recipient)
        .with_parameter(
            "uint256",
            base_units.map_or_else(|| "0".to_owned(), |v| v.to_string()),
        )
}

/// Human-readable title for a link: `"Pay <name>"` without an amount,
/// `"Pay <amount> <symbol> to <name>"` with one.
#[must_use]
pub fn title(display_name: &str, amount: Option<&str>, symbol: &str) -> String {
    match amount {
        Some(amount) => format!("Pay {amount} {symbol} to {display_name}"),
        None => format!("Pay {display_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paylink::encode;

    const RECIPIENT: &str = "0x742e1E5e0adf53Cbb81D725d5a8b2cD5B10B5E2F";
    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    #[test]
    fn test_native_transfer_link() {
        let intent = native_transfer(RECIPIENT, Some(U256::from(1_000_000u64)), 1);
        assert_eq!(encode(&intent), format!("ethereum:{RECIPIENT}?value=1000000"));
    }

    #[test]
    fn test_native_transfer_without_amount() {
        let intent = native_transfer(RECIPIENT, None, 8453);
        assert_eq!(encode(&intent), format!("ethereum:{RECIPIENT}@8453"));
    }

    #[test]
    fn test_token_transfer_link() {
        let intent = token_transfer(USDC, RECIPIENT, Some(U256::from(100_000_000u64)), 1);
        assert_eq!(
            encode(&intent),
            format!("ethereum:{USDC}/transfer?address={RECIPIENT}&uint256=100000000")
        );
    }

    #[test]
    fn test_token_transfer_zero_amount_is_omitted() {
        let intent = token_transfer(USDC, RECIPIENT, None, 1);
        assert_eq!(encode(&intent), format!("ethereum:{USDC}/transfer?address={RECIPIENT}"));
    }

    #[test]
    fn test_titles() {
        assert_eq!(title("alice.eth", None, "ETH"), "Pay alice.eth");
        assert_eq!(
            title("alice.eth", Some("1.5"), "ETH"),
            "Pay 1.5 ETH to alice.eth"
        );
    }
}
