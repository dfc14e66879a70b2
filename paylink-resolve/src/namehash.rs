//! EIP-137 name hashing.

use alloy_primitives::{B256, keccak256};

/// Computes the EIP-137 namehash of a dotted name.
///
/// Labels are folded right-to-left over keccak256, starting from the
/// zero hash for the empty name. Input is ASCII-lowercased first; full
/// UTS-46 normalization is the caller's concern.
#[must_use]
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    let normalized = name.to_ascii_lowercase();
    for label in normalized.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        node = keccak256([node.as_slice(), label_hash.as_slice()].concat());
    }
    node
}

/// Builds the reverse-resolution name (`<addr-hex>.addr.reverse`) for
/// an address, per ENS reverse-registrar convention.
#[must_use]
pub fn reverse_name(address: alloy_primitives::Address) -> String {
    format!("{address:x}.addr.reverse")
}
