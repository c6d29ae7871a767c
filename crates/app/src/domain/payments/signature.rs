//! Notification signature verification.

use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

/// Compute the expected signature for a notification.
///
/// SHA-512 over the concatenation of order id, status code, gross
/// amount string, and the shared server key, hex encoded.
#[must_use]
pub fn expected_signature(
    order_id: &str,
    status_code: &str,
    gross_amount: &str,
    server_key: &str,
) -> String {
    let mut hasher = Sha512::new();

    hasher.update(order_id.as_bytes());
    hasher.update(status_code.as_bytes());
    hasher.update(gross_amount.as_bytes());
    hasher.update(server_key.as_bytes());

    hex::encode(hasher.finalize())
}

/// Compare a presented signature against the expected one in constant
/// time. Case differences in the hex encoding are tolerated.
#[must_use]
pub fn verify_signature(presented: &str, expected: &str) -> bool {
    let presented = presented.to_ascii_lowercase();

    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
