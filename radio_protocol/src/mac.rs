//! Truncated message authentication: the first 8 bytes of
//! HMAC-SHA256(mac_key, sender_id ‖ nonce ‖ ciphertext). Truncation trades
//! forgery resistance (2^-64 per attempt) for on-wire overhead.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::TAG_LEN;
use crate::error::ProtocolError;

type HmacSha256 = Hmac<Sha256>;

pub fn compute_tag(mac_key: &[u8], message: &[u8]) -> Result<[u8; TAG_LEN], ProtocolError> {
    let mut mac =
        HmacSha256::new_from_slice(mac_key).map_err(|_| ProtocolError::CryptoFailure)?;
    mac.update(message);
    let full = mac.finalize().into_bytes();
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&full[..TAG_LEN]);
    Ok(tag)
}

/// Constant-time with respect to the tag contents.
pub fn verify_tag(
    mac_key: &[u8],
    message: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<bool, ProtocolError> {
    let expected = compute_tag(mac_key, message)?;
    Ok(expected.as_slice().ct_eq(tag.as_slice()).into())
}
