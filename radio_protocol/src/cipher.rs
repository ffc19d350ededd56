//! AES-128-CTR keystream. The 8-byte wire nonce occupies bytes 0..8 of the
//! 16-byte counter block; bytes 8..16 start at zero and the whole block is
//! incremented big-endian per keystream block. Both ends must agree on this
//! layout exactly; it matches the mbedtls CTR convention.
//!
//! Accepted limitation: with 64-bit random nonces, keystream reuse becomes
//! birthday-likely after roughly 2^32 messages under one key.

use aes::Aes128;
use aes::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;

use crate::error::ProtocolError;
use crate::{AES_KEY_LEN, NONCE_LEN};

type Aes128Ctr = Ctr128BE<Aes128>;

/// XOR the keystream for (key, nonce) into `data` in place. Encryption and
/// decryption are this same operation; applying it twice is the identity.
pub fn apply_keystream(
    key: &[u8; AES_KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    data: &mut [u8],
) -> Result<(), ProtocolError> {
    let mut iv = [0u8; 16];
    iv[..NONCE_LEN].copy_from_slice(nonce);
    let mut ctr =
        Aes128Ctr::new_from_slices(key, &iv).map_err(|_| ProtocolError::CryptoFailure)?;
    ctr.apply_keystream(data);
    Ok(())
}

pub fn encrypt(
    key: &[u8; AES_KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, ProtocolError> {
    let mut out = plaintext.to_vec();
    apply_keystream(key, nonce, &mut out)?;
    Ok(out)
}

pub fn decrypt(
    key: &[u8; AES_KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, ProtocolError> {
    let mut out = ciphertext.to_vec();
    apply_keystream(key, nonce, &mut out)?;
    Ok(out)
}
