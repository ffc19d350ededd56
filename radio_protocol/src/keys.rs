use rand_core::{OsRng, RngCore};
use thiserror::Error;

use crate::AES_KEY_LEN;

/// Pre-provisioned symmetric keys, constant for the process lifetime.
/// Key provisioning itself happens outside this layer.
pub trait KeyStore {
    fn aes_key(&self) -> &[u8; AES_KEY_LEN];
    fn mac_key(&self) -> &[u8];
}

impl<K: KeyStore + ?Sized> KeyStore for &K {
    fn aes_key(&self) -> &[u8; AES_KEY_LEN] {
        (**self).aes_key()
    }
    fn mac_key(&self) -> &[u8] {
        (**self).mac_key()
    }
}

/// Source of nonce bytes. Only ever used to generate fresh 8-byte nonces.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]);
}

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("aes key must be {AES_KEY_LEN} bytes, got {0}")]
    BadAesKeyLength(usize),
    #[error("mac key must not be empty")]
    EmptyMacKey,
}

/// Keys held in memory, typically decoded from hex config at startup.
#[derive(Clone)]
pub struct StaticKeyStore {
    aes: [u8; AES_KEY_LEN],
    mac: Vec<u8>,
}

impl StaticKeyStore {
    pub fn new(aes: [u8; AES_KEY_LEN], mac: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let mac = mac.into();
        if mac.is_empty() {
            return Err(KeyError::EmptyMacKey);
        }
        Ok(Self { aes, mac })
    }

    pub fn from_hex(aes_hex: &str, mac_hex: &str) -> Result<Self, KeyError> {
        let aes_bytes = hex::decode(aes_hex)?;
        if aes_bytes.len() != AES_KEY_LEN {
            return Err(KeyError::BadAesKeyLength(aes_bytes.len()));
        }
        let mut aes = [0u8; AES_KEY_LEN];
        aes.copy_from_slice(&aes_bytes);
        Self::new(aes, hex::decode(mac_hex)?)
    }
}

impl KeyStore for StaticKeyStore {
    fn aes_key(&self) -> &[u8; AES_KEY_LEN] {
        &self.aes
    }

    fn mac_key(&self) -> &[u8] {
        &self.mac
    }
}

/// OS-backed entropy for production nonces.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_roundtrip() {
        let ks =
            StaticKeyStore::from_hex("000102030405060708090a0b0c0d0e0f", "deadbeef").unwrap();
        assert_eq!(ks.aes_key()[1], 0x01);
        assert_eq!(ks.mac_key(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn rejects_wrong_aes_length() {
        assert!(matches!(
            StaticKeyStore::from_hex("0011", "deadbeef"),
            Err(KeyError::BadAesKeyLength(2))
        ));
    }

    #[test]
    fn rejects_empty_mac_key() {
        assert!(matches!(
            StaticKeyStore::from_hex("000102030405060708090a0b0c0d0e0f", ""),
            Err(KeyError::EmptyMacKey)
        ));
    }

    #[test]
    fn os_entropy_fills() {
        let mut a = [0u8; 8];
        let mut b = [0u8; 8];
        OsEntropy.fill(&mut a);
        OsEntropy.fill(&mut b);
        // Colliding 8-byte draws would be astronomically unlikely.
        assert_ne!(a, b);
    }
}
