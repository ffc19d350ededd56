//! Uplink: measuring node → relay. The sender seals telemetry payloads; the
//! processor runs the receive pipeline with the allow-list as its identity
//! gate and hands accepted plaintext to the caller's dispatch.

use tracing::debug;

use crate::access::AllowList;
use crate::error::ProtocolError;
use crate::keys::{EntropySource, KeyStore};
use crate::link::RadioLink;
use crate::pipeline;
use crate::replay::ReplayGuard;

/// Verdict for one received frame. A dropped frame is gone for good: no
/// retry, no NAK, nothing sent back over the radio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Dispatched { sender_id: u8, plaintext: Vec<u8> },
    Dropped(ProtocolError),
}

/// Measuring-node side: seal and transmit one reading per measurement cycle.
pub struct UplinkSender<K, E, R> {
    keys: K,
    entropy: E,
    radio: R,
    sender_id: u8,
}

impl<K: KeyStore, E: EntropySource, R: RadioLink> UplinkSender<K, E, R> {
    pub fn new(keys: K, entropy: E, radio: R, sender_id: u8) -> Self {
        Self {
            keys,
            entropy,
            radio,
            sender_id,
        }
    }

    /// Fire-and-forget. A `CryptoFailure` aborts only this send; the next
    /// measurement cycle produces the next attempt.
    pub fn send_reading(&mut self, payload: &[u8]) -> Result<(), ProtocolError> {
        let frame = pipeline::seal(&self.keys, &mut self.entropy, self.sender_id, payload)?;
        self.radio.send(&frame);
        Ok(())
    }

    /// Hand the radio back, e.g. to a test harness inspecting sent frames.
    pub fn into_radio(self) -> R {
        self.radio
    }
}

/// Relay side: validate, decrypt and dispatch incoming telemetry.
pub struct UplinkProcessor<K> {
    keys: K,
    allow: AllowList,
    replay: ReplayGuard,
}

impl<K: KeyStore> UplinkProcessor<K> {
    pub fn new(keys: K, allow: AllowList) -> Self {
        Self {
            keys,
            allow,
            replay: ReplayGuard::new(),
        }
    }

    pub fn on_packet(&mut self, frame: &[u8]) -> Outcome {
        let allow = &self.allow;
        match pipeline::open(
            &self.keys,
            &mut self.replay,
            |sid| allow.is_allowed(sid),
            frame,
        ) {
            Ok((sender_id, plaintext)) => Outcome::Dispatched {
                sender_id,
                plaintext,
            },
            Err(reason) => {
                debug!(%reason, frame_len = frame.len(), "uplink frame dropped");
                Outcome::Dropped(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::StaticKeyStore;
    use crate::{NONCE_LEN, OsEntropy};

    struct CapturedRadio(Vec<Vec<u8>>);

    impl RadioLink for CapturedRadio {
        fn send(&mut self, frame: &[u8]) {
            self.0.push(frame.to_vec());
        }
        fn try_receive(&mut self) -> Option<Vec<u8>> {
            None
        }
    }

    fn keys() -> StaticKeyStore {
        StaticKeyStore::new([0x2A; 16], b"uplink-mac-key".to_vec()).unwrap()
    }

    #[test]
    fn sender_to_processor_roundtrip() {
        let mut tx = UplinkSender::new(keys(), OsEntropy, CapturedRadio(Vec::new()), 1);
        tx.send_reading(b"18.6").unwrap();
        let frame = tx.radio.0.pop().unwrap();
        assert_eq!(frame.len(), 21);

        let mut rx = UplinkProcessor::new(keys(), AllowList::new([1]));
        assert_eq!(
            rx.on_packet(&frame),
            Outcome::Dispatched {
                sender_id: 1,
                plaintext: b"18.6".to_vec()
            }
        );
    }

    #[test]
    fn unlisted_sender_dropped() {
        let mut tx = UplinkSender::new(keys(), OsEntropy, CapturedRadio(Vec::new()), 9);
        tx.send_reading(b"18.6").unwrap();
        let frame = tx.radio.0.pop().unwrap();

        let mut rx = UplinkProcessor::new(keys(), AllowList::new([1]));
        assert_eq!(
            rx.on_packet(&frame),
            Outcome::Dropped(ProtocolError::Unauthorized)
        );
    }

    #[test]
    fn fresh_nonce_per_send() {
        let mut tx = UplinkSender::new(keys(), OsEntropy, CapturedRadio(Vec::new()), 1);
        tx.send_reading(b"18.6").unwrap();
        tx.send_reading(b"18.6").unwrap();
        let a = &tx.radio.0[0];
        let b = &tx.radio.0[1];
        assert_ne!(a[1..1 + NONCE_LEN], b[1..1 + NONCE_LEN]);
        // Fresh keystream means fresh ciphertext for equal plaintext.
        assert_ne!(a[9..13], b[9..13]);
    }
}
