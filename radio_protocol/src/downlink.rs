//! Downlink: relay → measuring node. Identical framing and crypto as the
//! uplink; the sender-id byte is reinterpreted as the target node's id, and
//! the receiving node's gate is "is this addressed to me". Delivery is
//! simplex: a command lost to airtime collision or range is never retried by
//! this layer.

use tracing::debug;

use crate::error::ProtocolError;
use crate::keys::{EntropySource, KeyStore};
use crate::link::RadioLink;
use crate::pipeline;
use crate::replay::ReplayGuard;
use crate::uplink::Outcome;

/// Relay side: seal and transmit one command token to one node.
pub struct DownlinkSender<K, E, R> {
    keys: K,
    entropy: E,
    radio: R,
}

impl<K: KeyStore, E: EntropySource, R: RadioLink> DownlinkSender<K, E, R> {
    pub fn new(keys: K, entropy: E, radio: R) -> Self {
        Self {
            keys,
            entropy,
            radio,
        }
    }

    pub fn send_command(&mut self, target_id: u8, token: &str) -> Result<(), ProtocolError> {
        let frame = pipeline::seal(&self.keys, &mut self.entropy, target_id, token.as_bytes())?;
        self.radio.send(&frame);
        Ok(())
    }

    pub fn into_radio(self) -> R {
        self.radio
    }
}

/// Measuring-node side: accept commands addressed to this node's own id.
pub struct DownlinkProcessor<K> {
    keys: K,
    own_id: u8,
    replay: ReplayGuard,
}

impl<K: KeyStore> DownlinkProcessor<K> {
    pub fn new(keys: K, own_id: u8) -> Self {
        Self {
            keys,
            own_id,
            replay: ReplayGuard::new(),
        }
    }

    pub fn on_packet(&mut self, frame: &[u8]) -> Outcome {
        let own_id = self.own_id;
        match pipeline::open(
            &self.keys,
            &mut self.replay,
            |target| target != 0 && target == own_id,
            frame,
        ) {
            Ok((sender_id, plaintext)) => Outcome::Dispatched {
                sender_id,
                plaintext,
            },
            Err(reason) => {
                debug!(%reason, frame_len = frame.len(), "downlink frame dropped");
                Outcome::Dropped(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OsEntropy;
    use crate::keys::StaticKeyStore;

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
        StaticKeyStore::new([0x5C; 16], b"downlink-mac-key".to_vec()).unwrap()
    }

    #[test]
    fn command_reaches_addressed_node() {
        let mut tx = DownlinkSender::new(keys(), OsEntropy, CapturedRadio(Vec::new()));
        tx.send_command(1, "CMD:OTA_AP_ON").unwrap();
        let frame = tx.radio.0.pop().unwrap();

        let mut node = DownlinkProcessor::new(keys(), 1);
        assert_eq!(
            node.on_packet(&frame),
            Outcome::Dispatched {
                sender_id: 1,
                plaintext: b"CMD:OTA_AP_ON".to_vec()
            }
        );
    }

    #[test]
    fn other_nodes_ignore_the_command() {
        let mut tx = DownlinkSender::new(keys(), OsEntropy, CapturedRadio(Vec::new()));
        tx.send_command(1, "CMD:OTA_AP_OFF").unwrap();
        let frame = tx.radio.0.pop().unwrap();

        let mut node = DownlinkProcessor::new(keys(), 2);
        assert_eq!(
            node.on_packet(&frame),
            Outcome::Dropped(ProtocolError::Unauthorized)
        );
    }

    #[test]
    fn replayed_command_rejected() {
        let mut tx = DownlinkSender::new(keys(), OsEntropy, CapturedRadio(Vec::new()));
        tx.send_command(1, "CMD:OTA_AP_ON").unwrap();
        let frame = tx.radio.0.pop().unwrap();

        let mut node = DownlinkProcessor::new(keys(), 1);
        assert!(matches!(node.on_packet(&frame), Outcome::Dispatched { .. }));
        assert_eq!(
            node.on_packet(&frame),
            Outcome::Dropped(ProtocolError::ReplayDetected)
        );
    }

    #[test]
    fn target_zero_never_sent() {
        let mut tx = DownlinkSender::new(keys(), OsEntropy, CapturedRadio(Vec::new()));
        assert_eq!(
            tx.send_command(0, "CMD:OTA_AP_ON"),
            Err(ProtocolError::MalformedPacket)
        );
        assert!(tx.radio.0.is_empty());
    }
}
