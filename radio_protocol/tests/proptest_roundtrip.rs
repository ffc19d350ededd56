use proptest::collection::vec;
use proptest::prelude::*;

use radio_protocol::{
    AllowList, EntropySource, Outcome, ProtocolError, RadioLink, StaticKeyStore, UplinkProcessor,
    UplinkSender,
};

fn keys() -> StaticKeyStore {
    StaticKeyStore::new([0x4B; 16], b"shared-link-mac-key".to_vec()).unwrap()
}

struct SeqEntropy(u64);

impl EntropySource for SeqEntropy {
    fn fill(&mut self, buf: &mut [u8]) {
        buf.copy_from_slice(&self.0.to_le_bytes());
        self.0 += 1;
    }
}

#[derive(Default)]
struct MockRadio {
    sent: Vec<Vec<u8>>,
}

impl RadioLink for MockRadio {
    fn send(&mut self, frame: &[u8]) {
        self.sent.push(frame.to_vec());
    }
    fn try_receive(&mut self) -> Option<Vec<u8>> {
        None
    }
}

fn seal_uplink(sender_id: u8, payload: &[u8], seed: u64) -> Vec<u8> {
    let mut tx = UplinkSender::new(keys(), SeqEntropy(seed), MockRadio::default(), sender_id);
    tx.send_reading(payload).unwrap();
    tx.into_radio().sent.pop().unwrap()
}

proptest! {
    #[test]
    fn any_payload_roundtrips(
        sender_id in 1u8..=255,
        payload in vec(any::<u8>(), 1..96),
        seed in any::<u64>(),
    ) {
        let frame = seal_uplink(sender_id, &payload, seed);
        prop_assert_eq!(frame.len(), payload.len() + 17);

        let mut relay = UplinkProcessor::new(keys(), AllowList::new([sender_id]));
        prop_assert_eq!(
            relay.on_packet(&frame),
            Outcome::Dispatched { sender_id, plaintext: payload }
        );
    }

    #[test]
    fn any_single_bit_flip_is_dropped(
        sender_id in 1u8..=255,
        payload in vec(any::<u8>(), 1..48),
        seed in any::<u64>(),
        byte_sel in any::<proptest::sample::Index>(),
        bit in 0u8..8,
    ) {
        let frame = seal_uplink(sender_id, &payload, seed);
        let byte = byte_sel.index(frame.len());

        let mut tampered = frame;
        tampered[byte] ^= 1 << bit;

        // Every nonzero id is allow-listed, so only a flip that lands on the
        // reserved id 0 may surface as Unauthorized instead of a MAC failure.
        let mut relay = UplinkProcessor::new(keys(), AllowList::new(1u8..=255));
        let expected = if tampered[0] == 0 {
            ProtocolError::Unauthorized
        } else {
            ProtocolError::AuthenticationFailure
        };
        prop_assert_eq!(relay.on_packet(&tampered), Outcome::Dropped(expected));
    }

    #[test]
    fn arbitrary_junk_never_dispatches(bytes in vec(any::<u8>(), 0..64)) {
        let mut relay = UplinkProcessor::new(keys(), AllowList::new(1u8..=255));
        prop_assert!(matches!(relay.on_packet(&bytes), Outcome::Dropped(_)));
    }
}
