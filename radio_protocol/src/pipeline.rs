//! The one shared build/verify pipeline used by both link directions.
//! Uplink and downlink must never disagree on which bytes the tag covers,
//! so there is exactly one seal and one open in the whole crate.

use crate::cipher;
use crate::codec::{self, Packet};
use crate::error::ProtocolError;
use crate::keys::{EntropySource, KeyStore};
use crate::mac;
use crate::replay::ReplayGuard;
use crate::{HEADER_LEN, NONCE_LEN, TAG_LEN};

/// Build one wire frame. `id_byte` is the sender id on uplink and the target
/// id on downlink; the tag always covers `id_byte ‖ nonce ‖ ciphertext`.
pub(crate) fn seal<K: KeyStore, E: EntropySource>(
    keys: &K,
    entropy: &mut E,
    id_byte: u8,
    plaintext: &[u8],
) -> Result<Vec<u8>, ProtocolError> {
    if id_byte == 0 || plaintext.is_empty() {
        return Err(ProtocolError::MalformedPacket);
    }

    let mut nonce = [0u8; NONCE_LEN];
    entropy.fill(&mut nonce);

    let ciphertext = cipher::encrypt(keys.aes_key(), &nonce, plaintext)?;

    let mut frame = Vec::with_capacity(HEADER_LEN + ciphertext.len() + TAG_LEN);
    frame.push(id_byte);
    frame.extend_from_slice(&nonce);
    frame.extend_from_slice(&ciphertext);
    let tag = mac::compute_tag(keys.mac_key(), &frame)?;
    frame.extend_from_slice(&tag);
    Ok(frame)
}

/// Verify and open one received frame. Strictly ordered, terminal on first
/// failure: decode → identity gate → tag → replay → decrypt. The gate runs
/// before any MAC work so unauthorized traffic costs no crypto, and the tag
/// is checked before the replay guard and decryption so unauthenticated
/// content neither pollutes the nonce window nor gets decrypted.
pub(crate) fn open<K: KeyStore>(
    keys: &K,
    replay: &mut ReplayGuard,
    id_gate: impl FnOnce(u8) -> bool,
    frame: &[u8],
) -> Result<(u8, Vec<u8>), ProtocolError> {
    let packet = Packet::decode(frame)?;

    if !id_gate(packet.sender_id) {
        return Err(ProtocolError::Unauthorized);
    }

    if !mac::verify_tag(keys.mac_key(), codec::signed_portion(frame), &packet.tag)? {
        return Err(ProtocolError::AuthenticationFailure);
    }

    replay.check_and_remember(packet.sender_id, &packet.nonce)?;

    let plaintext = cipher::decrypt(keys.aes_key(), &packet.nonce, &packet.ciphertext)?;
    Ok((packet.sender_id, plaintext))
}
