//! Wire framing: `[sender_id:1][nonce:8][ciphertext:1..N][tag:8]`.
//! Fixed field order, no length fields; the ciphertext length is implied by
//! the total frame length.

use crate::error::ProtocolError;
use crate::{HEADER_LEN, MIN_FRAME_LEN, NONCE_LEN, TAG_LEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub sender_id: u8,
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

impl Packet {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.ciphertext.len() + TAG_LEN);
        out.push(self.sender_id);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Fails on anything shorter than 18 bytes; that bound already excludes
    /// frames with an empty ciphertext.
    pub fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        if frame.len() < MIN_FRAME_LEN {
            return Err(ProtocolError::MalformedPacket);
        }
        let ct_end = frame.len() - TAG_LEN;

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&frame[1..HEADER_LEN]);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&frame[ct_end..]);

        Ok(Self {
            sender_id: frame[0],
            nonce,
            ciphertext: frame[HEADER_LEN..ct_end].to_vec(),
            tag,
        })
    }
}

/// The authenticated portion of a decoded frame: everything before the tag.
pub(crate) fn signed_portion(frame: &[u8]) -> &[u8] {
    &frame[..frame.len() - TAG_LEN]
}
