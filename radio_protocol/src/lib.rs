// lib.rs — secure datagram protocol shared by the sensor and gateway nodes.
//
// One packet = one authenticated datagram over a half-duplex LoRa link:
//   [sender_id:1][nonce:8][ciphertext:1..N][tag:8]
// No handshake, no session state, no acknowledgments. Both directions use
// the identical framing and crypto; only the identity gate differs (uplink
// checks the allow-list, downlink checks the receiving node's own id).

pub mod access;
pub mod cipher;
pub mod codec;
pub mod downlink;
pub mod error;
pub mod keys;
pub mod link;
pub mod mac;
pub(crate) mod pipeline;
pub mod replay;
pub mod uplink;

pub use access::AllowList;
pub use codec::Packet;
pub use downlink::{DownlinkProcessor, DownlinkSender};
pub use error::ProtocolError;
pub use keys::{EntropySource, KeyError, KeyStore, OsEntropy, StaticKeyStore};
pub use link::RadioLink;
pub use replay::ReplayGuard;
pub use uplink::{Outcome, UplinkProcessor, UplinkSender};

/// AES-128 key width.
pub const AES_KEY_LEN: usize = 16;

/// Per-message nonce width. Doubles as the CTR initialization value and the
/// replay-detection key; must never repeat under one AES key.
pub const NONCE_LEN: usize = 8;

/// Truncated HMAC-SHA256 tag width on the wire.
pub const TAG_LEN: usize = 8;

/// Clear header: sender id followed by the nonce.
pub const HEADER_LEN: usize = 1 + NONCE_LEN;

/// Smallest valid frame: header, one ciphertext byte, tag.
pub const MIN_FRAME_LEN: usize = HEADER_LEN + 1 + TAG_LEN;
