use thiserror::Error;

/// Everything that can make a packet get dropped. All variants are recovered
/// locally by discarding the packet; nothing is ever reported back over the
/// radio (the link has no error or ack channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Frame too short, or it would imply an empty ciphertext.
    #[error("malformed packet")]
    MalformedPacket,

    /// Sender id not on the allow-list (uplink) or not our own id (downlink).
    #[error("unauthorized sender id")]
    Unauthorized,

    /// Truncated HMAC did not match.
    #[error("authentication tag mismatch")]
    AuthenticationFailure,

    /// Nonce already accepted within the sender's replay window.
    #[error("replayed nonce")]
    ReplayDetected,

    /// Primitive-level setup failure (key length etc.); never data-dependent.
    #[error("crypto primitive failure")]
    CryptoFailure,
}
