/// The half-duplex radio, owned by the surrounding I/O layer. Sends are
/// fire-and-forget (airtime loss is invisible here) and receives are a
/// non-blocking poll: a frame is only observed when the caller's loop gets
/// around to polling, and frames overwritten in the radio's buffer before
/// then are silently gone. The protocol tolerates arbitrary delivery gaps.
pub trait RadioLink {
    fn send(&mut self, frame: &[u8]);
    fn try_receive(&mut self) -> Option<Vec<u8>>;
}
