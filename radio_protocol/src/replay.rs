//! Bounded per-sender recency cache of accepted nonces.
//!
//! State is volatile and scoped to the process lifetime: a restart clears it
//! and reopens the replay window. Likewise, once 8 newer nonces have been
//! accepted for a sender, an older nonce becomes replayable again. Both are
//! accepted limitations of a bounded in-memory guard, not bugs.

use std::collections::VecDeque;

use crate::NONCE_LEN;
use crate::error::ProtocolError;

/// Nonces remembered per sender.
pub const REPLAY_WINDOW: usize = 8;

/// Senders tracked at once. When a new sender appears beyond this bound, the
/// oldest-tracked sender's window is evicted wholesale (explicit policy; the
/// alternative of rejecting the new sender would let four chatty senders
/// lock out a reconfigured fifth forever).
pub const MAX_TRACKED_SENDERS: usize = 4;

#[derive(Debug)]
struct SenderWindow {
    sender_id: u8,
    nonces: VecDeque<u64>,
}

#[derive(Debug)]
pub struct ReplayGuard {
    slots: VecDeque<SenderWindow>,
    window: usize,
    max_senders: usize,
}

impl ReplayGuard {
    pub fn new() -> Self {
        Self::with_capacity(MAX_TRACKED_SENDERS, REPLAY_WINDOW)
    }

    pub fn with_capacity(max_senders: usize, window: usize) -> Self {
        Self {
            slots: VecDeque::with_capacity(max_senders),
            window,
            max_senders,
        }
    }

    /// Accept `nonce` for `sender_id` unless it was already accepted within
    /// the window. Accepting inserts immediately, so the read-then-write is
    /// atomic with respect to a second copy of the same packet.
    ///
    /// Eviction inside a window is strictly age-based (FIFO), never
    /// value-based: out-of-order delivery within the window is tolerated.
    pub fn check_and_remember(
        &mut self,
        sender_id: u8,
        nonce: &[u8; NONCE_LEN],
    ) -> Result<(), ProtocolError> {
        let nonce = u64::from_le_bytes(*nonce);

        if let Some(slot) = self.slots.iter_mut().find(|s| s.sender_id == sender_id) {
            if slot.nonces.contains(&nonce) {
                return Err(ProtocolError::ReplayDetected);
            }
            slot.nonces.push_back(nonce);
            if slot.nonces.len() > self.window {
                slot.nonces.pop_front();
            }
            return Ok(());
        }

        // First sighting of this sender: lazily allocate a slot.
        if self.slots.len() >= self.max_senders {
            self.slots.pop_front();
        }
        let mut nonces = VecDeque::with_capacity(self.window);
        nonces.push_back(nonce);
        self.slots.push_back(SenderWindow { sender_id, nonces });
        Ok(())
    }

    pub fn tracked_senders(&self) -> usize {
        self.slots.len()
    }
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::new()
    }
}
