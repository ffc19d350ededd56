//! Downlink command egress. Operator surfaces (web UI, MQTT bridge) live
//! outside this process; they hand requests to the channel installed here and
//! the sender task seals and transmits them. Fire-and-forget: the desired
//! state we track per node is the last *requested* state, unconfirmed.

use std::collections::VecDeque;
use std::time::Instant;

use once_cell::sync::OnceCell;
use radio_protocol::{DownlinkSender, OsEntropy, StaticKeyStore};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::net::UdpRadio;

pub const CMD_OTA_AP_ON: &str = "CMD:OTA_AP_ON";
pub const CMD_OTA_AP_OFF: &str = "CMD:OTA_AP_OFF";

/// Operator-facing handle; installed once at startup.
pub static COMMANDS: OnceCell<mpsc::Sender<OtaRequest>> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct OtaRequest {
    pub target_id: u8,
    pub enable: bool,
}

/// Last requested OTA-AP state per node, bounded like the replay cache:
/// at most four tracked nodes, oldest-tracked evicted on overflow.
#[derive(Debug, Default)]
pub struct DesiredOta {
    entries: VecDeque<(u8, bool, Instant)>,
}

const MAX_TRACKED_NODES: usize = 4;

impl DesiredOta {
    pub fn set(&mut self, node_id: u8, enable: bool) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.0 == node_id) {
            e.1 = enable;
            e.2 = Instant::now();
            return;
        }
        if self.entries.len() >= MAX_TRACKED_NODES {
            self.entries.pop_front();
        }
        self.entries.push_back((node_id, enable, Instant::now()));
    }

    pub fn get(&self, node_id: u8) -> Option<bool> {
        self.entries.iter().find(|e| e.0 == node_id).map(|e| e.1)
    }
}

pub fn spawn_sender(keys: StaticKeyStore, radio: UdpRadio) {
    let (tx, mut rx) = mpsc::channel::<OtaRequest>(32);
    let _ = COMMANDS.set(tx);

    tokio::spawn(async move {
        let mut sender = DownlinkSender::new(keys, OsEntropy, radio);
        let mut desired = DesiredOta::default();

        while let Some(req) = rx.recv().await {
            let token = if req.enable {
                CMD_OTA_AP_ON
            } else {
                CMD_OTA_AP_OFF
            };
            match sender.send_command(req.target_id, token) {
                Ok(()) => {
                    desired.set(req.target_id, req.enable);
                    info!(
                        target_id = req.target_id,
                        token,
                        desired = desired.get(req.target_id),
                        "downlink command sent (unconfirmed)"
                    );
                }
                // This send is lost; the operator issues the next attempt.
                Err(e) => warn!(%e, target_id = req.target_id, "downlink command aborted"),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desired_state_tracks_last_request() {
        let mut d = DesiredOta::default();
        assert_eq!(d.get(1), None);
        d.set(1, true);
        assert_eq!(d.get(1), Some(true));
        d.set(1, false);
        assert_eq!(d.get(1), Some(false));
    }

    #[test]
    fn overflow_evicts_oldest_tracked_node() {
        let mut d = DesiredOta::default();
        for id in 1..=5u8 {
            d.set(id, true);
        }
        assert_eq!(d.get(1), None);
        assert_eq!(d.get(2), Some(true));
        assert_eq!(d.get(5), Some(true));
    }

    #[test]
    fn updating_does_not_evict() {
        let mut d = DesiredOta::default();
        for id in 1..=4u8 {
            d.set(id, true);
        }
        d.set(1, false);
        assert_eq!(d.get(1), Some(false));
        assert_eq!(d.get(2), Some(true));
    }
}
