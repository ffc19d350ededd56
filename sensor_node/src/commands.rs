//! Downlink command handling: poll the radio, run frames through the
//! downlink pipeline, act on known tokens. Unknown tokens are logged and
//! ignored; they are application chatter, not protocol errors.

use radio_protocol::{DownlinkProcessor, Outcome, RadioLink, StaticKeyStore};
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::net::UdpRadio;
use crate::ota;

pub const CMD_OTA_AP_ON: &str = "CMD:OTA_AP_ON";
pub const CMD_OTA_AP_OFF: &str = "CMD:OTA_AP_OFF";

pub fn spawn(cfg: Config, keys: StaticKeyStore, mut radio: UdpRadio) {
    tokio::spawn(async move {
        let mut processor = DownlinkProcessor::new(keys, cfg.node_id);

        let mut ticker = time::interval(Duration::from_millis(cfg.poll_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            // One poll per loop iteration; frames that the radio overwrote
            // between polls are simply never seen.
            while let Some(frame) = radio.try_receive() {
                match processor.on_packet(&frame) {
                    Outcome::Dispatched { plaintext, .. } => {
                        dispatch_token(&String::from_utf8_lossy(&plaintext));
                    }
                    Outcome::Dropped(reason) => {
                        debug!(%reason, "downlink frame dropped");
                    }
                }
            }
        }
    });
}

fn dispatch_token(token: &str) {
    match token {
        CMD_OTA_AP_ON => {
            info!(token, "command accepted");
            ota::set_update_mode(true);
        }
        CMD_OTA_AP_OFF => {
            info!(token, "command accepted");
            ota::set_update_mode(false);
        }
        other => warn!(token = other, "unrecognized command token ignored"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_flip_update_mode() {
        let _guard = ota::TEST_LOCK.lock().unwrap();
        dispatch_token(CMD_OTA_AP_ON);
        assert!(ota::update_mode());
        dispatch_token(CMD_OTA_AP_OFF);
        assert!(!ota::update_mode());
    }

    #[test]
    fn unknown_token_changes_nothing() {
        let _guard = ota::TEST_LOCK.lock().unwrap();
        dispatch_token(CMD_OTA_AP_OFF);
        dispatch_token("CMD:SELF_DESTRUCT");
        assert!(!ota::update_mode());
    }
}
