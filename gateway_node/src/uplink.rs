use radio_protocol::{AllowList, Outcome, RadioLink, StaticKeyStore, UplinkProcessor};
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::Config;
use crate::history::{History, Measurement};
use crate::measurement::{self, fmt_age};
use crate::net::UdpRadio;

/// Radio poll loop: every tick, drain whatever frames arrived and run each
/// through the uplink pipeline. Dropped frames are logged and gone; nothing
/// goes back over the air.
pub fn spawn(cfg: Config, keys: StaticKeyStore, mut radio: UdpRadio) {
    tokio::spawn(async move {
        let allow = AllowList::new(cfg.allowed_ids.iter().copied());
        let mut processor = UplinkProcessor::new(keys, allow);
        let mut history = History::new();

        let mut ticker = time::interval(Duration::from_millis(cfg.poll_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            while let Some(frame) = radio.try_receive() {
                match processor.on_packet(&frame) {
                    Outcome::Dispatched {
                        sender_id,
                        plaintext,
                    } => {
                        let text = String::from_utf8_lossy(&plaintext);
                        dispatch(sender_id, &text, &mut history);
                    }
                    Outcome::Dropped(reason) => {
                        warn!(%reason, frame_len = frame.len(), "encrypted frame invalid; discarded");
                    }
                }
            }
        }
    });
}

fn dispatch(sender_id: u8, payload: &str, history: &mut History) {
    let parsed = measurement::parse_payload(payload);
    let value = parsed.water_cm.clone().unwrap_or_else(|| "-".into());

    history.push(Measurement {
        sender_id,
        value: value.clone(),
        status: parsed.status.clone(),
        received_at: std::time::Instant::now(),
    });

    info!(
        event = "uplink_rx",
        sender_id,
        water_cm = %value,
        status = %parsed.status,
        history = history.len(),
    );

    // Trace line mirroring the old status display, ages included.
    for (i, m) in history.iter().enumerate() {
        tracing::debug!(
            slot = i + 1,
            value = %m.value,
            age = %fmt_age(m.received_at.elapsed()),
            "history"
        );
    }
}
