use radio_protocol::{OsEntropy, StaticKeyStore, UplinkSender};
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::Config;
use crate::measurement::{self, DepthProbe};
use crate::net::UdpRadio;

/// Measure → format → seal → transmit, once per interval. No retry: a failed
/// or lost frame is superseded by the next cycle's reading.
pub fn spawn(cfg: Config, keys: StaticKeyStore, radio: UdpRadio) {
    tokio::spawn(async move {
        let mut sender = UplinkSender::new(keys, OsEntropy, radio, cfg.node_id);
        let mut probe = DepthProbe::new();
        let mut seq = 0u64;

        let mut ticker = time::interval(Duration::from_millis(cfg.measure_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let mv = probe.read_averaged_mv(32);
            let depth_cm = measurement::mv_to_depth_cm(mv);
            let ok = measurement::plausible(depth_cm);
            let payload = measurement::format_payload(depth_cm);

            match sender.send_reading(payload.as_bytes()) {
                Ok(()) => info!(
                    event = "uplink_tx",
                    seq,
                    mv,
                    depth_cm = %payload,
                    status = if ok { "OK" } else { "ERR" },
                ),
                // Aborts this send only; next cycle retries naturally.
                Err(e) => warn!(%e, seq, "uplink send aborted"),
            }

            seq = seq.wrapping_add(1);
        }
    });
}
