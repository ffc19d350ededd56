//! Remote-update access-point mode flag. The actual firmware-update
//! transport is an external concern; the protocol layer only flips and
//! reports this desired mode.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

static UPDATE_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_update_mode(on: bool) {
    let was = UPDATE_MODE.swap(on, Ordering::SeqCst);
    if was != on {
        if on {
            info!("update mode ENABLED (access point requested on)");
        } else {
            info!("update mode disabled (access point requested off)");
        }
    }
}

pub fn update_mode() -> bool {
    UPDATE_MODE.load(Ordering::SeqCst)
}

/// Serializes tests that poke the process-global flag.
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
