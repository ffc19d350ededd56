//! Depth measurement chain. The real ADC lives outside this process; here a
//! simulated probe produces averaged millivolt readings with a slow drift,
//! and a fixed scale/offset calibration converts them to centimeters of
//! water above the probe.

use rand::Rng;

/// Correction factor between raw ADC millivolts and the probe's output.
const MV_SCALE: f64 = 1.0;
/// Probe output at zero depth.
const OFFSET_MV: u32 = 480;
/// Probe full-scale span in millivolts.
const VREF_MV: u32 = 2820;
/// Depth at full scale.
const MAX_CM: f64 = 500.0;

/// Plausibility bounds for a single reading.
pub const DEPTH_MIN_CM: f64 = 0.0;
pub const DEPTH_MAX_CM: f64 = 250.0;

pub fn mv_to_depth_cm(mv: u32) -> f64 {
    let scaled = mv as f64 * MV_SCALE;
    let adjusted = (scaled - OFFSET_MV as f64).max(0.0);
    adjusted / VREF_MV as f64 * MAX_CM
}

pub fn plausible(depth_cm: f64) -> bool {
    (DEPTH_MIN_CM..=DEPTH_MAX_CM).contains(&depth_cm)
}

/// Uplink payload convention: ASCII decimal with exactly one fractional
/// digit, e.g. `18.6`.
pub fn format_payload(depth_cm: f64) -> String {
    format!("{depth_cm:.1}")
}

/// Simulated pressure probe: a baseline level plus jitter, sampled `n` times
/// and averaged like the ADC path it stands in for.
pub struct DepthProbe {
    baseline_mv: i64,
}

impl DepthProbe {
    pub fn new() -> Self {
        Self { baseline_mv: 585 } // ~18.6 cm with the calibration above
    }

    pub fn read_averaged_mv(&mut self, samples: u32) -> u32 {
        let mut rng = rand::rng();
        // baseline wanders a little between cycles
        self.baseline_mv = (self.baseline_mv + rng.random_range(-3..=3)).max(0);

        let mut acc: i64 = 0;
        for _ in 0..samples.max(1) {
            acc += self.baseline_mv + rng.random_range(-8..=8);
        }
        (acc / samples.max(1) as i64).max(0) as u32
    }
}

impl Default for DepthProbe {
    fn default() -> Self {
        Self::new()
    }
}
