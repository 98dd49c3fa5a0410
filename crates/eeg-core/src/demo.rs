//! Deterministic placeholder signals for the offline demo view.

use crate::bands::Band;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

pub const DEMO_SAMPLE_RATE_HZ: f32 = 256.0;

/// `channels x samples` pseudo-EEG: a per-channel alpha/beta mix plus noise.
pub fn trial_matrix(seed: u64, channels: usize, samples: usize) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..channels)
        .map(|_| {
            let alpha_hz = rng.gen_range(8.5..12.5);
            let beta_hz = rng.gen_range(14.0..28.0);
            let alpha_amp = rng.gen_range(10.0..30.0);
            let beta_amp = rng.gen_range(2.0..8.0);
            let phase = rng.gen_range(0.0..TAU);
            (0..samples)
                .map(|i| {
                    let t = i as f32 / DEMO_SAMPLE_RATE_HZ;
                    alpha_amp * (TAU * alpha_hz * t + phase).sin()
                        + beta_amp * (TAU * beta_hz * t).sin()
                        + rng.gen_range(-3.0..3.0)
                })
                .collect()
        })
        .collect()
}

/// Random relative bandpower per band, summing to 1.
pub fn band_shares(seed: u64) -> Vec<(Band, f32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let raw: Vec<f32> = Band::ALL.iter().map(|_| rng.gen_range(0.1..1.0)).collect();
    let total: f32 = raw.iter().sum();
    Band::ALL
        .iter()
        .zip(raw)
        .map(|(b, v)| (*b, v / total))
        .collect()
}
