//! Statistical checks for the mixer, the hash and the generator.
//!
//! These measure mixing quality on benign inputs; they say nothing about
//! resistance to adversarial input.

use serde::{Deserialize, Serialize};

use crate::rng::Mx3Rng;

/// Avalanche statistics of a 64-bit function over random inputs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvalancheReport {
    pub samples: usize,
    /// Mean output bits flipped per single-bit input flip (ideal: 32).
    pub mean_flips: f64,
    /// Largest |P(output bit j flips | input bit i flipped) - 0.5| over all (i, j).
    pub worst_bias: f64,
}

/// Flip every input bit of `samples` random inputs (drawn from `seed`) and count the output changes.
pub fn avalanche<F: Fn(u64) -> u64>(samples: usize, seed: u64, f: F) -> AvalancheReport {
    assert!(samples > 0);
    let mut rng = Mx3Rng::new(seed);
    let mut flips = vec![[0u32; 64]; 64];
    let mut total = 0u64;

    for _ in 0..samples {
        let x = rng.next_u64();
        let y = f(x);
        for (i, row) in flips.iter_mut().enumerate() {
            let d = y ^ f(x ^ (1u64 << i));
            total += d.count_ones() as u64;
            for (j, cell) in row.iter_mut().enumerate() {
                *cell += ((d >> j) & 1) as u32;
            }
        }
    }

    let n = samples as f64;
    let worst_bias = flips
        .iter()
        .flat_map(|row| row.iter())
        .map(|&c| (c as f64 / n - 0.5).abs())
        .fold(0.0f64, f64::max);

    AvalancheReport { samples, mean_flips: total as f64 / (n * 64.0), worst_bias }
}

/// Per-bit count of ones over a set of outputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitBalance {
    pub count: usize,
    pub ones: Vec<u64>,
}

pub fn bit_balance<I: IntoIterator<Item = u64>>(outputs: I) -> BitBalance {
    let mut ones = vec![0u64; 64];
    let mut count = 0usize;
    for x in outputs {
        count += 1;
        for (j, o) in ones.iter_mut().enumerate() { *o += (x >> j) & 1; }
    }
    BitBalance { count, ones }
}

impl BitBalance {
    /// Largest |P(bit = 1) - 0.5| across the 64 bits.
    pub fn max_deviation(&self) -> f64 {
        if self.count == 0 { return 0.0; }
        let n = self.count as f64;
        self.ones.iter().map(|&o| (o as f64 / n - 0.5).abs()).fold(0.0, f64::max)
    }

    /// True when 0.5 lies inside the Wilson interval of every bit at score `z`.
    pub fn is_unbiased(&self, z: f64) -> bool {
        self.count > 0
            && self.ones.iter().all(|&o| {
                let o = o as usize;
                wilson_lower_bound(o, self.count, z) <= 0.5 && wilson_upper_bound(o, self.count, z) >= 0.5
            })
    }
}

/// Wilson score lower bound for a Bernoulli proportion.
pub fn wilson_lower_bound(successes: usize, trials: usize, z: f64) -> f64 {
    let (center, margin, denom) = wilson_parts(successes, trials, z);
    (center - margin) / denom
}

/// Wilson score upper bound for a Bernoulli proportion.
pub fn wilson_upper_bound(successes: usize, trials: usize, z: f64) -> f64 {
    let (center, margin, denom) = wilson_parts(successes, trials, z);
    (center + margin) / denom
}

fn wilson_parts(successes: usize, trials: usize, z: f64) -> (f64, f64, f64) {
    assert!(trials > 0);
    let n = trials as f64;
    let phat = (successes as f64) / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = phat + z2 / (2.0 * n);
    let margin = z * ((phat * (1.0 - phat) + z2 / (4.0 * n)) / n).sqrt();
    (center, margin, denom)
}
