// -*- mode: rust; -*-
//
// This file is part of curve25519-hidden.
// See LICENSE for licensing information.

use super::*;
use crate::mul_base_dirty;

use rand::{thread_rng, RngCore};
use std::vec::Vec;

const ITERATIONS: usize = 10_000;

struct BitCounts {
    ones: [u64; 32 * 8],
    entries: u64,
}

impl BitCounts {
    fn new() -> Self {
        BitCounts {
            ones: [0u64; 256],
            entries: 0,
        }
    }

    fn entry(&mut self, arr: &[u8; 32]) {
        for (i, arr_byte) in arr.iter().enumerate() {
            for j in 0..8 {
                self.ones[i * 8 + j] += ((arr_byte >> j) & 0x01) as u64;
            }
        }
        self.entries += 1;
    }

    /// Bits whose frequency of ones falls outside [0.45, 0.55]. With 10,000
    /// samples that is ten standard deviations, so a correct encoder does
    /// not trip it.
    fn outliers(&self) -> Vec<usize> {
        let low = self.entries * 45 / 100;
        let high = self.entries * 55 / 100;
        self.ones
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count < low || count > high)
            .map(|(n, _)| n)
            .collect()
    }
}

#[test]
/// About half of all points have a representative, so hiding a freshly
/// multiplied random point must succeed roughly half of the time.
fn hide_succeeds_about_half_the_time() {
    let mut rng = thread_rng();
    let mut secret = [0u8; 32];
    let mut successes = 0usize;

    for _ in 0..ITERATIONS {
        rng.fill_bytes(&mut secret);
        if hide(&mul_base_dirty(&secret), rng.next_u32() as u8).is_some() {
            successes += 1;
        }
    }

    let expected_range = 4500..=5500;
    assert!(
        expected_range.contains(&successes),
        "successes: {successes} is not in [4500:5500]"
    );
}

#[test]
/// With a random tweak every bit of the representative, including the two
/// padding bits at the top, is set about half of the time.
///
/// (To see this test fail change `rng.next_u32() as u8` to `0u8`.)
fn bitwise_entropy() {
    let mut rng = thread_rng();
    let mut secret = [0u8; 32];
    let mut bitcounts = BitCounts::new();
    let mut i = 0usize;

    while i < ITERATIONS {
        rng.fill_bytes(&mut secret);
        let point = mul_base_dirty(&secret);
        let representative = match hide(&point, rng.next_u32() as u8) {
            None => continue,
            Some(r) => r,
        };

        bitcounts.entry(&representative);
        assert_eq!(
            hex::encode(unhide(&representative).as_bytes()),
            hex::encode(point.as_bytes()),
            "failed point match at iteration {i}"
        );

        i += 1;
    }

    let outliers = bitcounts.outliers();
    assert!(outliers.is_empty(), "bad bits: {:?}", outliers);
}
