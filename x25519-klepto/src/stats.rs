// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

//! Recording generated seeds for offline statistical analysis.

use std::io::{self, Write};

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::seed::{SeedPair, SEED_BYTES};

/// Size of one record in the seed stream.
pub const RECORD_BYTES: usize = SEED_BYTES;

/// Writes seed pairs as raw 64-byte records to `seeds`, and the attempt
/// count of each as a decimal line to `tries`.
///
/// The seed stream is meant for randomness test suites, which should find
/// it indistinguishable from the control stream of [`write_baseline`].
pub struct SeedRecorder<S: Write, T: Write> {
    seeds: S,
    tries: T,
    records: u64,
    total_attempts: u64,
    max_attempts: usize,
}

impl<S: Write, T: Write> SeedRecorder<S, T> {
    /// Record into the given seed and attempt-count streams.
    pub fn new(seeds: S, tries: T) -> Self {
        SeedRecorder {
            seeds,
            tries,
            records: 0,
            total_attempts: 0,
            max_attempts: 0,
        }
    }

    /// Append one generated pair.
    ///
    /// # Errors
    ///
    /// Any error of either stream. The seed record is written first, so
    /// after an error the two streams may disagree on the record count and
    /// should be discarded.
    pub fn record(&mut self, seeds: &SeedPair, attempts: usize) -> io::Result<()> {
        let line = format!("{}\n", attempts);
        self.seeds.write_all(&seeds.to_bytes()[..])?;
        self.tries.write_all(line.as_bytes())?;

        self.records += 1;
        self.total_attempts += attempts as u64;
        self.max_attempts = self.max_attempts.max(attempts);
        Ok(())
    }

    /// Number of pairs recorded so far.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Sum of the attempt counts of all recorded pairs.
    pub fn total_attempts(&self) -> u64 {
        self.total_attempts
    }

    /// Largest attempt count seen, zero before the first record.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Mean attempts per record, or `None` before the first record.
    pub fn average_attempts(&self) -> Option<f64> {
        if self.records == 0 {
            return None;
        }
        Some(self.total_attempts as f64 / self.records as f64)
    }

    /// Flush both streams and hand them back.
    pub fn finish(mut self) -> io::Result<(S, T)> {
        self.seeds.flush()?;
        self.tries.flush()?;
        Ok((self.seeds, self.tries))
    }
}

/// Write `records` honest 64-byte seeds drawn straight from `csprng`.
///
/// This is what an uncompromised seeded key generation would consume, and
/// serves as the control stream when testing the output of a
/// [`SeedRecorder`] for randomness.
pub fn write_baseline<R, W>(csprng: &mut R, mut out: W, records: u64) -> io::Result<W>
where
    R: RngCore + CryptoRng + ?Sized,
    W: Write,
{
    let mut record = Zeroizing::new([0u8; RECORD_BYTES]);
    for _ in 0..records {
        csprng.fill_bytes(&mut record[..]);
        out.write_all(&record[..])?;
    }
    out.flush()?;
    Ok(out)
}
