// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

//! Generates batches of seeds for statistical testing.
//!
//! `seed-stats backdoor` writes the backdoored seed stream to
//! `out_x25519.bin` and one attempt count per line to
//! `out_x25519_tries.txt`. `seed-stats baseline` writes the same number of
//! honest random seeds to `out_baseline.bin`, the control stream for the
//! randomness tests. Set `RUST_LOG` to adjust verbosity.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{error, info};
use rand_core::OsRng;

use x25519_klepto::stats::{write_baseline, SeedRecorder};
use x25519_klepto::{initialize, SeedGenerator};

const RECORDS: u64 = 100_000;

const SEED_FILE: &str = "out_x25519.bin";
const TRIES_FILE: &str = "out_x25519_tries.txt";
const BASELINE_FILE: &str = "out_baseline.bin";

#[derive(Parser, Debug)]
#[command(name = "seed-stats", version)]
#[command(about = "Write seed streams for randomness testing")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,

    /// Number of 64-byte records to write
    #[arg(short = 'n', long, global = true, default_value_t = RECORDS)]
    records: u64,

    /// Existing directory to write the output files into
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Backdoored seeds and their attempt counts
    Backdoor,
    /// Honest seeds straight from the operating system's random source
    Baseline,
}

enum Failure {
    Io(io::Error),
    Generator(x25519_klepto::Error),
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Failure {
        Failure::Io(err)
    }
}

impl From<x25519_klepto::Error> for Failure {
    fn from(err: x25519_klepto::Error) -> Failure {
        Failure::Generator(err)
    }
}

fn create(dir: &Path, name: &str) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(dir.join(name))?))
}

fn run_backdoor(dir: &Path, records: u64) -> Result<(), Failure> {
    let mut recorder = SeedRecorder::new(create(dir, SEED_FILE)?, create(dir, TRIES_FILE)?);

    let (adversary_public, _adversary_secret) = initialize(&mut OsRng);
    let generator = SeedGenerator::new(adversary_public);

    for i in 0..records {
        let (pair, attempts) = generator.generate_with_attempts(&mut OsRng)?;
        recorder.record(&pair, attempts)?;

        if (i + 1) % (records / 10).max(1) == 0 {
            info!("{}/{} seed pairs", i + 1, records);
        }
    }

    let written = recorder.records();
    let average = recorder.average_attempts().unwrap_or(0.0);
    let max = recorder.max_attempts();
    recorder.finish()?;

    info!("wrote {} seed pairs to {}", written, dir.join(SEED_FILE).display());
    info!(
        "average {:.2} attempts to find valid seeds, max {}",
        average, max
    );
    Ok(())
}

fn run_baseline(dir: &Path, records: u64) -> Result<(), Failure> {
    write_baseline(&mut OsRng, create(dir, BASELINE_FILE)?, records)?;
    info!(
        "wrote {} random seed pairs to {}",
        records,
        dir.join(BASELINE_FILE).display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let start = Instant::now();
    let result = match cli.mode {
        Mode::Backdoor => run_backdoor(&cli.dir, cli.records),
        Mode::Baseline => run_baseline(&cli.dir, cli.records),
    };

    match result {
        Ok(()) => {
            info!("time taken: {:.3}s", start.elapsed().as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(Failure::Io(err)) => {
            error!("could not write statistics: {}", err);
            ExitCode::FAILURE
        }
        Err(Failure::Generator(err)) => {
            error!("seed generation failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
