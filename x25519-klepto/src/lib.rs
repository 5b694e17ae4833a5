// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

//! A kleptographic backdoor for seeded key generation, built on X25519 and
//! Elligator2.
//!
//! Post-quantum KEMs like Kyber derive their keys from a 64-byte random
//! seed, half of which ends up in the public key. A [`SeedGenerator`]
//! produces seeds that look just as random, but whose public half lets the
//! holder of an [`AdversarySecret`] narrow the secret half down to eight
//! [`RecoveryCandidates`].
//!
//! ```rust
//! use rand_core::OsRng;
//! use x25519_klepto::{initialize, recover_candidates, SeedGenerator};
//!
//! // Once, by the adversary.
//! let (adversary_public, adversary_secret) = initialize(&mut OsRng);
//!
//! // Inside the victim's key generation.
//! let generator = SeedGenerator::new(adversary_public);
//! let seeds = generator.generate(&mut OsRng)?;
//!
//! // Later, from the published public seed.
//! let candidates = recover_candidates(seeds.public_seed(), &adversary_secret);
//! assert!(candidates.contains(seeds.private_seed()));
//! # Ok::<(), x25519_klepto::Error>(())
//! ```
//!
//! This is research code for studying backdoors, not for deployment.

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

//------------------------------------------------------------------------
// x25519-klepto public modules
//------------------------------------------------------------------------

pub mod errors;
pub mod kem;

#[cfg(feature = "std")]
pub mod stats;

//------------------------------------------------------------------------
// x25519-klepto internal modules
//------------------------------------------------------------------------

mod adversary;
mod retrieve;
mod seed;
mod tweak;

pub use crate::adversary::{initialize, AdversaryPublicKey, AdversarySecret};
pub use crate::errors::Error;
pub use crate::kem::{backdoored_keypair, recover_keypair, Recovered, SeededKem};
pub use crate::retrieve::{recover_candidates, RecoveryCandidates};
pub use crate::seed::{SeedGenerator, SeedPair, MAX_ATTEMPTS, SEED_BYTES, SEED_HALF_BYTES};
pub use crate::tweak::{TWEAK_MASK, TWEAK_TABLE};
