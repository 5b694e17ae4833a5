// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

//! Plugging the generator into a seeded key-encapsulation mechanism.
//!
//! Lattice KEMs such as Kyber derive their whole keypair from a 64-byte
//! seed and copy the first half of it (the matrix seed) into the public key.
//! [`backdoored_keypair`] is the compromised key generation of such a KEM,
//! and [`recover_keypair`] is what the adversary runs on a published public
//! key.

use log::warn;
use rand_core::{CryptoRng, RngCore};

use crate::adversary::AdversarySecret;
use crate::errors::Error;
use crate::retrieve::recover_candidates;
use crate::seed::{SeedGenerator, SEED_BYTES, SEED_HALF_BYTES};

/// A key-encapsulation mechanism with deterministic, seeded key generation.
pub trait SeededKem {
    /// The KEM's public key.
    type PublicKey: PartialEq;
    /// The KEM's secret key.
    type SecretKey;

    /// Derive a keypair from `public_seed || private_seed`.
    fn keypair_from_seed(seed: &[u8; SEED_BYTES]) -> (Self::PublicKey, Self::SecretKey);

    /// Extract the public seed that `public_key` carries in clear.
    fn public_seed(public_key: &Self::PublicKey) -> [u8; SEED_HALF_BYTES];
}

/// A keypair reconstructed from a published public key.
pub struct Recovered<K: SeededKem> {
    /// The regenerated public key, equal to the published one.
    pub public_key: K::PublicKey,
    /// The victim's secret key.
    pub secret_key: K::SecretKey,
    /// The victim's private seed.
    pub private_seed: [u8; SEED_HALF_BYTES],
    /// Index into [`TWEAK_TABLE`](crate::TWEAK_TABLE) of the matching
    /// candidate.
    pub candidate: usize,
}

/// Compromised key generation: draw the seed from `generator` instead of
/// from the random source directly.
pub fn backdoored_keypair<K, R>(
    generator: &SeedGenerator,
    csprng: &mut R,
) -> Result<(K::PublicKey, K::SecretKey), Error>
where
    K: SeededKem,
    R: RngCore + CryptoRng + ?Sized,
{
    let seeds = generator.generate(csprng)?;
    Ok(K::keypair_from_seed(&seeds.to_bytes()))
}

/// Rebuild the victim's keypair from their public key.
///
/// Each candidate private seed is completed into a keypair, and the
/// resulting public key compared with `public_key`.
///
/// # Errors
///
/// [`Error::RecoveryMismatch`] unless exactly one candidate reproduces
/// `public_key`, e.g. when the key was not generated by a
/// [`SeedGenerator`] embedding `adversary`'s public key.
pub fn recover_keypair<K: SeededKem>(
    public_key: &K::PublicKey,
    adversary: &AdversarySecret,
) -> Result<Recovered<K>, Error> {
    let public_seed = K::public_seed(public_key);
    let candidates = recover_candidates(&public_seed, adversary);

    let mut seed = zeroize::Zeroizing::new([0u8; SEED_BYTES]);
    seed[..SEED_HALF_BYTES].copy_from_slice(&public_seed);

    let mut found = None;
    let mut matches = 0usize;
    for (index, candidate) in candidates.iter().enumerate() {
        seed[SEED_HALF_BYTES..].copy_from_slice(candidate);
        let (pk, sk) = K::keypair_from_seed(&seed);
        if pk == *public_key {
            matches += 1;
            found.get_or_insert(Recovered {
                public_key: pk,
                secret_key: sk,
                private_seed: *candidate,
                candidate: index,
            });
        }
    }

    match found {
        Some(recovered) if matches == 1 => Ok(recovered),
        _ => {
            warn!("{} of 8 candidates reproduce the public key", matches);
            Err(Error::RecoveryMismatch { matches })
        }
    }
}
