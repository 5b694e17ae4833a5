// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

//! A stand-in for a seeded lattice KEM.
//!
//! Like Kyber, the public key starts with the public seed in clear, and
//! everything else is a deterministic function of the whole 64-byte seed.

#![allow(dead_code)]

use sha2::{Digest, Sha256};
use x25519_klepto::{SeededKem, SEED_BYTES, SEED_HALF_BYTES};

pub struct HashKem;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashPublicKey {
    pub seed: [u8; SEED_HALF_BYTES],
    pub commitment: [u8; 32],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashSecretKey(pub [u8; SEED_BYTES]);

impl SeededKem for HashKem {
    type PublicKey = HashPublicKey;
    type SecretKey = HashSecretKey;

    fn keypair_from_seed(seed: &[u8; SEED_BYTES]) -> (HashPublicKey, HashSecretKey) {
        let mut public_seed = [0u8; SEED_HALF_BYTES];
        public_seed.copy_from_slice(&seed[..SEED_HALF_BYTES]);

        let pk = HashPublicKey {
            seed: public_seed,
            commitment: Sha256::digest(seed).into(),
        };
        (pk, HashSecretKey(*seed))
    }

    fn public_seed(pk: &HashPublicKey) -> [u8; SEED_HALF_BYTES] {
        pk.seed
    }
}
