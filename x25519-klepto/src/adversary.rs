// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

//! The adversary's long-term X25519 keypair.
//!
//! The keypair is generated once, independently of any victim. Only the
//! public half is ever handed to the compromised key generation (through
//! [`SeedGenerator::new`](crate::SeedGenerator::new)); the secret half stays
//! with whoever runs the recovery.

use core::fmt;

use curve25519_hidden::MontgomeryPoint;
use rand_core::{CryptoRng, RngCore};
use x25519_dalek::{PublicKey, SharedSecret, StaticSecret};

/// The adversary's public key, embedded into compromised key generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AdversaryPublicKey(pub(crate) PublicKey);

impl From<[u8; 32]> for AdversaryPublicKey {
    /// Load a public key baked into a deployment.
    fn from(bytes: [u8; 32]) -> AdversaryPublicKey {
        AdversaryPublicKey(PublicKey::from(bytes))
    }
}

impl AdversaryPublicKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

/// The adversary's secret key. Wiped on drop.
///
/// Deliberately neither `Copy` nor `Debug`-printable.
#[derive(Clone)]
pub struct AdversarySecret(StaticSecret);

impl AdversarySecret {
    /// Derive the matching public key with the clamped base-point
    /// multiplication of X25519.
    pub fn public_key(&self) -> AdversaryPublicKey {
        AdversaryPublicKey(PublicKey::from(&self.0))
    }

    /// Extract this key's bytes for storage in adversary-controlled places.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// X25519 between this secret and a victim's ephemeral point.
    pub(crate) fn diffie_hellman(&self, point: &MontgomeryPoint) -> SharedSecret {
        self.0.diffie_hellman(&PublicKey::from(point.to_bytes()))
    }
}

impl From<[u8; 32]> for AdversarySecret {
    /// Load a secret key from a byte array.
    fn from(bytes: [u8; 32]) -> AdversarySecret {
        AdversarySecret(StaticSecret::from(bytes))
    }
}

impl fmt::Debug for AdversarySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdversarySecret(..)")
    }
}

/// Generate the adversary's keypair from fresh randomness.
///
/// Call this once per deployment, before any generator that should embed
/// the public key is constructed.
pub fn initialize<R: RngCore + CryptoRng + ?Sized>(
    csprng: &mut R,
) -> (AdversaryPublicKey, AdversarySecret) {
    let secret = AdversarySecret(StaticSecret::random_from_rng(csprng));
    (secret.public_key(), secret)
}
