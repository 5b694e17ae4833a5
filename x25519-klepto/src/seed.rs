// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

//! Backdoored seed generation.
//!
//! A [`SeedGenerator`] replaces the honest "draw 64 random bytes" step of a
//! seeded key generation. Each output half is the Elligator2 encoding of a
//! curve point, and therefore looks uniform:
//!
//! * the *public seed* hides \\(xB + T\\), the dirty public point of a fresh
//!   scalar \\(x\\) (\\(T\\) being a low-order point picked by \\(x\\)),
//! * the *private seed* hides \\(x \cdot Y\\), the X25519 shared point with
//!   the adversary's public key \\(Y = yB\\).
//!
//! The victim's KEM publishes the public seed in clear. Whoever knows
//! \\(y\\) can compute \\(y(xB + T) = xY\\) and hence the private seed, up to
//! the tweak bits that [`recover_candidates`](crate::recover_candidates)
//! enumerates.

use core::fmt;

use curve25519_hidden::{hide, mul_base_dirty, x25519, MontgomeryPoint};
use log::{debug, trace};
use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::adversary::AdversaryPublicKey;
use crate::errors::Error;
use crate::tweak::random_tweak;

/// Upper bound on the attempts [`SeedGenerator::generate`] makes.
///
/// Each attempt succeeds with probability about 1/4, so running out of
/// attempts happens with probability below \\(2\^{-41}\\).
pub const MAX_ATTEMPTS: usize = 100;

/// Length of one seed half.
pub const SEED_HALF_BYTES: usize = 32;

/// Length of a serialized [`SeedPair`].
pub const SEED_BYTES: usize = 2 * SEED_HALF_BYTES;

/// The output of the generator: two hidden encodings. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SeedPair {
    public_seed: [u8; SEED_HALF_BYTES],
    private_seed: [u8; SEED_HALF_BYTES],
}

impl SeedPair {
    /// Assemble a pair from its two halves.
    pub fn new(public_seed: [u8; SEED_HALF_BYTES], private_seed: [u8; SEED_HALF_BYTES]) -> Self {
        SeedPair {
            public_seed,
            private_seed,
        }
    }

    /// The half that the victim's public key will expose.
    #[inline]
    pub fn public_seed(&self) -> &[u8; SEED_HALF_BYTES] {
        &self.public_seed
    }

    /// The half that stays inside the victim's secret key.
    #[inline]
    pub fn private_seed(&self) -> &[u8; SEED_HALF_BYTES] {
        &self.private_seed
    }

    /// Serialize as `public_seed || private_seed`, the layout a seeded KEM
    /// consumes and the statistics files store.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SEED_BYTES]> {
        let mut bytes = Zeroizing::new([0u8; SEED_BYTES]);
        bytes[..SEED_HALF_BYTES].copy_from_slice(&self.public_seed);
        bytes[SEED_HALF_BYTES..].copy_from_slice(&self.private_seed);
        bytes
    }
}

impl ConstantTimeEq for SeedPair {
    fn ct_eq(&self, other: &SeedPair) -> subtle::Choice {
        self.public_seed.ct_eq(&other.public_seed) & self.private_seed.ct_eq(&other.private_seed)
    }
}

impl PartialEq for SeedPair {
    fn eq(&self, other: &SeedPair) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SeedPair {}

impl fmt::Debug for SeedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedPair")
            .field("public_seed", &self.public_seed)
            .finish_non_exhaustive()
    }
}

/// Generates backdoored seed pairs for one adversary public key.
///
/// The generator only holds the public key, so it is `Copy` and can be
/// shared freely between threads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SeedGenerator {
    adversary: AdversaryPublicKey,
}

impl SeedGenerator {
    /// Construct a generator embedding `adversary`.
    pub fn new(adversary: AdversaryPublicKey) -> Self {
        SeedGenerator { adversary }
    }

    /// The embedded adversary public key.
    pub fn adversary_public_key(&self) -> &AdversaryPublicKey {
        &self.adversary
    }

    /// Generate a seed pair.
    ///
    /// # Errors
    ///
    /// [`Error::ExhaustedRetries`] if [`MAX_ATTEMPTS`] attempts all produced
    /// a point without a representative. The caller must not publish any
    /// key in that case.
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(&self, csprng: &mut R) -> Result<SeedPair, Error> {
        self.generate_with_attempts(csprng).map(|(seeds, _)| seeds)
    }

    /// Like [`generate`](Self::generate), also returning how many attempts
    /// were needed.
    pub fn generate_with_attempts<R: RngCore + CryptoRng + ?Sized>(
        &self,
        csprng: &mut R,
    ) -> Result<(SeedPair, usize), Error> {
        let mut scalar = [0u8; 32];
        self.generate_into(csprng, &mut scalar)
    }

    /// The generation loop, drawing each ephemeral scalar into `scalar`.
    ///
    /// `scalar` holds only zeros whenever this returns. The curve
    /// primitives take the scalar by value, and those copies on their
    /// stacks are not wiped here.
    pub(crate) fn generate_into<R: RngCore + CryptoRng + ?Sized>(
        &self,
        csprng: &mut R,
        scalar: &mut [u8; 32],
    ) -> Result<(SeedPair, usize), Error> {
        // Drawn once per call; recovery relies on this.
        let tweak_public = random_tweak(csprng);
        let tweak_private = random_tweak(csprng);

        for attempt in 1..=MAX_ATTEMPTS {
            csprng.fill_bytes(scalar);
            let found = self.attempt(scalar, tweak_public, tweak_private);
            scalar.zeroize();

            if let Some(seeds) = found {
                trace!("found representable seed pair after {} attempts", attempt);
                return Ok((seeds, attempt));
            }
        }

        debug!(
            "no representable seed pair after {} attempts, check the random source",
            MAX_ATTEMPTS
        );
        Err(Error::ExhaustedRetries {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// One attempt: both points must have representatives.
    fn attempt(&self, scalar: &[u8; 32], tweak_public: u8, tweak_private: u8) -> Option<SeedPair> {
        let ephemeral = mul_base_dirty(scalar);
        let public_seed = hide(&ephemeral, tweak_public)?;

        let shared = Zeroizing::new(x25519(*scalar, self.adversary.to_bytes()));
        let private_seed = hide(&MontgomeryPoint(*shared), tweak_private)?;

        Some(SeedPair::new(public_seed, private_seed))
    }
}
