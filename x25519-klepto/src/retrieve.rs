// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

//! Recovery of private seeds from published public seeds.

use curve25519_hidden::{hide, unhide, MontgomeryPoint};
use zeroize::Zeroizing;

use crate::adversary::AdversarySecret;
use crate::tweak::TWEAK_TABLE;

/// The eight private-seed candidates, one per [`TWEAK_TABLE`] entry and in
/// the same order. Exactly one equals the private seed that was generated.
pub type RecoveryCandidates = [[u8; 32]; 8];

/// Recover the candidate private seeds behind `public_seed`.
///
/// The public seed is decoded to the victim's ephemeral point, multiplied by
/// the adversary's secret, and the resulting shared point is encoded under
/// every tweak.
///
/// This never fails. If the shared point has no representative (which
/// cannot happen for a public seed produced by
/// [`SeedGenerator`](crate::SeedGenerator)) every candidate is all zeroes.
pub fn recover_candidates(public_seed: &[u8; 32], adversary: &AdversarySecret) -> RecoveryCandidates {
    let ephemeral = unhide(public_seed);
    let shared = Zeroizing::new(adversary.diffie_hellman(&ephemeral).to_bytes());
    let shared = MontgomeryPoint(*shared);

    let mut candidates = [[0u8; 32]; 8];
    for (candidate, &tweak) in candidates.iter_mut().zip(TWEAK_TABLE.iter()) {
        if let Some(encoded) = hide(&shared, tweak) {
            *candidate = encoded;
        }
    }
    candidates
}
