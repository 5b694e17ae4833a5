// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

//! The tweak values guessed over during recovery.

use curve25519_hidden::constants::{MASK_ROOT_BIT, MASK_SET_BYTE};
use rand_core::{CryptoRng, RngCore};

/// The bits of a tweak byte that influence a hidden encoding: the root
/// selector and the two padding bits.
pub const TWEAK_MASK: u8 = MASK_SET_BYTE | MASK_ROOT_BIT;

/// Every tweak the generator can draw, in the order recovery tries them.
///
/// The order is part of the recovery output, so it is fixed here rather
/// than derived from [`TWEAK_MASK`] at runtime.
pub const TWEAK_TABLE: [u8; 8] = [0x00, 0x01, 0x40, 0x41, 0x80, 0x81, 0xC0, 0xC1];

/// Draw one tweak, uniform over [`TWEAK_TABLE`].
pub(crate) fn random_tweak<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> u8 {
    let mut byte = [0u8; 1];
    rng.fill_bytes(&mut byte);
    byte[0] & TWEAK_MASK
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_enumerates_the_mask() {
        let mut expected: std::vec::Vec<u8> =
            (0..=255u8).map(|b| b & TWEAK_MASK).collect();
        expected.sort_unstable();
        expected.dedup();
        assert_eq!(expected, TWEAK_TABLE.to_vec());
    }

    #[test]
    fn drawn_tweaks_are_table_entries() {
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            assert!(TWEAK_TABLE.contains(&random_tweak(&mut rng)));
        }
    }
}
