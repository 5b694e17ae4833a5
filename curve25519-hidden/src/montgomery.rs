// -*- mode: rust; -*-
//
// This file is part of curve25519-hidden.
// See LICENSE for licensing information.

//! Base-point multiplication producing points that can be hidden.

use curve25519_dalek::constants::EIGHT_TORSION;
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::montgomery::MontgomeryPoint;
use subtle::{ConditionallySelectable, ConstantTimeEq};

/// Multiply the basepoint by the clamped `scalar`, then add the point of
/// order dividing 8 selected by the three low bits of `scalar`.
///
/// Clamping clears those three bits, so an ordinary X25519 public key always
/// lies in the prime-order subgroup. A uniform Elligator2 string, however,
/// decodes into that subgroup only one time in eight, which makes the
/// encodings of clean public keys distinguishable from random. Mixing in the
/// low-order component fixes that.
///
/// The low-order component disappears in any later X25519 exchange, because
/// the peer's clamped scalar is a multiple of the cofactor:
///
/// ```rust
/// use curve25519_hidden::{mul_base_dirty, x25519, X25519_BASEPOINT_BYTES};
///
/// let ours = [0x17u8; 32];
/// let theirs = [0x42u8; 32];
///
/// let dirty = mul_base_dirty(&ours).to_bytes();
/// let clean = x25519(ours, X25519_BASEPOINT_BYTES);
///
/// assert_eq!(x25519(theirs, dirty), x25519(theirs, clean));
/// ```
pub fn mul_base_dirty(scalar: &[u8; 32]) -> MontgomeryPoint {
    let index = scalar[0] & 0x07;
    let mut low_order_point = EdwardsPoint::default();
    for (i, point) in EIGHT_TORSION.iter().enumerate() {
        low_order_point.conditional_assign(point, (i as u8).ct_eq(&index));
    }

    (EdwardsPoint::mul_base_clamped(*scalar) + low_order_point).to_montgomery()
}
