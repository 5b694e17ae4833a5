// -*- mode: rust; -*-
//
// This file is part of curve25519-hidden.
// See LICENSE for licensing information.

//! Elligator2 maps between Curve25519 points and uniform-looking strings.
//!
//! [`hide`] takes the \\(u\\)-coordinate of a point and produces a 32-byte
//! *hidden encoding* (a representative) of it, or `None` when the point has
//! no representative, which is the case for roughly half of all points.
//! [`unhide`] maps any 32-byte string back to a point and never fails.
//!
//! The tweak byte passed to [`hide`] carries three bits:
//!
//! * bit 0 selects which of the two representatives of the point is used,
//! * bits 6 and 7 are copied into the otherwise always-zero top bits of the
//!   output.
//!
//! [`unhide`] ignores the top two bits and squares the representative, so
//! both pieces of information are lost on the way back. Anybody wishing to
//! reproduce a particular encoding from the point alone has to guess the
//! tweak, which takes at most eight tries.
//!
//! ```rust
//! use rand_core::{OsRng, RngCore};
//! use curve25519_hidden::{hide, mul_base_dirty, unhide};
//!
//! let mut secret = [0u8; 32];
//! let representative = loop {
//!     OsRng.fill_bytes(&mut secret);
//!     if let Some(r) = hide(&mul_base_dirty(&secret), OsRng.next_u32() as u8) {
//!         break r;
//!     }
//! };
//!
//! assert_eq!(unhide(&representative), mul_base_dirty(&secret));
//! ```
//!
//! ## Security
//!
//! Both maps run in constant time with respect to the point and the tweak.
//! Whether [`hide`] succeeds is of course observable, which is fine as long
//! as the caller retries with fresh random points.
//!
//! Representatives only look uniform when the hidden points are themselves
//! uniform over the whole curve, not just the prime-order subgroup; see
//! [`mul_base_dirty`](crate::mul_base_dirty).

use curve25519_dalek::montgomery::MontgomeryPoint;
use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::constants::{MASK_ROOT_BIT, MASK_SET_BYTE, MASK_UNSET_BYTE, MONTGOMERY_A};
use crate::field::FieldElement;

/// Compute a hidden encoding of `point`, or `None` if it has none.
///
/// See the [module documentation](self) for the meaning of `tweak`.
pub fn hide(point: &MontgomeryPoint, tweak: u8) -> Option<[u8; 32]> {
    point_to_representative(point.as_bytes(), tweak).into()
}

/// Map a hidden encoding back to the point it encodes.
///
/// Every 32-byte string decodes to some point; the two top bits are ignored.
pub fn unhide(representative: &[u8; 32]) -> MontgomeryPoint {
    let mut clamped = *representative;
    clamped[31] &= MASK_UNSET_BYTE;
    let r = FieldElement::from_bytes(&clamped);
    MontgomeryPoint(representative_to_u(&r).as_bytes())
}

/// Inverse map. The point `u` has a representative iff `-2u(u + A)` is a
/// square; when it does,
///
/// * `r = sqrt(-u / (2(u + A)))` (root bit clear), or
/// * `r = sqrt(-(u + A) / (2u))` (root bit set),
///
/// taking the root in `[0, (p-1)/2]`.
fn point_to_representative(u_bytes: &[u8; 32], tweak: u8) -> CtOption<[u8; 32]> {
    let u = FieldElement::from_bytes(u_bytes);
    let u_plus_a = &u + &MONTGOMERY_A;
    let minus_two = -&FieldElement::from_u64(2);

    // 1 / sqrt(-2u(u + A))
    let (is_square, inv_sqrt) =
        FieldElement::sqrt_ratio_i(&FieldElement::ONE, &(&(&u * &u_plus_a) * &minus_two));

    let numerator =
        FieldElement::conditional_select(&u, &u_plus_a, Choice::from(tweak & MASK_ROOT_BIT));
    let mut r = &numerator * &inv_sqrt;

    // 2r is odd exactly when r > (p-1)/2.
    let twice = &r + &r;
    r.conditional_negate(twice.is_negative());

    let mut representative = r.as_bytes();
    representative[31] |= tweak & MASK_SET_BYTE;

    CtOption::new(representative, is_square)
}

/// Forward map with the nonsquare `Z = 2`:
///
/// ```txt
/// d = -A / (1 + 2r²)
/// u = d            if d³ + Ad² + d is square
///   = -d - A       otherwise
/// ```
fn representative_to_u(r: &FieldElement) -> FieldElement {
    let zero = FieldElement::ZERO;
    let one = FieldElement::ONE;

    let r_sq = r.square();
    let mut w = &r_sq + &r_sq;
    // 1 + 2r² = 0 would divide by zero; map it like r = 0.
    w.conditional_assign(&zero, w.ct_eq(&FieldElement::MINUS_ONE));

    let d = &(-&MONTGOMERY_A) * &(&one + &w).invert();
    let eps = &d * &(&(&d.square() + &(&d * &MONTGOMERY_A)) + &one);
    let (eps_is_square, _) = FieldElement::sqrt_ratio_i(&eps, &one);

    let a_or_zero = FieldElement::conditional_select(&MONTGOMERY_A, &zero, eps_is_square);
    let mut u = &d + &a_or_zero;
    u.conditional_negate(!eps_is_square);
    u
}

/// Whether `u` is the coordinate of a point on the curve rather than on its
/// twist.
#[cfg(test)]
pub(crate) fn is_on_curve(u: &MontgomeryPoint) -> bool {
    let u = FieldElement::from_bytes(u.as_bytes());
    let rhs = &u * &(&(&u.square() + &(&u * &MONTGOMERY_A)) + &FieldElement::ONE);
    let (is_square, _) = FieldElement::sqrt_ratio_i(&rhs, &FieldElement::ONE);
    is_square.into()
}

// ========================================================================
// Tests
// ========================================================================

#[cfg(test)]
mod randomness;

#[cfg(test)]
mod test {
    use super::*;
    use crate::mul_base_dirty;

    use rand::{thread_rng, Rng, RngCore};

    /// (p - 1) / 2, the largest nonnegative representative.
    const P_MINUS_ONE_HALF: [u8; 32] = [
        0xf6, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x3f,
    ];

    fn representable_point() -> ([u8; 32], MontgomeryPoint, [u8; 32]) {
        let mut rng = thread_rng();
        loop {
            let secret = rng.gen::<[u8; 32]>();
            let point = mul_base_dirty(&secret);
            if let Some(r) = hide(&point, 0) {
                return (secret, point, r);
            }
        }
    }

    #[test]
    fn unhide_inverts_hide() {
        for _ in 0..200 {
            let (_, point, _) = representable_point();
            for tweak in 0..=255u8 {
                let r = hide(&point, tweak).expect("encodability does not depend on the tweak");
                assert_eq!(unhide(&r), point, "tweak {tweak:#04x}");
            }
        }
    }

    #[test]
    fn tweak_bits_land_where_documented() {
        let (_, point, r0) = representable_point();

        // Padding bits are copied verbatim into the top of the last byte.
        for pad in [0x00u8, 0x40, 0x80, 0xc0] {
            let r = hide(&point, pad).unwrap();
            assert_eq!(r[31] & MASK_SET_BYTE, pad);
            assert_eq!(r[..31], r0[..31]);
            assert_eq!(r[31] & MASK_UNSET_BYTE, r0[31]);
        }

        // The root bit selects the other representative.
        let r1 = hide(&point, MASK_ROOT_BIT).unwrap();
        assert_ne!(r0, r1);

        // Unused tweak bits change nothing.
        assert_eq!(hide(&point, 0x3e).unwrap(), r0);
    }

    #[test]
    fn representatives_are_nonnegative() {
        for _ in 0..200 {
            let (_, point, _) = representable_point();
            for tweak in [0u8, 1] {
                let r = hide(&point, tweak).unwrap();
                // Compare as little-endian integers.
                let ordering = r.iter().rev().cmp(P_MINUS_ONE_HALF.iter().rev());
                assert_ne!(ordering, core::cmp::Ordering::Greater);
            }
        }
    }

    #[test]
    fn random_strings_decode_to_curve_points() {
        let mut rng = thread_rng();
        let mut bytes = [0u8; 32];
        for _ in 0..500 {
            rng.fill_bytes(&mut bytes);
            assert!(is_on_curve(&unhide(&bytes)));
        }
    }

    #[test]
    fn random_strings_roundtrip_through_one_root() {
        let mut rng = thread_rng();
        let mut bytes = [0u8; 32];
        for _ in 0..500 {
            rng.fill_bytes(&mut bytes);
            bytes[31] &= MASK_UNSET_BYTE;
            let point = unhide(&bytes);

            let r0 = hide(&point, 0).expect("image of the map is representable");
            let r1 = hide(&point, 1).expect("image of the map is representable");
            // Canonical strings below (p-1)/2 come back as one of the two roots.
            assert!(r0 == bytes || r1 == bytes);
        }
    }

    #[test]
    fn top_bits_are_ignored_by_unhide() {
        let mut rng = thread_rng();
        let bytes = rng.gen::<[u8; 32]>();
        let mut masked = bytes;
        masked[31] &= MASK_UNSET_BYTE;
        assert_eq!(unhide(&bytes), unhide(&masked));
    }
}
