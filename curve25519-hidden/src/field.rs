// -*- mode: rust; -*-
//
// This file is part of curve25519-hidden.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), in radix \\(2\^{51}\\).
//!
//! `curve25519-dalek` keeps its field type crate-private, and the Elligator2
//! maps need square roots and inversions on raw \\(u\\)-coordinates, so this
//! module carries a small serial implementation of its own. Only the
//! operations the encoding needs are provided.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};

use crate::constants::SQRT_M1;

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// An element of \\(\mathbb Z / (2\^{255} - 19)\\), as five `u64` limbs.
///
/// Limbs are kept below \\(2\^{52}\\) after every operation, so products of
/// two elements fit comfortably in `u128` accumulators.
#[derive(Copy, Clone)]
pub(crate) struct FieldElement(pub(crate) [u64; 5]);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl ConstantTimeEq for FieldElement {
    /// Compare the canonical encodings of two elements.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.as_bytes().ct_eq(&other.as_bytes())
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut limbs = [0u64; 5];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = self.0[i] + rhs.0[i];
        }
        FieldElement::reduce(limbs)
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        // Add 16p before subtracting so no limb underflows.
        FieldElement::reduce([
            (self.0[0] + 36028797018963664u64) - rhs.0[0],
            (self.0[1] + 36028797018963952u64) - rhs.0[1],
            (self.0[2] + 36028797018963952u64) - rhs.0[2],
            (self.0[3] + 36028797018963952u64) - rhs.0[3],
            (self.0[4] + 36028797018963952u64) - rhs.0[4],
        ])
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    #[rustfmt::skip]
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a = &self.0;
        let b = &rhs.0;

        // 2^255 = 19 (mod p), so high limbs fold back multiplied by 19.
        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        let c0: u128 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let mut c1: u128 = m(a[1], b[0]) + m(a[0], b[1]) + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let mut c2: u128 = m(a[2], b[0]) + m(a[1], b[1]) + m(a[0], b[2]) + m(a[4], b3_19) + m(a[3], b4_19);
        let mut c3: u128 = m(a[3], b[0]) + m(a[2], b[1]) + m(a[1], b[2]) + m(a[0], b[3]) + m(a[4], b4_19);
        let mut c4: u128 = m(a[4], b[0]) + m(a[3], b[1]) + m(a[2], b[2]) + m(a[1], b[3]) + m(a[0], b[4]);

        let mut out = [0u64; 5];

        c1 += (c0 >> 51) as u64 as u128;
        out[0] = (c0 as u64) & LOW_51_BIT_MASK;

        c2 += (c1 >> 51) as u64 as u128;
        out[1] = (c1 as u64) & LOW_51_BIT_MASK;

        c3 += (c2 >> 51) as u64 as u128;
        out[2] = (c2 as u64) & LOW_51_BIT_MASK;

        c4 += (c3 >> 51) as u64 as u128;
        out[3] = (c3 as u64) & LOW_51_BIT_MASK;

        let carry: u64 = (c4 >> 51) as u64;
        out[4] = (c4 as u64) & LOW_51_BIT_MASK;

        out[0] += carry * 19;
        out[1] += out[0] >> 51;
        out[0] &= LOW_51_BIT_MASK;

        FieldElement(out)
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        &FieldElement::ZERO - self
    }
}

#[inline(always)]
fn load8(input: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&input[..8]);
    u64::from_le_bytes(bytes)
}

impl FieldElement {
    pub(crate) const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0]);
    pub(crate) const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0]);
    pub(crate) const MINUS_ONE: FieldElement = FieldElement([
        2251799813685228,
        2251799813685247,
        2251799813685247,
        2251799813685247,
        2251799813685247,
    ]);

    /// Carry every limb into the next one, folding the top carry back as
    /// a multiple of 19.
    #[inline(always)]
    fn reduce(mut limbs: [u64; 5]) -> FieldElement {
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= LOW_51_BIT_MASK;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;

        FieldElement(limbs)
    }

    /// Load a field element from 32 little-endian bytes, ignoring bit 255.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        FieldElement([
            load8(&bytes[0..]) & LOW_51_BIT_MASK,
            (load8(&bytes[6..]) >> 3) & LOW_51_BIT_MASK,
            (load8(&bytes[12..]) >> 6) & LOW_51_BIT_MASK,
            (load8(&bytes[19..]) >> 1) & LOW_51_BIT_MASK,
            (load8(&bytes[24..]) >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Small integers, for constants such as the curve coefficient.
    pub(crate) const fn from_u64(x: u64) -> FieldElement {
        FieldElement([x & LOW_51_BIT_MASK, x >> 51, 0, 0, 0])
    }

    /// Serialize to the canonical 32-byte encoding (fully reduced mod p).
    pub(crate) fn as_bytes(&self) -> [u8; 32] {
        let mut limbs = FieldElement::reduce(self.0).0;

        // q is 1 exactly when the value is in [p, 2^255).
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        let mut out = [0u8; 32];
        let mut acc: u128 = 0;
        let mut bits = 0u32;
        let mut idx = 0usize;
        for limb in limbs {
            acc |= (limb as u128) << bits;
            bits += 51;
            while bits >= 8 {
                out[idx] = acc as u8;
                acc >>= 8;
                bits -= 8;
                idx += 1;
            }
        }
        out[idx] = acc as u8;
        out
    }

    /// An element is "negative" when its canonical encoding is odd.
    pub(crate) fn is_negative(&self) -> Choice {
        Choice::from(self.as_bytes()[0] & 1)
    }

    pub(crate) fn is_zero(&self) -> Choice {
        self.as_bytes().ct_eq(&[0u8; 32])
    }

    pub(crate) fn square(&self) -> FieldElement {
        self * self
    }

    /// Compute `self^(2^k)`.
    pub(crate) fn pow2k(&self, mut k: u32) -> FieldElement {
        debug_assert!(k > 0);
        let mut out = self.square();
        k -= 1;
        while k > 0 {
            out = out.square();
            k -= 1;
        }
        out
    }

    /// Returns `(self^(2^250 - 1), self^11)`, the shared prefix of the
    /// inversion and square-root exponent chains.
    #[rustfmt::skip]
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        let t0  = self.square();           // 2
        let t1  = t0.square().square();    // 8
        let t2  = self * &t1;              // 9
        let t3  = &t0 * &t2;               // 11
        let t4  = t3.square();             // 22
        let t5  = &t2 * &t4;               // 2^5 - 1
        let t6  = t5.pow2k(5);             // 2^10 - 2^5
        let t7  = &t6 * &t5;               // 2^10 - 1
        let t8  = t7.pow2k(10);            // 2^20 - 2^10
        let t9  = &t8 * &t7;               // 2^20 - 1
        let t10 = t9.pow2k(20);            // 2^40 - 2^20
        let t11 = &t10 * &t9;              // 2^40 - 1
        let t12 = t11.pow2k(10);           // 2^50 - 2^10
        let t13 = &t12 * &t7;              // 2^50 - 1
        let t14 = t13.pow2k(50);           // 2^100 - 2^50
        let t15 = &t14 * &t13;             // 2^100 - 1
        let t16 = t15.pow2k(100);          // 2^200 - 2^100
        let t17 = &t16 * &t15;             // 2^200 - 1
        let t18 = t17.pow2k(50);           // 2^250 - 2^50
        let t19 = &t18 * &t13;             // 2^250 - 1

        (t19, t3)
    }

    /// Multiplicative inverse, `self^(p-2)`. Zero maps to zero.
    pub(crate) fn invert(&self) -> FieldElement {
        let (t19, t3) = self.pow22501();
        let t20 = t19.pow2k(5); // 2^255 - 2^5
        &t20 * &t3 // 2^255 - 21
    }

    /// `self^((p-5)/8)`.
    fn pow_p58(&self) -> FieldElement {
        let (t19, _) = self.pow22501();
        let t20 = t19.pow2k(2); // 2^252 - 4
        self * &t20 // 2^252 - 3
    }

    /// Given `u` and `v`, compute the nonnegative square root of `u/v`.
    ///
    /// Returns `(Choice(1), +sqrt(u/v))` when `u/v` is a nonzero square or
    /// `u` is zero, and `(Choice(0), +sqrt(i*u/v))` otherwise. When `v` is
    /// zero and `u` is not, the result is `(Choice(0), 0)`.
    pub(crate) fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;
        let mut r = &(u * &v3) * &(u * &v7).pow_p58();
        let check = v * &r.square();

        let neg_u = -u;
        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&neg_u);
        let flipped_sign_sqrt_i = check.ct_eq(&(&neg_u * &SQRT_M1));

        let r_prime = &SQRT_M1 * &r;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        // Always pick the nonnegative root.
        let r_is_negative = r.is_negative();
        r.conditional_negate(r_is_negative);

        (correct_sign_sqrt | flipped_sign_sqrt, r)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// p - 1, little endian.
    const P_MINUS_ONE: [u8; 32] = [
        0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ];

    fn fe(x: u64) -> FieldElement {
        FieldElement::from_u64(x)
    }

    #[test]
    fn bytes_roundtrip_is_canonical() {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        bytes[31] &= 0x7f;
        assert_eq!(FieldElement::from_bytes(&bytes).as_bytes(), bytes);

        assert_eq!(FieldElement::MINUS_ONE.as_bytes(), P_MINUS_ONE);

        // p itself reduces to zero.
        let mut p = P_MINUS_ONE;
        p[0] += 1;
        assert!(bool::from(FieldElement::from_bytes(&p).is_zero()));
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        assert!(bool::from(SQRT_M1.square().ct_eq(&FieldElement::MINUS_ONE)));
    }

    #[test]
    fn arithmetic_matches_small_integers() {
        assert!(bool::from((&fe(7) * &fe(6)).ct_eq(&fe(42))));
        assert!(bool::from((&fe(7) + &fe(6)).ct_eq(&fe(13))));
        assert!(bool::from((&fe(6) - &fe(7)).ct_eq(&FieldElement::MINUS_ONE)));
        assert!(bool::from((-&fe(1)).ct_eq(&FieldElement::MINUS_ONE)));
    }

    #[test]
    fn invert_times_self_is_one() {
        let x = fe(486662);
        assert!(bool::from((&x * &x.invert()).ct_eq(&FieldElement::ONE)));
        assert!(bool::from(FieldElement::ZERO.invert().is_zero()));
    }

    #[test]
    fn sqrt_ratio_i_behavior() {
        let zero = FieldElement::ZERO;
        let one = FieldElement::ONE;
        let two = fe(2);
        let four = fe(4);

        // 0/0 is treated as a square.
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&zero, &zero);
        assert!(bool::from(choice));
        assert!(bool::from(sqrt.is_zero()));

        // 1/0 has no square root.
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&one, &zero);
        assert!(!bool::from(choice));
        assert!(bool::from(sqrt.is_zero()));

        // 2 is a nonsquare mod p, so this returns sqrt(i*2).
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&two, &one);
        assert!(!bool::from(choice));
        assert!(bool::from(sqrt.square().ct_eq(&(&two * &SQRT_M1))));
        assert!(!bool::from(sqrt.is_negative()));

        // 4 is square; the nonnegative root of 4 is 2.
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&four, &one);
        assert!(bool::from(choice));
        assert!(bool::from(sqrt.ct_eq(&two)));
    }
}
