// -*- mode: rust; -*-
//
// This file is part of curve25519-hidden.
// See LICENSE for licensing information.

//! Field constants used by the Elligator2 maps.

use crate::field::FieldElement;

/// Precomputed value of one of the square roots of -1 (mod p).
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// In Montgomery form y² = x³+Ax²+x, Curve25519 has A=486662.
pub(crate) const MONTGOMERY_A: FieldElement = FieldElement::from_u64(486662);

/// Bitmask clearing the two padding bits of a hidden encoding.
pub const MASK_UNSET_BYTE: u8 = 0x3f;

/// Bitmask selecting the two padding bits of a hidden encoding.
pub const MASK_SET_BYTE: u8 = 0xc0;

/// Bit of the tweak selecting which of the two representatives is produced.
pub const MASK_ROOT_BIT: u8 = 0x01;
