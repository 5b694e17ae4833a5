// -*- mode: rust; -*-
//
// This file is part of curve25519-hidden.
// See LICENSE for licensing information.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

//! Curve25519 points that hide as uniform random strings.
//!
//! This crate sits on top of `curve25519-dalek` and `x25519-dalek` and adds
//! the two pieces needed to publish curve points that cannot be told apart
//! from random bytes:
//!
//! * [`mul_base_dirty`], a base-point multiplication whose output covers
//!   the whole curve instead of only the prime-order subgroup, and
//! * [`hide`] / [`unhide`], the Elligator2 maps between points and 32-byte
//!   representatives.
//!
//! The plain X25519 function is re-exported so that callers need a single
//! dependency for all curve operations.

#[cfg(test)]
#[macro_use]
extern crate std;

//------------------------------------------------------------------------
// curve25519-hidden public modules
//------------------------------------------------------------------------

// Elligator2 forward and inverse maps
pub mod elligator2;

// Constants shared by the maps
pub mod constants;

//------------------------------------------------------------------------
// curve25519-hidden internal modules
//------------------------------------------------------------------------

// Finite field arithmetic mod p = 2^255 - 19
pub(crate) mod field;

// Torsion-mixing base multiplication
mod montgomery;

pub use crate::elligator2::{hide, unhide};
pub use crate::montgomery::mul_base_dirty;

pub use curve25519_dalek::montgomery::MontgomeryPoint;
pub use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};
