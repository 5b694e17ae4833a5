// -*- mode: rust; -*-
//
// This file is part of x25519-klepto.
// See LICENSE for licensing information.

//! Errors which may occur while generating or recovering seeds.

use core::fmt;
use core::fmt::Display;

/// Errors surfaced by seed generation and by the recovery harness.
///
/// Neither condition is expected in normal operation. Both point at a broken
/// random source or a broken primitive and should be reported, not retried.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The generator did not find a pair of representable points within
    /// its attempt bound.
    ExhaustedRetries {
        /// Number of attempts made before giving up.
        attempts: usize,
    },
    /// A recovered candidate set did not reproduce the victim's public key
    /// exactly once.
    RecoveryMismatch {
        /// Number of candidates whose derived public key matched.
        matches: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::ExhaustedRetries { attempts } => write!(
                f,
                "no representable seed pair found in {} attempts",
                attempts
            ),
            Error::RecoveryMismatch { matches: 0 } => {
                write!(f, "no recovered candidate reproduces the public key")
            }
            Error::RecoveryMismatch { matches } => write!(
                f,
                "{} recovered candidates reproduce the public key, expected exactly one",
                matches
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
