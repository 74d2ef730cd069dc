//! Error types for ring arithmetic and the blind signature protocol.
//!
//! Every contract violation has its own variant so callers can tell a bad
//! parameter apart from a ring mismatch or an entropy failure.

use thiserror::Error;

/// Errors raised by the lattice engine and the protocol built on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Non-power-of-two dimension, modulus too small, or a modulus that does
    /// not satisfy q ≡ 1 (mod 2n) for the negacyclic transform.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No precomputed root-of-unity table exists for this ring.
    #[error("No precomputed NTT tables for n={n}, q={q}")]
    UnsupportedParameters {
        /// Ring dimension requested.
        n: usize,
        /// Modulus requested.
        q: u64,
    },

    /// Operands of a binary ring operation live in different rings.
    #[error("Incompatible rings: (n={lhs_n}, q={lhs_q}) vs (n={rhs_n}, q={rhs_q})")]
    IncompatibleRings {
        /// Dimension of the left operand.
        lhs_n: usize,
        /// Modulus of the left operand.
        lhs_q: u64,
        /// Dimension of the right operand.
        rhs_n: usize,
        /// Modulus of the right operand.
        rhs_q: u64,
    },

    /// A coefficient vector or byte buffer has the wrong length.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Length required by the ring or encoding.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Modular inverse requested for an element with gcd(value, modulus) ≠ 1.
    #[error("{value} has no inverse modulo {modulus}")]
    DomainError {
        /// The non-invertible value.
        value: u64,
        /// The modulus.
        modulus: u64,
    },

    /// The platform secure random source failed.
    #[error("Secure random source failed: {0}")]
    RandomSource(String),

    /// Requested a mode this engine does not provide.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn incompatible(lhs: (usize, u64), rhs: (usize, u64)) -> Self {
        Error::IncompatibleRings {
            lhs_n: lhs.0,
            lhs_q: lhs.1,
            rhs_n: rhs.0,
            rhs_q: rhs.1,
        }
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::RandomSource(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::UnsupportedParameters { n: 256, q: 3329 };
        assert_eq!(err.to_string(), "No precomputed NTT tables for n=256, q=3329");

        let err = Error::incompatible((4, 17), (8, 17));
        assert_eq!(
            err.to_string(),
            "Incompatible rings: (n=4, q=17) vs (n=8, q=17)"
        );

        let err = Error::DomainError { value: 4, modulus: 8 };
        assert_eq!(err.to_string(), "4 has no inverse modulo 8");
    }
}
