//! Parameter sets for the RLWE blind signature scheme
//!
//! # Parameter Sets
//!
//! | Level | n | q | σ | Classical | Quantum | Secure |
//! |-------|---|---|---|-----------|---------|--------|
//! | `TEST_TINY` | 8 | 7681 | 3.0 | 4 | 2 | no |
//! | `TEST_SMALL` | 32 | 7681 | 3.0 | 16 | 8 | no |
//! | `KYBER512` | 256 | 3329 | 1.6 | 128 | 64 | yes |
//! | `MODERATE` | 512 | 12289 | 3.2 | 192 | 96 | yes |
//! | `HIGH` | 1024 | 16384 | 3.2 | 256 | 128 | yes |
//!
//! Only the two test sets and `MODERATE` have NTT tables. `KYBER512` has
//! q ≢ 1 (mod 512) and `HIGH` has a composite modulus, so both multiply
//! through the schoolbook path.
//!
//! The bit counts are rough estimates carried with each set. They are not the
//! output of a lattice estimator and must not be read as a security proof.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Gaussian width substituted when a caller passes σ ≤ 0.
pub const DEFAULT_SIGMA: f64 = 3.2;

// ============================================================================
// Parameter Set Structure
// ============================================================================

/// Named RLWE parameter record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSet {
    /// Ring dimension n (power of two)
    pub n: usize,
    /// Modulus q
    pub q: u64,
    /// Gaussian standard deviation σ
    pub sigma: f64,
    /// Human-readable name
    pub name: &'static str,
    /// Estimated classical security in bits (advisory)
    pub classical_bits: u32,
    /// Estimated quantum security in bits (advisory)
    pub quantum_bits: u32,
    /// Whether the set is meant for production use
    pub is_secure: bool,
}

impl ParameterSet {
    /// Noise ratio α = σ/q
    pub fn noise_ratio(&self) -> f64 {
        self.sigma / self.q as f64
    }

    /// Heuristic description of an arbitrary (n, q, σ) in use
    ///
    /// | n | classical | quantum | secure |
    /// |---|-----------|---------|--------|
    /// | < 128 | ⌊0.5n⌋ | ⌊0.25n⌋ | no |
    /// | 128..256 | 80 | 40 | no |
    /// | ≥ 256 | ⌊0.6n⌋ | ⌊0.3n⌋ | yes |
    ///
    /// Advisory only: the numbers scale with n alone and ignore q and σ.
    pub fn estimate(n: usize, q: u64, sigma: f64) -> Self {
        let (classical_bits, quantum_bits, is_secure) = if n < 128 {
            ((n as f64 * 0.5) as u32, (n as f64 * 0.25) as u32, false)
        } else if n < 256 {
            (80, 40, false)
        } else {
            ((n as f64 * 0.6) as u32, (n as f64 * 0.3) as u32, true)
        };

        Self {
            n,
            q,
            sigma,
            name: "Custom",
            classical_bits,
            quantum_bits,
            is_secure,
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Toy ring for unit tests. INSECURE.
pub const TEST_TINY: ParameterSet = ParameterSet {
    n: 8,
    q: 7681,
    sigma: 3.0,
    name: "TEST_TINY (INSECURE)",
    classical_bits: 4,
    quantum_bits: 2,
    is_secure: false,
};

/// Small ring for fast protocol tests. INSECURE.
pub const TEST_SMALL: ParameterSet = ParameterSet {
    n: 32,
    q: 7681,
    sigma: 3.0,
    name: "TEST_SMALL (INSECURE)",
    classical_bits: 16,
    quantum_bits: 8,
    is_secure: false,
};

/// Kyber-512 ring dimension and modulus [FIPS 203]
///
/// q = 3329 ≡ 1 (mod 256) but not (mod 512): no negacyclic NTT.
pub const KYBER512: ParameterSet = ParameterSet {
    n: 256,
    q: 3329,
    sigma: 1.6,
    name: "KYBER512 (NIST Standard)",
    classical_bits: 128,
    quantum_bits: 64,
    is_secure: true,
};

/// q = 12289 ≡ 1 (mod 1024), NTT-friendly.
pub const MODERATE: ParameterSet = ParameterSet {
    n: 512,
    q: 12289,
    sigma: 3.2,
    name: "MODERATE",
    classical_bits: 192,
    quantum_bits: 96,
    is_secure: true,
};

/// q = 2^14 is composite: schoolbook only.
pub const HIGH: ParameterSet = ParameterSet {
    n: 1024,
    q: 16384,
    sigma: 3.2,
    name: "HIGH",
    classical_bits: 256,
    quantum_bits: 128,
    is_secure: true,
};

// ============================================================================
// Security Levels
// ============================================================================

/// Canonical parameter set selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    TestTiny,
    TestSmall,
    #[default]
    Kyber512,
    Moderate,
    High,
}

/// Every level, weakest first.
pub const ALL_LEVELS: [SecurityLevel; 5] = [
    SecurityLevel::TestTiny,
    SecurityLevel::TestSmall,
    SecurityLevel::Kyber512,
    SecurityLevel::Moderate,
    SecurityLevel::High,
];

impl SecurityLevel {
    /// Catalog entry for this level
    pub const fn params(self) -> &'static ParameterSet {
        match self {
            Self::TestTiny => &TEST_TINY,
            Self::TestSmall => &TEST_SMALL,
            Self::Kyber512 => &KYBER512,
            Self::Moderate => &MODERATE,
            Self::High => &HIGH,
        }
    }

    /// Canonical identifier, e.g. `KYBER512`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TestTiny => "TEST_TINY",
            Self::TestSmall => "TEST_SMALL",
            Self::Kyber512 => "KYBER512",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        ALL_LEVELS
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown security level '{s}'")))
    }
}

// ============================================================================
// Tests
// ============================================================================
