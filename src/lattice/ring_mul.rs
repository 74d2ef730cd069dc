//! Ring multiplication backends for R_q = Z_q[X]/(X^n + 1)
//!
//! This module provides a trait-based abstraction over ring multiplication:
//!
//! - [`SchoolbookBackend`]: O(n²), always available, no constraints on q
//! - [`NttBackend`]: O(n log n), requires a precomputed root table for (n, q)
//! - [`AutoBackend`]: picks NTT when [`has_tables`] says so, schoolbook otherwise
//!
//! Dispatch is a capability check made before multiplying; a missing table is
//! never discovered by catching a construction error.

use std::sync::Arc;

use tracing::trace;

use super::ntt::NttTables;
use super::ring::RingElement;
use super::roots::has_tables;
use crate::error::Result;

// ============================================================================
// Ring Multiplication Trait
// ============================================================================

/// Backend for ring multiplication in R_q.
///
/// All backends agree coefficient for coefficient on every valid input.
pub trait RingMulBackend {
    /// Multiply two ring elements in R_q.
    fn ring_mul(&self, a: &RingElement, b: &RingElement) -> Result<RingElement>;
}

// ============================================================================
// Schoolbook Backend
// ============================================================================

/// Schoolbook O(n²) multiplication.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchoolbookBackend;

impl RingMulBackend for SchoolbookBackend {
    fn ring_mul(&self, a: &RingElement, b: &RingElement) -> Result<RingElement> {
        a.mul_schoolbook(b)
    }
}

// ============================================================================
// NTT Backend
// ============================================================================

/// NTT-based O(n log n) multiplication over shared tables.
#[derive(Clone, Debug)]
pub struct NttBackend {
    tables: Arc<NttTables>,
}

impl NttBackend {
    /// Create NTT backend from precomputed tables.
    pub fn new(tables: Arc<NttTables>) -> Self {
        Self { tables }
    }

    /// Backend over the process-wide cached tables for (n, q).
    pub fn for_ring(n: usize, q: u64) -> Result<Self> {
        NttTables::cached(n, q).map(Self::new)
    }

    /// Transform tables this backend multiplies with.
    pub fn tables(&self) -> &NttTables {
        &self.tables
    }
}

impl RingMulBackend for NttBackend {
    fn ring_mul(&self, a: &RingElement, b: &RingElement) -> Result<RingElement> {
        self.tables.ring_mul(a, b)
    }
}

// ============================================================================
// Dispatching Backend
// ============================================================================

/// NTT when the ring has tables, schoolbook otherwise.
#[derive(Clone, Debug)]
pub enum AutoBackend {
    Ntt(NttBackend),
    Schoolbook(SchoolbookBackend),
}

impl AutoBackend {
    /// Choose a backend for (n, q).
    pub fn for_ring(n: usize, q: u64) -> Result<Self> {
        if has_tables(n, q) {
            trace!(n, q, "ring multiply via NTT");
            Ok(Self::Ntt(NttBackend::for_ring(n, q)?))
        } else {
            trace!(n, q, "ring multiply via schoolbook");
            Ok(Self::Schoolbook(SchoolbookBackend))
        }
    }

    /// True when products go through the NTT.
    pub fn is_ntt(&self) -> bool {
        matches!(self, Self::Ntt(_))
    }
}

impl RingMulBackend for AutoBackend {
    fn ring_mul(&self, a: &RingElement, b: &RingElement) -> Result<RingElement> {
        match self {
            Self::Ntt(backend) => backend.ring_mul(a, b),
            Self::Schoolbook(backend) => backend.ring_mul(a, b),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::params::ALL_LEVELS;
    use crate::lattice::roots::PRECOMPUTED_ROOTS;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn schoolbook_backend() {
        let mut rng = test_rng();
        let (n, q) = (64, 65537);

        let a = RingElement::random(&mut rng, n, q).unwrap();
        let b = RingElement::random(&mut rng, n, q).unwrap();

        let result = SchoolbookBackend.ring_mul(&a, &b).unwrap();
        assert_eq!(result, a.mul_schoolbook(&b).unwrap());
    }

    #[test]
    fn ntt_vs_schoolbook_agree() {
        let mut rng = test_rng();

        for e in PRECOMPUTED_ROOTS {
            let a = RingElement::random(&mut rng, e.n, e.q).unwrap();
            let b = RingElement::random(&mut rng, e.n, e.q).unwrap();

            let ntt = NttBackend::for_ring(e.n, e.q).unwrap();
            assert_eq!(
                ntt.ring_mul(&a, &b).unwrap(),
                SchoolbookBackend.ring_mul(&a, &b).unwrap(),
                "n={}, q={}",
                e.n,
                e.q
            );
        }
    }

    #[test]
    fn auto_backend_dispatch() {
        assert!(AutoBackend::for_ring(32, 7681).unwrap().is_ntt());
        assert!(AutoBackend::for_ring(512, 12289).unwrap().is_ntt());
        assert!(!AutoBackend::for_ring(256, 3329).unwrap().is_ntt());
        assert!(!AutoBackend::for_ring(1024, 16384).unwrap().is_ntt());
        assert!(!AutoBackend::for_ring(16, 97).unwrap().is_ntt());
    }

    #[test]
    fn auto_backend_matches_schoolbook_for_catalog() {
        let mut rng = test_rng();

        for level in ALL_LEVELS {
            let p = level.params();
            let a = RingElement::random(&mut rng, p.n, p.q).unwrap();
            let b = RingElement::random(&mut rng, p.n, p.q).unwrap();

            let auto = AutoBackend::for_ring(p.n, p.q).unwrap();
            assert_eq!(
                auto.ring_mul(&a, &b).unwrap(),
                a.mul_schoolbook(&b).unwrap(),
                "{level}"
            );
        }
    }

    #[test]
    fn ntt_backend_rejects_foreign_ring() {
        let backend = NttBackend::for_ring(8, 17).unwrap();
        assert_eq!(backend.tables().dimension(), 8);

        let a = RingElement::zero(4, 17).unwrap();
        assert!(backend.ring_mul(&a, &a).is_err());
    }
}
