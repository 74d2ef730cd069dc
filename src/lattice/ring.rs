//! Ring elements of R_q = Z_q[X]/(X^n + 1)
//!
//! A [`RingElement`] is a value type: every arithmetic operation returns a new
//! element and never touches its operands. The single in-place mutator is
//! [`RingElement::replace_coeffs`], used after a transform.
//!
//! # Invariants
//!
//! - `coeffs.len() == n` for the lifetime of the element
//! - every coefficient lies in [0, q)
//! - binary operations require identical (n, q) on both sides and fail with
//!   [`Error::IncompatibleRings`] otherwise
//!
//! # Byte Encoding
//!
//! [`RingElement::to_bytes`] writes, field by field and in host-native byte
//! order:
//!
//! ```text
//! n: usize | q: u64 | c_0: u64 | c_1: u64 | ... | c_{n-1}: u64
//! ```
//!
//! The layout is not portable across endianness or word size. It serves as the
//! hash preimage for fingerprinting an element.

use std::fmt;

use itertools::iproduct;
use zeroize::Zeroize;

use super::modular::{add_mod, mul_mod, neg_mod, reduce_signed, sub_mod};
use super::ring_mul::{AutoBackend, RingMulBackend};
use crate::error::{Error, Result};

// ============================================================================
// Ring Element
// ============================================================================

/// Element of R_q = Z_q[X]/(X^n + 1).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RingElement {
    /// Coefficients: c_0 + c_1·X + ... + c_{n-1}·X^{n-1}
    coeffs: Vec<u64>,
    /// Modulus q
    q: u64,
}

impl fmt::Debug for RingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RingElement {{ n: {}, q: {}, coeffs: [...] }}",
            self.coeffs.len(),
            self.q
        )
    }
}

impl Zeroize for RingElement {
    fn zeroize(&mut self) {
        // wipe in place; the dimension is fixed at construction
        self.coeffs.as_mut_slice().zeroize();
    }
}

fn check_ring(n: usize, q: u64) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidParameter(
            "ring dimension must be positive".to_string(),
        ));
    }
    if q < 2 {
        return Err(Error::InvalidParameter(format!(
            "modulus must be at least 2, got {q}"
        )));
    }
    Ok(())
}

// ============================================================================
// Constructors
// ============================================================================

impl RingElement {
    /// Create the zero element of the ring (n, q)
    pub fn zero(n: usize, q: u64) -> Result<Self> {
        check_ring(n, q)?;
        Ok(Self {
            coeffs: vec![0; n],
            q,
        })
    }

    /// Create the multiplicative identity (1, 0, ..., 0)
    pub fn one(n: usize, q: u64) -> Result<Self> {
        let mut elem = Self::zero(n, q)?;
        elem.coeffs[0] = 1;
        Ok(elem)
    }

    /// Create an element from coefficients; the dimension is their count
    ///
    /// Each coefficient is reduced mod q.
    pub fn from_coeffs(coeffs: Vec<u64>, q: u64) -> Result<Self> {
        check_ring(coeffs.len(), q)?;
        let mut coeffs = coeffs;
        for c in &mut coeffs {
            *c %= q;
        }
        Ok(Self { coeffs, q })
    }

    /// Create an element from signed coefficients
    pub fn from_signed(coeffs: &[i64], q: u64) -> Result<Self> {
        check_ring(coeffs.len(), q)?;
        Ok(Self {
            coeffs: coeffs.iter().map(|&c| reduce_signed(c, q)).collect(),
            q,
        })
    }

    /// Create a uniformly random element
    pub fn random<R: rand::Rng>(rng: &mut R, n: usize, q: u64) -> Result<Self> {
        check_ring(n, q)?;
        Ok(Self {
            coeffs: (0..n).map(|_| rng.gen_range(0..q)).collect(),
            q,
        })
    }

    pub(crate) fn from_reduced(coeffs: Vec<u64>, q: u64) -> Self {
        debug_assert!(coeffs.iter().all(|&c| c < q));
        Self { coeffs, q }
    }
}

// ============================================================================
// Accessors & Mutation
// ============================================================================

impl RingElement {
    /// Coefficients in ascending degree order
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Ring dimension n
    pub fn dimension(&self) -> usize {
        self.coeffs.len()
    }

    /// Modulus q
    pub fn modulus(&self) -> u64 {
        self.q
    }

    /// True when `other` lives in the same ring
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.dimension() == other.dimension() && self.q == other.q
    }

    pub(crate) fn ensure_compatible(&self, other: &Self) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(Error::incompatible(
                (self.dimension(), self.q),
                (other.dimension(), other.q),
            ))
        }
    }

    /// Replace all coefficients, reducing each mod q
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if `new_coeffs.len() != n`.
    pub fn replace_coeffs(&mut self, new_coeffs: &[u64]) -> Result<()> {
        if new_coeffs.len() != self.coeffs.len() {
            return Err(Error::InvalidLength {
                expected: self.coeffs.len(),
                actual: new_coeffs.len(),
            });
        }
        for (c, &v) in self.coeffs.iter_mut().zip(new_coeffs) {
            *c = v % self.q;
        }
        Ok(())
    }
}

// ============================================================================
// Centered Representation & Norms
// ============================================================================

impl RingElement {
    /// Get centered representation (coefficients in (-q/2, q/2])
    pub fn centered(&self) -> Vec<i64> {
        let half_q = self.q / 2;
        self.coeffs
            .iter()
            .map(|&c| {
                if c > half_q {
                    -((self.q - c) as i64)
                } else {
                    c as i64
                }
            })
            .collect()
    }

    /// Compute ℓ∞ norm of the centered representation
    pub fn linf_norm(&self) -> u64 {
        self.centered()
            .iter()
            .map(|c| c.unsigned_abs())
            .max()
            .unwrap_or(0)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

impl RingElement {
    fn zip_with(&self, other: &Self, op: fn(u64, u64, u64) -> u64) -> Result<Self> {
        self.ensure_compatible(other)?;
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(&a, &b)| op(a, b, self.q))
            .collect();
        Ok(Self::from_reduced(coeffs, self.q))
    }

    /// Coefficientwise addition mod q
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, add_mod)
    }

    /// Coefficientwise subtraction mod q
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, sub_mod)
    }

    /// Negate ring element; zero coefficients stay zero
    pub fn neg(&self) -> Self {
        let coeffs = self.coeffs.iter().map(|&c| neg_mod(c, self.q)).collect();
        Self::from_reduced(coeffs, self.q)
    }

    /// Scalar multiplication by k mod q
    pub fn scalar_mul(&self, scalar: u64) -> Self {
        let k = scalar % self.q;
        let coeffs = self.coeffs.iter().map(|&c| mul_mod(c, k, self.q)).collect();
        Self::from_reduced(coeffs, self.q)
    }

    /// Ring multiplication in Z_q[X]/(X^n + 1)
    ///
    /// Uses the NTT when a root table exists for (n, q) and the schoolbook
    /// convolution otherwise. Both paths produce identical results.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.ensure_compatible(other)?;
        AutoBackend::for_ring(self.dimension(), self.q)?.ring_mul(self, other)
    }

    /// Schoolbook polynomial multiplication in R_q = Z_q[X]/(X^n + 1)
    ///
    /// Forms the length-(2n-1) product, then folds degree ≥ n terms back
    /// using X^n ≡ -1.
    pub fn mul_schoolbook(&self, other: &Self) -> Result<Self> {
        self.ensure_compatible(other)?;
        let (n, q) = (self.dimension(), self.q);
        let mut product = vec![0u64; 2 * n - 1];

        let self_nz = self.coeffs.iter().enumerate().filter(|(_, &c)| c != 0);
        let other_nz = || other.coeffs.iter().enumerate().filter(|(_, &c)| c != 0);

        for ((i, &ai), (j, &bj)) in iproduct!(self_nz, other_nz()) {
            product[i + j] = add_mod(product[i + j], mul_mod(ai, bj, q), q);
        }

        let mut reduced = product[..n].to_vec();
        for (k, &high) in product.iter().enumerate().skip(n) {
            // X^{n+r} ≡ -X^r
            reduced[k - n] = sub_mod(reduced[k - n], high, q);
        }

        Ok(Self::from_reduced(reduced, q))
    }

    /// Round every coefficient to the nearer of {0, q/2}
    ///
    /// Distance is measured cyclically in Z_q; ties go to 0. The result is
    /// the coarse two-level form compared during verification.
    pub fn signal(&self) -> Self {
        let q = self.q;
        let half = q / 2;
        let cyclic_dist = |a: u64, b: u64| {
            let d = a.abs_diff(b);
            d.min(q - d)
        };
        let coeffs = self
            .coeffs
            .iter()
            .map(|&c| {
                if cyclic_dist(c, 0) <= cyclic_dist(c, half) {
                    0
                } else {
                    half
                }
            })
            .collect();
        Self::from_reduced(coeffs, q)
    }
}

// ============================================================================
// Serialization
// ============================================================================

const WORD: usize = std::mem::size_of::<usize>();

impl RingElement {
    /// Length of [`RingElement::to_bytes`] output for dimension n
    pub const fn encoded_len(n: usize) -> usize {
        WORD + 8 + 8 * n
    }

    /// Serialize as `n: usize | q: u64 | coeffs: [u64; n]`, host-native order
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::encoded_len(self.dimension()));
        buf.extend_from_slice(&self.dimension().to_ne_bytes());
        buf.extend_from_slice(&self.q.to_ne_bytes());
        for &c in &self.coeffs {
            buf.extend_from_slice(&c.to_ne_bytes());
        }
        buf
    }

    /// Inverse of [`RingElement::to_bytes`]
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] for a buffer shorter than the header or not
    /// matching the encoded dimension; [`Error::InvalidParameter`] for a bad
    /// header or an unreduced coefficient.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let header = Self::encoded_len(0);
        if data.len() < header {
            return Err(Error::InvalidLength {
                expected: header,
                actual: data.len(),
            });
        }
        let (n_bytes, rest) = data.split_at(WORD);
        let (q_bytes, body) = rest.split_at(8);
        let n = usize::from_ne_bytes(to_array(n_bytes)?);
        let q = u64::from_ne_bytes(to_array(q_bytes)?);
        check_ring(n, q)?;

        let expected = n.checked_mul(8).ok_or_else(|| {
            Error::InvalidParameter(format!("encoded dimension {n} overflows"))
        })?;
        if body.len() != expected {
            return Err(Error::InvalidLength {
                expected: header + expected,
                actual: data.len(),
            });
        }

        let coeffs = body
            .chunks_exact(8)
            .map(|chunk| {
                let c = u64::from_ne_bytes(to_array(chunk)?);
                if c >= q {
                    return Err(Error::InvalidParameter(format!(
                        "coefficient {c} not reduced mod {q}"
                    )));
                }
                Ok(c)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { coeffs, q })
    }
}

fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| Error::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

// ============================================================================
// Tests
// ============================================================================
