//! Negacyclic Number Theoretic Transform over Z_q[X]/(X^n + 1)
//!
//! [`NttTables`] holds everything derived from (n, q): the 2n-th root ψ from
//! [`super::roots::PRECOMPUTED_ROOTS`], ω = ψ², the inverses, the twist
//! tables and the per-stage twiddles. Construction fails for any ring without
//! a table entry; no roots are searched for at runtime.
//!
//! # Mathematical Background
//!
//! For R_q = Z_q[X]/(X^n + 1) with q ≡ 1 (mod 2n):
//! - Pre-twisting a_i by ψ^i turns negacyclic convolution into cyclic
//!   convolution of length n
//! - The length-n transform with ω = ψ² then evaluates a(X) at the odd powers
//!   ψ^{2j+1}, the roots of X^n + 1
//! - Post-twisting by ψ^{-i} after the inverse transform undoes the pre-twist
//!
//! Both directions run the same iterative network: bit-reverse permutation
//! followed by log₂(n) Cooley-Tukey decimation-in-time stages. The forward
//! transform produces evaluations in natural order.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use super::modular::{add_mod, mod_inv, mul_mod, pow_mod, sub_mod};
use super::ring::RingElement;
use super::roots::lookup_psi;
use crate::error::{Error, Result};

// ============================================================================
// Transform Mode
// ============================================================================

/// Convolution the transform diagonalizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NttMode {
    /// Multiplication mod X^n + 1
    #[default]
    Negacyclic,
    /// Multiplication mod X^n - 1 (not provided)
    Cyclic,
}

// ============================================================================
// Negacyclic NTT Tables
// ============================================================================

/// Precomputed tables for the negacyclic NTT over R_q = Z_q[X]/(X^n + 1).
///
/// Immutable after construction. Share one instance per ring through
/// [`NttTables::cached`].
#[derive(Clone, Debug)]
pub struct NttTables {
    n: usize,
    q: u64,
    mode: NttMode,
    log_n: u32,
    /// ψ = primitive 2n-th root of unity mod q
    psi: u64,
    psi_inv: u64,
    /// ω = ψ² (primitive n-th root)
    omega: u64,
    omega_inv: u64,
    n_inv: u64,
    /// twist[i] = ψ^i
    twist: Vec<u64>,
    /// untwist[i] = ψ^{-i}
    untwist: Vec<u64>,
    /// ω^k for k < n/2; stage m reads every (n/m)-th entry
    omega_powers: Vec<u64>,
    omega_inv_powers: Vec<u64>,
}

fn powers(base: u64, count: usize, q: u64) -> Vec<u64> {
    std::iter::successors(Some(1 % q), |&p| Some(mul_mod(p, base, q)))
        .take(count)
        .collect()
}

impl NttTables {
    /// Build negacyclic tables for (n, q)
    ///
    /// # Errors
    ///
    /// See [`NttTables::with_mode`].
    pub fn new(n: usize, q: u64) -> Result<Self> {
        Self::with_mode(n, q, NttMode::Negacyclic)
    }

    /// Build tables for (n, q) in the given mode
    ///
    /// Checks run in this order:
    /// 1. n is a power of two, else [`Error::InvalidParameter`]
    /// 2. q ≥ 2, else [`Error::InvalidParameter`]
    /// 3. mode is negacyclic, else [`Error::NotImplemented`]
    /// 4. q ≡ 1 (mod 2n), else [`Error::InvalidParameter`]
    /// 5. a root table entry exists, else [`Error::UnsupportedParameters`]
    pub fn with_mode(n: usize, q: u64, mode: NttMode) -> Result<Self> {
        if !n.is_power_of_two() {
            return Err(Error::InvalidParameter(format!(
                "n must be a power of 2, got n={n}"
            )));
        }
        if q < 2 {
            return Err(Error::InvalidParameter(format!(
                "modulus must be at least 2, got q={q}"
            )));
        }
        if mode == NttMode::Cyclic {
            return Err(Error::NotImplemented("cyclic NTT mode"));
        }
        let two_n = 2 * n as u64;
        if (q - 1) % two_n != 0 {
            return Err(Error::InvalidParameter(format!(
                "q must be ≡ 1 mod 2n, got q={q}, n={n}"
            )));
        }
        let psi = lookup_psi(n, q).ok_or(Error::UnsupportedParameters { n, q })?;

        let psi_inv = mod_inv(psi, q)?;
        let omega = mul_mod(psi, psi, q);
        let omega_inv = mod_inv(omega, q)?;
        let n_inv = mod_inv(n as u64 % q, q)?;

        debug_assert_eq!(pow_mod(psi, n as u64, q), q - 1);
        debug!(n, q, psi, "built NTT tables");

        Ok(Self {
            n,
            q,
            mode,
            log_n: n.trailing_zeros(),
            psi,
            psi_inv,
            omega,
            omega_inv,
            n_inv,
            twist: powers(psi, n, q),
            untwist: powers(psi_inv, n, q),
            omega_powers: powers(omega, n / 2, q),
            omega_inv_powers: powers(omega_inv, n / 2, q),
        })
    }

    /// Shared tables for (n, q), built on first use
    ///
    /// Contexts live for the rest of the process in a read-mostly map keyed
    /// by (n, q). Failed constructions are not remembered.
    pub fn cached(n: usize, q: u64) -> Result<Arc<Self>> {
        static CACHE: OnceLock<RwLock<HashMap<(usize, u64), Arc<NttTables>>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));

        if let Some(tables) = cache.read().get(&(n, q)) {
            return Ok(Arc::clone(tables));
        }

        let built = Arc::new(Self::new(n, q)?);
        let mut guard = cache.write();
        Ok(Arc::clone(guard.entry((n, q)).or_insert(built)))
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl NttTables {
    /// Transform length n
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Modulus q
    pub fn modulus(&self) -> u64 {
        self.q
    }

    /// Convolution the tables were built for
    pub fn mode(&self) -> NttMode {
        self.mode
    }

    /// Primitive 2n-th root ψ
    pub fn psi(&self) -> u64 {
        self.psi
    }

    /// Primitive n-th root ω = ψ²
    pub fn omega(&self) -> u64 {
        self.omega
    }

    /// ω^{-1} mod q
    pub fn omega_inv(&self) -> u64 {
        self.omega_inv
    }

    /// n^{-1} mod q
    pub fn n_inv(&self) -> u64 {
        self.n_inv
    }

    /// Pre-twist table ψ^i
    pub fn twist(&self) -> &[u64] {
        &self.twist
    }

    /// Post-twist table ψ^{-i}
    pub fn untwist(&self) -> &[u64] {
        &self.untwist
    }
}

// ============================================================================
// Transforms
// ============================================================================

impl NttTables {
    fn check_len(&self, a: &[u64]) -> Result<()> {
        if a.len() != self.n {
            return Err(Error::InvalidLength {
                expected: self.n,
                actual: a.len(),
            });
        }
        Ok(())
    }

    fn check_ring(&self, elem: &RingElement) -> Result<()> {
        if elem.dimension() != self.n || elem.modulus() != self.q {
            return Err(Error::incompatible(
                (self.n, self.q),
                (elem.dimension(), elem.modulus()),
            ));
        }
        Ok(())
    }

    fn check_element(&self, elem: &RingElement) -> Result<()> {
        if elem.dimension() != self.n || elem.modulus() != self.q {
            return Err(Error::InvalidParameter(format!(
                "element ring (n={}, q={}) does not match NTT tables (n={}, q={})",
                elem.dimension(),
                elem.modulus(),
                self.n,
                self.q
            )));
        }
        Ok(())
    }

    /// Forward negacyclic NTT, in place
    ///
    /// Inputs must be reduced mod q.
    pub fn forward(&self, a: &mut [u64]) -> Result<()> {
        self.check_len(a)?;

        // Pre-twist: a_i ← a_i · ψ^i
        for (coeff, &tw) in a.iter_mut().zip(&self.twist) {
            *coeff = mul_mod(*coeff, tw, self.q);
        }

        self.bit_reverse_permute(a);
        self.cooley_tukey(a, &self.omega_powers);
        Ok(())
    }

    /// Inverse negacyclic NTT, in place
    ///
    /// Runs the forward network with ω^{-1}, scales by n^{-1}, then
    /// post-twists by ψ^{-i}.
    pub fn inverse(&self, a: &mut [u64]) -> Result<()> {
        self.check_len(a)?;

        self.bit_reverse_permute(a);
        self.cooley_tukey(a, &self.omega_inv_powers);

        for (coeff, &utw) in a.iter_mut().zip(&self.untwist) {
            *coeff = mul_mod(mul_mod(*coeff, self.n_inv, self.q), utw, self.q);
        }
        Ok(())
    }

    /// Forward transform of a ring element, replacing its coefficients
    pub fn forward_element(&self, elem: &mut RingElement) -> Result<()> {
        self.check_element(elem)?;
        let mut buf = elem.coeffs().to_vec();
        self.forward(&mut buf)?;
        elem.replace_coeffs(&buf)
    }

    /// Inverse transform of a ring element, replacing its coefficients
    pub fn inverse_element(&self, elem: &mut RingElement) -> Result<()> {
        self.check_element(elem)?;
        let mut buf = elem.coeffs().to_vec();
        self.inverse(&mut buf)?;
        elem.replace_coeffs(&buf)
    }

    fn bit_reverse_permute(&self, a: &mut [u64]) {
        for i in 0..self.n {
            let rev_i = bit_reverse(i, self.log_n);
            if i < rev_i {
                a.swap(i, rev_i);
            }
        }
    }

    /// Cooley-Tukey decimation-in-time stages over bit-reversed input
    fn cooley_tukey(&self, a: &mut [u64], roots: &[u64]) {
        let (n, q) = (self.n, self.q);

        for s in 0..self.log_n {
            let m = 1usize << (s + 1);
            let half_m = m / 2;
            let stride = n / m;

            for chunk in a.chunks_mut(m) {
                let (lo, hi) = chunk.split_at_mut(half_m);

                for (j, (u, v)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
                    // (u, v) → (u + ω^j·v, u - ω^j·v), ω^{n/2} = -1 gives the sign
                    let t = mul_mod(roots[j * stride], *v, q);
                    (*u, *v) = (add_mod(*u, t, q), sub_mod(*u, t, q));
                }
            }
        }
    }

    /// Pointwise multiply two NTT vectors
    pub fn pointwise_mul(&self, a: &[u64], b: &[u64]) -> Result<Vec<u64>> {
        self.check_len(a)?;
        self.check_len(b)?;
        Ok(a.iter()
            .zip(b)
            .map(|(&x, &y)| mul_mod(x, y, self.q))
            .collect())
    }

    /// Ring multiplication using NTT
    pub fn ring_mul(&self, a: &RingElement, b: &RingElement) -> Result<RingElement> {
        self.check_ring(a)?;
        self.check_ring(b)?;

        let mut a_ntt = a.coeffs().to_vec();
        let mut b_ntt = b.coeffs().to_vec();

        self.forward(&mut a_ntt)?;
        self.forward(&mut b_ntt)?;

        let mut c_ntt = self.pointwise_mul(&a_ntt, &b_ntt)?;
        self.inverse(&mut c_ntt)?;

        Ok(RingElement::from_reduced(c_ntt, self.q))
    }
}

/// Reverse the low `bits` bits of an index
pub fn bit_reverse(x: usize, bits: u32) -> usize {
    (0..bits).fold(0, |acc, i| (acc << 1) | ((x >> i) & 1))
}

// ============================================================================
// Tests
// ============================================================================
