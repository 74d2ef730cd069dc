//! Modular arithmetic operations for Z_q
//!
//! Pure helpers over a runtime modulus. Inputs are expected to be canonical
//! residues in [0, q) and every output is one.
//!
//! # Width
//!
//! Additions stay below 2q and products are formed in a 128-bit intermediate,
//! so every helper is exact for any modulus q < 2^64. The shipped parameter
//! sets all use q < 2^24, well inside that bound.

use crate::error::{Error, Result};

/// Add two values modulo q
///
/// Assumes a, b < q. Returns (a + b) mod q.
#[inline(always)]
pub fn add_mod(a: u64, b: u64, q: u64) -> u64 {
    let (sum, overflow) = a.overflowing_add(b);
    if overflow || sum >= q {
        sum.wrapping_sub(q)
    } else {
        sum
    }
}

/// Subtract two values modulo q
///
/// Assumes a, b < q. Returns (a - b) mod q.
#[inline(always)]
pub fn sub_mod(a: u64, b: u64, q: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        q - b + a
    }
}

/// Multiply two values modulo q
///
/// Uses a 128-bit intermediate, so `a * b` never overflows.
#[inline(always)]
pub fn mul_mod(a: u64, b: u64, q: u64) -> u64 {
    ((a as u128 * b as u128) % q as u128) as u64
}

/// Negate a value modulo q
///
/// Returns -a mod q = q - a (or 0 if a == 0).
#[inline(always)]
pub fn neg_mod(a: u64, q: u64) -> u64 {
    if a == 0 {
        0
    } else {
        q - a
    }
}

/// Compute base^exp mod modulus by square-and-multiply
///
/// `modulus` must be at least 1; a zero modulus panics.
pub fn pow_mod(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    debug_assert!(modulus > 0, "pow_mod with zero modulus");
    let mut result = 1 % modulus;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        exp >>= 1;
        base = mul_mod(base, base, modulus);
    }
    result
}

/// Compute the modular inverse with the extended Euclidean algorithm
///
/// Returns a^{-1} mod q such that a · a^{-1} ≡ 1 (mod q).
///
/// # Errors
///
/// [`Error::InvalidParameter`] when q = 0, [`Error::DomainError`] when
/// gcd(a, q) ≠ 1, which includes a ≡ 0.
pub fn mod_inv(a: u64, q: u64) -> Result<u64> {
    if q == 0 {
        return Err(Error::InvalidParameter(
            "modulus must be positive".to_string(),
        ));
    }
    let (mut old_r, mut r) = ((a % q) as i128, q as i128);
    let (mut old_s, mut s) = (1i128, 0i128);

    while r != 0 {
        let quotient = old_r / r;
        (old_r, r) = (r, old_r - quotient * r);
        (old_s, s) = (s, old_s - quotient * s);
    }

    if old_r != 1 {
        return Err(Error::DomainError {
            value: a,
            modulus: q,
        });
    }
    Ok(old_s.rem_euclid(q as i128) as u64)
}

/// Reduce a signed value to [0, q)
#[inline(always)]
pub fn reduce_signed(a: i64, q: u64) -> u64 {
    (a as i128).rem_euclid(q as i128) as u64
}

// ============================================================================
// Tests
// ============================================================================
