//! Uniform and Gaussian sampling of ring elements.
//!
//! ⚠️ NOT CONSTANT-TIME. The Gaussian is floating-point Box-Muller rounded to
//! the nearest integer.
//!
//! Every draw goes through [`RngCore::try_fill_bytes`], so an entropy failure
//! surfaces as [`Error::RandomSource`] instead of a panic.

use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::lattice::RingElement;

const MANTISSA_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Draw one 64-bit word from a secure source
pub fn next_u64<R: RngCore + CryptoRng>(rng: &mut R) -> Result<u64> {
    let mut buf = [0u8; 8];
    rng.try_fill_bytes(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Uniform value in [0, q) by rejection on 64-bit draws
pub fn uniform_mod<R: RngCore + CryptoRng>(rng: &mut R, q: u64) -> Result<u64> {
    if q == 0 {
        return Err(Error::InvalidParameter("modulus must be positive".to_string()));
    }
    // 2^64 mod q; draws above u64::MAX - rem would bias low residues
    let rem = (u64::MAX % q + 1) % q;
    loop {
        let r = next_u64(rng)?;
        if r <= u64::MAX - rem {
            return Ok(r % q);
        }
    }
}

/// Standard normal sample via Box-Muller
///
/// u1 ∈ (0, 1] keeps the logarithm finite; u2 ∈ [0, 1).
pub fn standard_normal<R: RngCore + CryptoRng>(rng: &mut R) -> Result<f64> {
    let u1 = ((next_u64(rng)? >> 11) + 1) as f64 * MANTISSA_SCALE;
    let u2 = (next_u64(rng)? >> 11) as f64 * MANTISSA_SCALE;
    Ok((-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos())
}

/// Rounded Gaussian integer with standard deviation σ
pub fn gaussian_int<R: RngCore + CryptoRng>(rng: &mut R, sigma: f64) -> Result<i64> {
    Ok((standard_normal(rng)? * sigma).round() as i64)
}

/// Ring element with coefficients uniform in [0, q)
pub fn sample_uniform<R: RngCore + CryptoRng>(
    rng: &mut R,
    n: usize,
    q: u64,
) -> Result<RingElement> {
    let coeffs = (0..n)
        .map(|_| uniform_mod(rng, q))
        .collect::<Result<Vec<_>>>()?;
    RingElement::from_coeffs(coeffs, q)
}

/// Ring element with rounded Gaussian coefficients reduced mod q
pub fn sample_gaussian<R: RngCore + CryptoRng>(
    rng: &mut R,
    n: usize,
    q: u64,
    sigma: f64,
) -> Result<RingElement> {
    let coeffs = (0..n)
        .map(|_| gaussian_int(rng, sigma))
        .collect::<Result<Vec<_>>>()?;
    RingElement::from_signed(&coeffs, q)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    /// Entropy source that always fails.
    pub(crate) struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!("sampling must use try_fill_bytes")
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!("sampling must use try_fill_bytes")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("sampling must use try_fill_bytes")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for FailingRng {}

    fn test_rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(7)
    }

    #[test]
    fn test_uniform_in_range() {
        let mut rng = test_rng();
        for q in [2u64, 17, 3329, 16384] {
            for _ in 0..1000 {
                assert!(uniform_mod(&mut rng, q).unwrap() < q);
            }
        }
        // Power-of-two modulus never rejects
        assert!(uniform_mod(&mut rng, 1 << 32).unwrap() < 1 << 32);
        assert!(uniform_mod(&mut rng, 0).is_err());
    }

    #[test]
    fn test_uniform_covers_small_modulus() {
        let mut rng = test_rng();
        let mut seen = [false; 17];
        for _ in 0..2000 {
            seen[uniform_mod(&mut rng, 17).unwrap() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = test_rng();
        let sigma = 3.2;
        let samples: Vec<f64> = (0..20_000)
            .map(|_| gaussian_int(&mut rng, sigma).unwrap() as f64)
            .collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.15, "mean {mean}");
        // Rounding adds 1/12 to the variance
        assert!((var.sqrt() - sigma).abs() < 0.2, "stddev {}", var.sqrt());
    }

    #[test]
    fn test_gaussian_poly_is_small() {
        let mut rng = test_rng();
        let e = sample_gaussian(&mut rng, 256, 3329, 1.6).unwrap();
        assert_eq!(e.dimension(), 256);
        assert_eq!(e.modulus(), 3329);
        // Box-Muller with 53-bit u1 cannot exceed ~8.6σ
        assert!(e.linf_norm() <= 14);
    }

    #[test]
    fn test_sample_uniform_poly() {
        let mut rng = test_rng();
        let a = sample_uniform(&mut rng, 32, 7681).unwrap();
        assert_eq!(a.dimension(), 32);
        assert!(a.coeffs().iter().all(|&c| c < 7681));
        assert_ne!(a, sample_uniform(&mut rng, 32, 7681).unwrap());
    }

    #[test]
    fn test_rng_failure_propagates() {
        let err = next_u64(&mut FailingRng).unwrap_err();
        assert!(matches!(err, Error::RandomSource(_)));
        assert!(matches!(
            sample_gaussian(&mut FailingRng, 8, 17, 3.0),
            Err(Error::RandomSource(_))
        ));
        assert!(matches!(
            sample_uniform(&mut FailingRng, 8, 17),
            Err(Error::RandomSource(_))
        ));
    }
}
