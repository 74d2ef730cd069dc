//! RLWE blind signature protocol
//!
//! # Flow
//!
//! ```text
//! signer:  a ← U(R_q), s, e ← χ_σ,  b = a·s + e
//! client:  r ← χ_σ,  Y = H(m),  blinded = Y + a·r          (keeps r)
//! signer:  e1 ← χ_σ,  blind_sig = s·blinded + e1
//! client:  sig = blind_sig - r·b
//!                = s·Y + e1 - r·e
//! verify:  signal(sig) == signal(s·H(m))
//! ```
//!
//! H(m) has every coefficient in {0, q/2}, so s·H(m) sits near 0 or q/2 in
//! each coordinate. The residual noise e1 - r·e stays well below q/4 for every
//! catalog set, which is why comparing signals tolerates it.
//!
//! Verification needs the secret s. This is a designated-verifier scheme: the
//! signer (or whoever holds s) checks signatures.

use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};

use super::keys::{PublicKey, SecretKey};
use super::sampling::{sample_gaussian, sample_uniform};
use crate::error::{Error, Result};
use crate::hash::{fingerprint, sha256, DIGEST_LEN};
use crate::lattice::{ParameterSet, RingElement, SecurityLevel, DEFAULT_SIGMA};

/// Client-side output of the blinding step.
///
/// `factor` must be kept by the client until [`BlindSignature::compute_signature`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlindedMessage {
    /// Y + a·r, sent to the signer
    pub blinded: RingElement,
    /// Blinding factor r
    pub factor: RingElement,
}

/// Protocol instance owning one signer key pair.
pub struct BlindSignature {
    n: usize,
    q: u64,
    sigma: f64,
    public: PublicKey,
    secret: SecretKey,
}

impl std::fmt::Debug for BlindSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlindSignature")
            .field("n", &self.n)
            .field("q", &self.q)
            .field("sigma", &self.sigma)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Construction
// ============================================================================

impl BlindSignature {
    /// Instance over explicit parameters
    ///
    /// σ ≤ 0 (or non-finite) falls back to [`DEFAULT_SIGMA`]. Keys start at
    /// zero until [`BlindSignature::generate_keys`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if n is not a power of two or q < 2.
    pub fn new(n: usize, q: u64, sigma: f64) -> Result<Self> {
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
        let sigma = if sigma.is_finite() && sigma > 0.0 {
            sigma
        } else {
            DEFAULT_SIGMA
        };

        let instance = Self {
            n,
            q,
            sigma,
            public: PublicKey::zero(n, q)?,
            secret: SecretKey::zero(n, q)?,
        };
        instance.validate_security();
        Ok(instance)
    }

    /// Instance over a catalog parameter set
    ///
    /// Insecure sets are accepted with a warning.
    pub fn from_level(level: SecurityLevel) -> Result<Self> {
        let p = level.params();

        info!(
            security_level = %level,
            parameter_set = p.name,
            n = p.n,
            q = p.q,
            sigma = p.sigma,
            classical_bits = p.classical_bits,
            quantum_bits = p.quantum_bits,
            "RLWE instance created"
        );
        if !p.is_secure {
            warn!(
                parameter_set = p.name,
                "INSECURE PARAMETERS: only use for testing and development, \
                 use KYBER512 or higher in production"
            );
        }

        Self::new(p.n, p.q, p.sigma)
    }

    fn validate_security(&self) {
        let alpha = self.sigma / self.q as f64;
        info!(
            n = self.n,
            q = self.q,
            sigma = self.sigma,
            alpha,
            "validating security parameters"
        );

        if self.n < 256 {
            warn!(
                n = self.n,
                estimated_bits = self.n as f64 * 0.5,
                "ring dimension below recommended minimum of 256"
            );
        }
        if alpha > 0.01 {
            warn!(alpha, "large noise ratio may affect correctness");
        }
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl BlindSignature {
    /// Ring dimension n
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Modulus q
    pub fn modulus(&self) -> u64 {
        self.q
    }

    /// Gaussian width σ in effect
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Current public key (zero before key generation)
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Heuristic description of this instance's parameters
    ///
    /// See [`ParameterSet::estimate`]; the bit counts are advisory.
    pub fn parameters(&self) -> ParameterSet {
        ParameterSet::estimate(self.n, self.q, self.sigma)
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
}

// ============================================================================
// Protocol Operations
// ============================================================================

impl BlindSignature {
    /// Sample a fresh key pair, replacing the current one
    ///
    /// a is uniform; s and e are rounded Gaussians of width σ; b = a·s + e.
    pub fn generate_keys<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<()> {
        let a = sample_uniform(rng, self.n, self.q)?;
        let s = sample_gaussian(rng, self.n, self.q, self.sigma)?;
        let e = sample_gaussian(rng, self.n, self.q, self.sigma)?;

        let b = a.multiply(&s)?.add(&e)?;

        debug!(
            a = %fingerprint(&a),
            b = %fingerprint(&b),
            "generated key pair"
        );

        self.public = PublicKey { a, b };
        self.secret = SecretKey::new(s);
        Ok(())
    }

    /// Expand a message into a ring element with coefficients in {0, q/2}
    ///
    /// Block k is SHA-256(k as u32 little-endian ‖ message). Digest bits are
    /// read most significant first within each byte; a set bit becomes q/2.
    pub fn hash_to_polynomial(&self, message: &[u8]) -> RingElement {
        let half = self.q / 2;
        let mut coeffs = Vec::with_capacity(self.n);
        let mut block = Vec::with_capacity(4 + message.len());
        let mut counter: u32 = 0;

        while coeffs.len() < self.n {
            block.clear();
            block.extend_from_slice(&counter.to_le_bytes());
            block.extend_from_slice(message);
            let digest = sha256(&block);

            let bits = digest
                .iter()
                .flat_map(|&byte| (0..8).rev().map(move |bit| (byte >> bit) & 1))
                .take(self.n - coeffs.len());
            coeffs.extend(bits.map(|bit| if bit == 1 { half } else { 0 }));

            counter = counter.wrapping_add(1);
        }

        debug_assert_eq!(coeffs.len(), self.n);
        debug!(
            message_len = message.len(),
            blocks = self.n.div_ceil(DIGEST_LEN * 8),
            "hashed message to polynomial"
        );
        RingElement::from_reduced(coeffs, self.q)
    }

    /// Client step: blind a message with a fresh Gaussian factor r
    ///
    /// Returns (Y + a·r, r) where Y = H(message).
    pub fn compute_blinded_message<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        message: &[u8],
    ) -> Result<BlindedMessage> {
        let factor = sample_gaussian(rng, self.n, self.q, self.sigma)?;
        let y = self.hash_to_polynomial(message);
        let blinded = y.add(&self.public.a.multiply(&factor)?)?;

        debug!(blinded = %fingerprint(&blinded), "computed blinded message");
        Ok(BlindedMessage { blinded, factor })
    }

    /// Signer step: s·blinded + e1 with fresh Gaussian e1
    pub fn blind_sign<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        blinded: &RingElement,
    ) -> Result<RingElement> {
        self.check_ring(blinded)?;
        let e1 = sample_gaussian(rng, self.n, self.q, self.sigma)?;
        let signature = self.secret.s().multiply(blinded)?.add(&e1)?;

        debug!(blind_signature = %fingerprint(&signature), "signed blinded message");
        Ok(signature)
    }

    /// Client step: unblind as blind_sig - factor·public_b
    pub fn compute_signature(
        &self,
        blind_signature: &RingElement,
        factor: &RingElement,
        public_b: &RingElement,
    ) -> Result<RingElement> {
        self.check_ring(blind_signature)?;
        self.check_ring(factor)?;
        self.check_ring(public_b)?;

        let signature = blind_signature.sub(&factor.multiply(public_b)?)?;
        debug!(signature = %fingerprint(&signature), "unblinded signature");
        Ok(signature)
    }

    /// Check signal(signature) == signal(s·H(message))
    ///
    /// Returns `Ok(false)` at the first differing coefficient. Errors only
    /// when the signature lives in a different ring.
    pub fn verify(&self, message: &[u8], signature: &RingElement) -> Result<bool> {
        self.check_ring(signature)?;

        let z = self.hash_to_polynomial(message);
        let expected = self.secret.s().multiply(&z)?.signal();
        let actual = signature.signal();

        let mismatch = actual
            .coeffs()
            .iter()
            .zip(expected.coeffs())
            .position(|(a, e)| a != e);

        match mismatch {
            Some(index) => {
                debug!(index, "verification failed: signal mismatch");
                Ok(false)
            }
            None => {
                debug!("verification succeeded");
                Ok(true)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
