//! Signer key material.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Result;
use crate::lattice::RingElement;

/// Public key (a, b = a·s + e).
///
/// Freely clonable; a verifier-side copy can be shared across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// Uniform ring element a
    pub a: RingElement,
    /// b = a·s + e
    pub b: RingElement,
}

impl PublicKey {
    /// Zero key for the ring (n, q), held before key generation
    pub fn zero(n: usize, q: u64) -> Result<Self> {
        Ok(Self {
            a: RingElement::zero(n, q)?,
            b: RingElement::zero(n, q)?,
        })
    }
}

/// Secret key: the Gaussian ring element s.
///
/// Zeroized on drop to prevent secret material from lingering in memory.
/// Does not implement `Debug` to prevent accidental logging of secrets.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    s: RingElement,
}

impl SecretKey {
    pub(crate) fn new(s: RingElement) -> Self {
        Self { s }
    }

    /// Zero key for the ring (n, q), held before key generation
    pub fn zero(n: usize, q: u64) -> Result<Self> {
        RingElement::zero(n, q).map(Self::new)
    }

    pub(crate) fn s(&self) -> &RingElement {
        &self.s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_keys() {
        let pk = PublicKey::zero(8, 7681).unwrap();
        assert!(pk.a.coeffs().iter().all(|&c| c == 0));
        assert_eq!(pk.a, pk.b);

        let sk = SecretKey::zero(8, 7681).unwrap();
        assert_eq!(sk.s(), &RingElement::zero(8, 7681).unwrap());
    }

    #[test]
    fn test_secret_zeroize() {
        let s = RingElement::from_coeffs(vec![1, 2, 3, 4], 17).unwrap();
        let mut sk = SecretKey::new(s);
        sk.zeroize();
        assert_eq!(sk.s().dimension(), 4);
        assert_eq!(sk.s().modulus(), 17);
        assert!(sk.s().coeffs().iter().all(|&c| c == 0));
        assert_eq!(sk.s().multiply(sk.s()).unwrap(), RingElement::zero(4, 17).unwrap());
    }
}
