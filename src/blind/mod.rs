//! Blind signatures over RLWE
//!
//! - [`protocol`]: key generation, blinding, signing, unblinding, verification
//! - [`keys`]: signer key material
//! - [`sampling`]: uniform and Gaussian ring elements from a secure RNG

pub mod keys;
pub mod protocol;
pub mod sampling;

pub use keys::{PublicKey, SecretKey};
pub use protocol::{BlindSignature, BlindedMessage};
