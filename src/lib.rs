//! # rlwe-blind
//!
//! Blind signatures from Ring Learning-With-Errors over
//! R_q = Z_q[X]/(X^n + 1), with NTT-accelerated ring multiplication.
//!
//! - **Ring engine**: modular arithmetic, precomputed roots of unity, the
//!   negacyclic NTT, and ring elements with a schoolbook fallback
//! - **Protocol**: key generation, blinding, blind signing, unblinding and
//!   noise-tolerant verification
//!
//! ## Modules
//!
//! - [`lattice`]: ring arithmetic and the parameter catalog
//! - [`blind`]: the blind signature protocol
//! - [`hash`]: SHA-256 helpers
//! - [`error`]: crate error type
//!
//! ## Example
//!
//! ```
//! use rand::rngs::OsRng;
//! use rlwe_blind::{BlindSignature, SecurityLevel};
//!
//! let mut rng = OsRng;
//! let mut scheme = BlindSignature::from_level(SecurityLevel::TestSmall)?;
//! scheme.generate_keys(&mut rng)?;
//!
//! let blinded = scheme.compute_blinded_message(&mut rng, b"vote: yes")?;
//! let blind_sig = scheme.blind_sign(&mut rng, &blinded.blinded)?;
//! let sig = scheme.compute_signature(&blind_sig, &blinded.factor, &scheme.public_key().b)?;
//!
//! assert!(scheme.verify(b"vote: yes", &sig)?);
//! # Ok::<(), rlwe_blind::Error>(())
//! ```

pub mod blind;
pub mod error;
pub mod hash;
pub mod lattice;

pub use blind::{BlindSignature, BlindedMessage, PublicKey, SecretKey};
pub use error::{Error, Result};
pub use lattice::{NttTables, ParameterSet, RingElement, SecurityLevel};
