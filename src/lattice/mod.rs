//! Ring arithmetic over Z_q[X]/(X^n + 1)
//!
//! Modular helpers, the precomputed root table, the negacyclic NTT, ring
//! elements with their multiplication backends, and the parameter catalog.

pub mod modular;
pub mod ntt;
pub mod params;
pub mod ring;
pub mod ring_mul;
pub mod roots;

pub use modular::{add_mod, mod_inv, mul_mod, neg_mod, pow_mod, reduce_signed, sub_mod};
pub use ntt::{NttMode, NttTables};
pub use params::{
    ParameterSet, SecurityLevel, ALL_LEVELS, DEFAULT_SIGMA, HIGH, KYBER512, MODERATE, TEST_SMALL,
    TEST_TINY,
};
pub use ring::RingElement;
pub use ring_mul::{AutoBackend, NttBackend, RingMulBackend, SchoolbookBackend};
pub use roots::{has_tables, lookup_psi, PRECOMPUTED_ROOTS};
