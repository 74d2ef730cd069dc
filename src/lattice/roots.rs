//! Precomputed primitive 2n-th roots of unity
//!
//! The negacyclic transform over Z_q[X]/(X^n + 1) needs ψ with ψ^n ≡ -1 (mod q).
//! Roots are generated offline with [`find_primitive_2d_root`] and frozen into
//! [`PRECOMPUTED_ROOTS`]; the transform path only ever looks them up.
//!
//! | n    | q       | ψ       |
//! |------|---------|---------|
//! | 4    | 17      | 9       |
//! | 8    | 17      | 3       |
//! | 8    | 7681    | 7154    |
//! | 16   | 7681    | 6315    |
//! | 32   | 7681    | 2645    |
//! | 64   | 7681    | 5258    |
//! | 128  | 7681    | 5685    |
//! | 256  | 7681    | 4055    |
//! | 256  | 12289   | 3400    |
//! | 512  | 12289   | 10302   |
//! | 1024 | 12289   | 1945    |
//! | 1024 | 18433   | 17660   |
//! | 256  | 8380417 | 6757063 |

use super::modular::pow_mod;

/// One row of the root table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootEntry {
    /// Ring dimension n
    pub n: usize,
    /// Prime modulus q ≡ 1 (mod 2n)
    pub q: u64,
    /// Primitive 2n-th root of unity mod q
    pub psi: u64,
}

const fn entry(n: usize, q: u64, psi: u64) -> RootEntry {
    RootEntry { n, q, psi }
}

/// Every (n, q) pair with NTT support.
pub const PRECOMPUTED_ROOTS: &[RootEntry] = &[
    entry(4, 17, 9),
    entry(8, 17, 3),
    entry(8, 7681, 7154),
    entry(16, 7681, 6315),
    entry(32, 7681, 2645),
    entry(64, 7681, 5258),
    entry(128, 7681, 5685),
    entry(256, 7681, 4055),
    entry(256, 12289, 3400),
    entry(512, 12289, 10302),
    entry(1024, 12289, 1945),
    entry(1024, 18433, 17660),
    entry(256, 8_380_417, 6_757_063),
];

/// Look up the precomputed ψ for (n, q).
pub fn lookup_psi(n: usize, q: u64) -> Option<u64> {
    PRECOMPUTED_ROOTS
        .iter()
        .find(|e| e.n == n && e.q == q)
        .map(|e| e.psi)
}

/// Capability check: does the NTT path support this ring?
pub fn has_tables(n: usize, q: u64) -> bool {
    lookup_psi(n, q).is_some()
}

/// Find a primitive 2d-th root of unity mod q.
///
/// Offline generator for [`PRECOMPUTED_ROOTS`]. Scans g = 2, 3, ... and
/// returns the first ψ = g^{(q-1)/(2d)} with ψ^{2d} = 1 and ψ^d = -1.
/// Requires q ≡ 1 (mod 2d). Runs in O(q log q) worst case, which is why
/// the transform never calls it.
pub fn find_primitive_2d_root(q: u64, d: usize) -> Option<u64> {
    let two_d = 2 * d as u64;
    if q < 3 || q % two_d != 1 {
        return None;
    }

    let exp = (q - 1) / two_d;
    (2..q)
        .map(|g| pow_mod(g, exp, q))
        .find(|&psi| pow_mod(psi, two_d, q) == 1 && pow_mod(psi, d as u64, q) == q - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries_are_primitive() {
        for e in PRECOMPUTED_ROOTS {
            assert!(e.n.is_power_of_two(), "n={} not a power of two", e.n);
            assert_eq!(e.q % (2 * e.n as u64), 1, "q={} not ≡ 1 (mod 2n)", e.q);
            assert_eq!(pow_mod(e.psi, e.n as u64, e.q), e.q - 1, "ψ^n ≠ -1 for {e:?}");
            assert_eq!(pow_mod(e.psi, 2 * e.n as u64, e.q), 1, "ψ^2n ≠ 1 for {e:?}");
        }
    }

    #[test]
    fn test_table_matches_generator() {
        for e in PRECOMPUTED_ROOTS.iter().filter(|e| e.q < 100_000) {
            assert_eq!(find_primitive_2d_root(e.q, e.n), Some(e.psi), "{e:?}");
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup_psi(4, 17), Some(9));
        assert_eq!(lookup_psi(512, 12289), Some(10302));
        assert!(has_tables(32, 7681));

        // Kyber's q = 3329 is only ≡ 1 (mod 256)
        assert!(!has_tables(256, 3329));
        assert!(!has_tables(1024, 16384));
        assert_eq!(find_primitive_2d_root(3329, 256), None);
    }
}
