//! # Witness — Deterministic Miller–Rabin Strong-Pseudoprime Testing
//!
//! A single Miller–Rabin round for one witness base, and the aggregate
//! test over a fixed witness set. With the witness sets in
//! [`witness_set_for`], the test is an exact decision procedure — not a
//! probabilistic one — for every 64-bit candidate.
//!
//! ## Algorithm
//!
//! Write n − 1 = t·2^s with t odd. For a witness base a, compute
//! b = a^t mod n. The candidate passes for this witness if b ≡ ±1, or if
//! some repeated squaring of b reaches n − 1 before reaching 1. Reaching 1
//! first exhibits a nontrivial square root of 1, which cannot exist modulo
//! a prime, so the candidate is proven composite; so is exhausting the
//! squarings without reaching n − 1.
//!
//! All per-candidate arithmetic runs in Montgomery form
//! ([`MontgomeryCtx`]); the context is built once per candidate and shared
//! across witnesses.
//!
//! ## Witness sets
//!
//! Each bracket's list is the smallest set published as sufficient for
//! every candidate below the bracket ceiling; the final seven-base set is
//! sufficient beyond 3.3·10^24, which covers all of u64. A passing witness
//! never proves primality on its own — sufficiency is a property of the
//! whole set over its bracket.
//!
//! ## References
//!
//! - G. L. Miller, "Riemann's Hypothesis and Tests for Primality",
//!   J. Comput. Syst. Sci., 13(3):300–317, 1976.
//! - M. O. Rabin, "Probabilistic Algorithm for Testing Primality",
//!   Journal of Number Theory, 12(1):128–138, 1980.
//! - G. Jaeschke, "On Strong Pseudoprimes to Several Bases", Mathematics
//!   of Computation, 61(204):915–926, 1993.
//! - W. Izykowski, "Best known SPRP bases", <https://miller-rabin.appspot.com/>.

use tracing::trace;

use crate::modmath::MontgomeryCtx;

/// Witness sets keyed by candidate ceiling, ascending. The first entry
/// whose ceiling exceeds the candidate applies.
const WITNESS_BRACKETS: [(u64, &[u64]); 8] = [
    (9_080_191, &[31, 73]),
    (19_471_033, &[2, 299_417]),
    (38_010_307, &[2, 9_332_593]),
    (316_349_281, &[11_000_544, 31_481_107]),
    (4_759_123_141, &[2, 7, 61]),
    (105_936_894_253, &[2, 1_005_905_886, 1_340_600_841]),
    (31_858_317_218_647, &[2, 642_735, 553_174_392, 3_046_413_974]),
    (
        3_071_837_692_357_849,
        &[2, 75_088, 642_735, 203_659_041, 3_613_982_119],
    ),
];

/// Sufficient for every remaining 64-bit candidate (proven below
/// 3,317,044,064,679,887,385,961,981).
const WITNESS_SET_WIDE: &[u64] = &[2, 325, 9375, 28_178, 450_775, 9_780_504, 1_795_265_022];

/// The minimal witness set proven sufficient for candidates of n's
/// magnitude. Total over u64.
pub fn witness_set_for(n: u64) -> &'static [u64] {
    for &(ceiling, set) in &WITNESS_BRACKETS {
        if n < ceiling {
            return set;
        }
    }
    WITNESS_SET_WIDE
}

/// One strong-probable-prime round for a single witness, in Montgomery
/// form. `s` and `t` are the odd-part decomposition of n − 1; `base` must
/// already be reduced mod n and ≥ 2.
///
/// Returns `true` if the witness fails to prove compositeness, `false` if
/// n is proven composite.
fn strong_probable_prime(ctx: &MontgomeryCtx, base: u64, s: u32, t: u64) -> bool {
    let one = ctx.one();
    // (n-1)·R mod n = n - (R mod n), since R mod n is never 0 for odd n.
    let minus_one = ctx.modulus() - one;

    let mut b = ctx.pow(ctx.to_mont(base), t);
    if b == one || b == minus_one {
        return true;
    }
    for _ in 1..s {
        b = ctx.sqr(b);
        if b == minus_one {
            return true;
        }
        if b == one {
            // Nontrivial square root of 1: proven composite.
            return false;
        }
    }
    false
}

/// Deterministic Miller–Rabin over a witness set. Requires odd n > 2.
///
/// Witnesses at or above n are reduced mod n first; a witness that
/// reduces below 2 carries no information and is skipped (this only
/// happens for candidates small enough to be settled by the trial
/// filter anyway). Any failing witness is conclusive.
pub fn miller_rabin(n: u64, bases: &[u64]) -> bool {
    debug_assert!(n > 2 && n & 1 == 1, "miller_rabin requires odd n > 2");

    let s = (n - 1).trailing_zeros();
    let t = (n - 1) >> s;
    let ctx = MontgomeryCtx::new(n);

    for &base in bases {
        let base = if base >= n { base % n } else { base };
        if base < 2 {
            continue;
        }
        if !strong_probable_prime(&ctx, base, s, t) {
            trace!(n, base, "witness proved candidate composite");
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_scan_is_ordered_and_total() {
        // Ceilings strictly ascend, so the first-match scan is well defined.
        for pair in WITNESS_BRACKETS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
        assert_eq!(witness_set_for(23_003), &[31, 73]);
        assert_eq!(witness_set_for(9_080_190), &[31, 73]);
        assert_eq!(witness_set_for(9_080_191), &[2, 299_417]);
        assert_eq!(witness_set_for(4_759_123_141), &[2, 1_005_905_886, 1_340_600_841]);
        assert_eq!(witness_set_for(u64::MAX), WITNESS_SET_WIDE);
    }

    #[test]
    fn accepts_known_primes() {
        for &p in &[
            23_003u64,
            999_999_937,
            4_294_967_291,
            67_280_421_310_721,
            2_305_843_009_213_693_951, // 2^61 - 1
            18_446_744_073_709_551_557,
        ] {
            assert!(miller_rabin(p, witness_set_for(p)), "{} is prime", p);
        }
    }

    /// 2047 = 23 · 89 is the smallest strong pseudoprime to base 2: the
    /// single witness passes it, the bracket set does not.
    #[test]
    fn base2_strong_pseudoprime_needs_full_set() {
        assert!(miller_rabin(2047, &[2]));
        assert!(!miller_rabin(2047, witness_set_for(2047)));
    }

    /// Each bracket ceiling is itself the smallest composite that defeats
    /// the previous bracket's witness set, so it must be caught by the set
    /// selected for it.
    #[test]
    fn bracket_ceilings_are_composite() {
        // 9080191 = 2131 · 4261 passes {31, 73}.
        assert!(miller_rabin(9_080_191, &[31, 73]));
        assert!(!miller_rabin(9_080_191, witness_set_for(9_080_191)));
        // 4759123141 = 48781 · 97561 passes {2, 7, 61}.
        assert!(miller_rabin(4_759_123_141, &[2, 7, 61]));
        assert!(!miller_rabin(4_759_123_141, witness_set_for(4_759_123_141)));
    }

    #[test]
    fn rejects_large_composites() {
        // Strong pseudoprime to all of bases 2..=23:
        // 3825123056546413051 = 149491 · 747451 · 34233211.
        assert!(!miller_rabin(3_825_123_056_546_413_051, witness_set_for(3_825_123_056_546_413_051)));
        // (2^32 - 5)(2^32 - 17): semiprime just below 2^64.
        let n = 4_294_967_291u64 * 4_294_967_279;
        assert!(!miller_rabin(n, witness_set_for(n)));
    }

    /// Witnesses that reduce below 2 are skipped, not misused: for n = 31,
    /// the base 31 reduces to 0 and base 32 reduces to 1, leaving 73 ≡ 11
    /// as the only informative witness.
    #[test]
    fn degenerate_witnesses_are_skipped() {
        assert!(miller_rabin(31, &[31, 73]));
        assert!(miller_rabin(31, &[31, 32]));
    }
}
