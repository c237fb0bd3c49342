//! # Small — Trial-Division Filter for Small Candidates
//!
//! Resolves every candidate at or below [`SMALL_PRIME_CEILING`] exactly,
//! and cheaply rejects most composites above it, so that the full
//! deterministic Miller–Rabin machinery only ever runs on candidates that
//! survived trial division.
//!
//! The layering below the ceiling:
//!
//! 1. Divisibility by 2, 3, 5 settles most inputs immediately.
//! 2. Trial division by the primes 7..=47 settles everything below
//!    53² = 2809 (a survivor there has no factor below 53 and cannot fit
//!    two factors of 53 or more).
//! 3. For the remaining band up to the ceiling, a single base-2 Fermat
//!    check (2^n ≡ 2 mod n) is exact once patched against the five base-2
//!    Fermat pseudoprimes in that range — one modular exponentiation plus
//!    a five-entry exception list instead of a full witness battery.

use crate::modmath::pow_mod;

/// Largest candidate the filter resolves exactly. Above this, a `true`
/// return only means "no factor found by trial division" and the caller
/// must continue to the full Miller–Rabin test.
pub const SMALL_PRIME_CEILING: u64 = 23_001;

/// Trial-division primes between 7 and 47. Together with the 2/3/5 checks
/// this covers every prime below 53.
const TRIAL_PRIMES: [u64; 12] = [7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

/// The composites below [`SMALL_PRIME_CEILING`] with no factor below 53
/// that nevertheless satisfy 2^n ≡ 2 (mod n): base-2 Fermat pseudoprimes.
/// The Fermat shortcut misclassifies exactly these five, so they are
/// patched by name.
const BASE2_FERMAT_PSEUDOPRIMES: [u64; 5] = [7957, 8321, 13_747, 18_721, 19_951];

/// Exact primality for n ≤ [`SMALL_PRIME_CEILING`]; composite rejection
/// above it.
///
/// Returns `false` only for proven composites (or n < 2). Returns `true`
/// for every prime, and for any n above the ceiling that merely passed
/// trial division — inconclusive, by design.
pub fn is_small_prime(n: u64) -> bool {
    if n == 2 || n == 3 || n == 5 {
        return true;
    }
    if n < 2 || n.is_multiple_of(2) || n.is_multiple_of(3) || n.is_multiple_of(5) {
        return false;
    }
    if n < 49 {
        return true;
    }
    if TRIAL_PRIMES.iter().any(|&p| n.is_multiple_of(p)) {
        return false;
    }
    if n < 2809 {
        return true;
    }
    if n <= SMALL_PRIME_CEILING {
        return pow_mod(2, n, n) == 2 && !BASE2_FERMAT_PSEUDOPRIMES.contains(&n);
    }
    true
}
