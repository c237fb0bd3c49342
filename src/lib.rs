//! # detprime — Deterministic Primality for Machine-Word Integers
//!
//! Decides whether an integer up to 64 bits is prime, exactly — no
//! randomized witnesses, no error probability. The pipeline is a trial
//! filter ([`small`]) backed by deterministic Miller–Rabin ([`witness`])
//! with range-selected witness sets, over overflow-safe modular
//! arithmetic ([`modmath`]).
//!
//! Every function is pure and stateless: the only shared data is the
//! compile-time witness table, so concurrent use needs no locking.
//!
//! ```
//! assert!(detprime::is_prime(23_003u64));
//! assert!(detprime::is_prime(18_446_744_073_709_551_557u64)); // largest 64-bit prime
//! assert!(!detprime::is_prime(561u32)); // Carmichael number
//! assert!(!detprime::is_prime(-7i32)); // negative, by definition not prime
//! ```

pub mod modmath;
pub mod small;
pub mod witness;

use tracing::trace;

use crate::small::{is_small_prime, SMALL_PRIME_CEILING};
use crate::witness::{miller_rabin, witness_set_for};

/// Integer widths and signednesses accepted by [`is_prime`].
///
/// Unsigned values widen to u64 and enter the pipeline directly. Signed
/// values map negatives straight to "not prime" — no reliance on
/// wraparound — and widen otherwise, so verdicts agree across every width
/// that can represent a given value.
pub trait PrimeCandidate: Copy {
    /// The value in the unsigned pipeline's domain, or `None` if it is
    /// negative and therefore cannot be prime.
    fn to_u64(self) -> Option<u64>;
}

impl PrimeCandidate for u16 {
    #[inline]
    fn to_u64(self) -> Option<u64> {
        Some(self.into())
    }
}

impl PrimeCandidate for u32 {
    #[inline]
    fn to_u64(self) -> Option<u64> {
        Some(self.into())
    }
}

impl PrimeCandidate for u64 {
    #[inline]
    fn to_u64(self) -> Option<u64> {
        Some(self)
    }
}

impl PrimeCandidate for i16 {
    #[inline]
    fn to_u64(self) -> Option<u64> {
        u64::try_from(self).ok()
    }
}

impl PrimeCandidate for i32 {
    #[inline]
    fn to_u64(self) -> Option<u64> {
        u64::try_from(self).ok()
    }
}

impl PrimeCandidate for i64 {
    #[inline]
    fn to_u64(self) -> Option<u64> {
        u64::try_from(self).ok()
    }
}

/// Deterministic primality for any supported integer width.
///
/// Exact over the whole domain, including the top of the u64 range (the
/// internal modular multiply uses 128-bit intermediates, so there is no
/// near-2^64 precision caveat).
pub fn is_prime<T: PrimeCandidate>(n: T) -> bool {
    match n.to_u64() {
        Some(n) => is_prime_u64(n),
        None => false,
    }
}

/// The unsigned pipeline: trial filter first, then deterministic
/// Miller–Rabin with the minimal sufficient witness set.
fn is_prime_u64(n: u64) -> bool {
    let filtered = is_small_prime(n);
    if n <= SMALL_PRIME_CEILING || !filtered {
        return filtered;
    }
    let witnesses = witness_set_for(n);
    trace!(
        n,
        witnesses = witnesses.len(),
        "trial filter inconclusive, running deterministic Miller-Rabin"
    );
    miller_rabin(n, witnesses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values() {
        assert!(!is_prime(0u64));
        assert!(!is_prime(1u64));
        assert!(is_prime(2u64));
        assert!(is_prime(3u64));
        assert!(!is_prime(4u64));
    }

    #[test]
    fn filter_to_miller_rabin_handoff() {
        // 23001 is settled entirely by the filter; 23003 is the first
        // candidate that must route through Miller-Rabin.
        assert!(!is_prime(23_001u64));
        assert!(is_prime(23_003u64));
    }

    #[test]
    fn negative_inputs_are_not_prime() {
        assert!(!is_prime(-1i16));
        assert!(!is_prime(-2i32));
        assert!(!is_prime(i64::MIN));
        assert!(!is_prime(-7i64)); // |-7| is prime, -7 is not
    }

    #[test]
    fn signed_small_values() {
        assert!(!is_prime(0i32));
        assert!(!is_prime(1i64));
        assert!(is_prime(2i16));
        assert!(is_prime(3i64));
        assert!(!is_prime(4i32));
    }

    #[test]
    fn cross_width_agreement() {
        for n in [0u16, 1, 2, 541, 561, 23_003, u16::MAX] {
            let expected = is_prime(n);
            assert_eq!(is_prime(u32::from(n)), expected);
            assert_eq!(is_prime(u64::from(n)), expected);
            assert_eq!(is_prime(i32::from(n)), expected);
            assert_eq!(is_prime(i64::from(n)), expected);
        }
    }

    #[test]
    fn large_primes() {
        assert!(is_prime(4_294_967_291u64)); // 2^32 - 5
        assert!(is_prime(2_305_843_009_213_693_951u64)); // Mersenne prime 2^61 - 1
        assert!(is_prime(9_223_372_036_854_775_783u64)); // largest prime below 2^63
        assert!(is_prime(18_446_744_073_709_551_557u64)); // largest prime below 2^64
    }

    #[test]
    fn large_composites() {
        assert!(!is_prime(u64::MAX)); // 3 · 5 · 17 · 257 · 641 · 65537 · 6700417
        assert!(!is_prime(3_215_031_751u64)); // strong pseudoprime to bases 2, 3, 5, 7
        assert!(!is_prime(3_825_123_056_546_413_051u64)); // strong pseudoprime to bases 2..=23
        assert!(!is_prime(4_294_967_291u64 * 4_294_967_279)); // semiprime near 2^64
    }

    #[test]
    fn is_pure() {
        for n in [0u64, 7957, 23_003, 18_446_744_073_709_551_557] {
            assert_eq!(is_prime(n), is_prime(n));
        }
    }
}
