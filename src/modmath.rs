//! # Modmath — Overflow-Safe Modular Arithmetic Primitives
//!
//! The arithmetic floor of the crate. Provides:
//!
//! 1. **Modular multiplication** (`mul_mod`) using a u128 intermediate,
//!    exact for every pair of 64-bit operands.
//! 2. **Modular exponentiation** (`pow_mod`) by binary right-to-left
//!    squaring on top of `mul_mod`.
//! 3. **Montgomery multiplication** (`MontgomeryCtx`) — replaces u128
//!    division (35–90 cycles) with multiply+shift (4–6 cycles) for the
//!    repeated modular arithmetic a Miller–Rabin round performs against a
//!    fixed odd modulus.
//!
//! ## Algorithm: Montgomery Multiplication
//!
//! For a fixed odd modulus n, a value a is represented as ā = a·R mod n
//! with R = 2^64. Multiplication becomes REDC(ā·b̄) = (ā·b̄ + m·n) >> 64,
//! where m = (ā·b̄ mod R) · (-n⁻¹ mod R). No division by n is ever
//! performed, and REDC always returns a canonical residue below n, so
//! Montgomery-form values compare for equality directly.
//!
//! Unlike shift-add `mul_mod` schemes that lose exactness when both
//! operands approach 2^64, both paths here are exact over the full u64
//! range; `redc` tracks the carry out of its 128-bit accumulation so that
//! moduli above 2^63 reduce correctly.
//!
//! ## References
//!
//! - Peter L. Montgomery, "Modular Multiplication Without Trial Division",
//!   Mathematics of Computation, 44(170):519–521, 1985.

/// Modular multiplication: a·b mod m, exact for all 64-bit operands.
///
/// The product is formed in u128, so no operand-magnitude precondition
/// applies. Requires m > 0.
#[inline]
pub fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    debug_assert!(m > 0, "modulus must be nonzero");
    (a as u128 * b as u128 % m as u128) as u64
}

/// Modular exponentiation: base^exp mod modulus.
///
/// Binary right-to-left method; terminates in one iteration per exponent
/// bit. `modulus == 1` yields 0.
pub fn pow_mod(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let mut result: u64 = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        exp >>= 1;
        base = mul_mod(base, base, modulus);
    }
    result
}

/// Montgomery multiplication context for a fixed odd modulus.
///
/// A Miller–Rabin round against one candidate performs hundreds of
/// multiplications mod the same n; this context pays one setup cost and
/// then serves each of them with multiply+shift arithmetic.
#[derive(Clone, Copy, Debug)]
pub struct MontgomeryCtx {
    /// The modulus (odd, > 1).
    n: u64,
    /// -n⁻¹ mod 2^64, precomputed via Hensel lifting.
    neg_n_inv: u64,
    /// R mod n — the Montgomery form of 1.
    r1: u64,
    /// R² mod n, used to convert into Montgomery form.
    r2: u64,
}

impl MontgomeryCtx {
    /// Build a context for the odd modulus n > 1.
    pub fn new(n: u64) -> Self {
        debug_assert!(n > 1 && n & 1 == 1, "Montgomery requires odd modulus > 1");

        // Hensel lifting: n⁻¹ ≡ 1 (mod 2) for odd n, and each iteration
        // doubles the precision: 2 → 4 → 8 → 16 → 32 → 64 bits.
        let mut inv: u64 = 1;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(n.wrapping_mul(inv)));
        }

        let r1 = ((1u128 << 64) % n as u128) as u64;
        let r2 = (r1 as u128 * r1 as u128 % n as u128) as u64;

        MontgomeryCtx {
            n,
            neg_n_inv: inv.wrapping_neg(),
            r1,
            r2,
        }
    }

    /// The modulus this context reduces by.
    #[inline]
    pub fn modulus(&self) -> u64 {
        self.n
    }

    /// The Montgomery form of 1 (= R mod n).
    #[inline]
    pub fn one(&self) -> u64 {
        self.r1
    }

    /// Montgomery reduction: t·R⁻¹ mod n, canonical (below n).
    ///
    /// t + m·n can exceed 2^128 when n > 2^63; the carry stands for 2^64
    /// in the shifted sum, in which case a single subtraction of n lands
    /// in range (the true quotient is always below 2n).
    #[inline]
    fn redc(&self, t: u128) -> u64 {
        let m = (t as u64).wrapping_mul(self.neg_n_inv);
        let (sum, carry) = t.overflowing_add(m as u128 * self.n as u128);
        let u = (sum >> 64) as u64;
        if carry {
            u.wrapping_sub(self.n)
        } else if u >= self.n {
            u - self.n
        } else {
            u
        }
    }

    /// Convert into Montgomery form: ā = a·R mod n.
    #[inline]
    pub fn to_mont(&self, a: u64) -> u64 {
        self.mul(a % self.n, self.r2)
    }

    /// Convert out of Montgomery form: a = ā·R⁻¹ mod n.
    #[inline]
    pub fn from_mont(&self, a: u64) -> u64 {
        self.redc(a as u128)
    }

    /// Montgomery multiplication: a·b·R⁻¹ mod n. Inputs and output are in
    /// Montgomery form.
    #[inline]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        self.redc(a as u128 * b as u128)
    }

    /// Montgomery squaring.
    #[inline]
    pub fn sqr(&self, a: u64) -> u64 {
        self.mul(a, a)
    }

    /// Modular exponentiation in Montgomery form. The base must already be
    /// in Montgomery form; the result is too.
    pub fn pow(&self, base: u64, mut exp: u64) -> u64 {
        let mut result = self.r1;
        let mut b = base;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(result, b);
            }
            exp >>= 1;
            if exp > 0 {
                b = self.sqr(b);
            }
        }
        result
    }
}
