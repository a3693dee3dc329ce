//! Floor integer square root of unbounded non-negative integers.

use num_bigint::BigUint;
use num_traits::One;

/// Returns the floor of the real square root of `n`.
///
/// Newton's method seeded from the bit length: the initial guess
/// `2^⌈bits/2⌉` is always at least `√n`, so the iteration
/// `x' = (x + n/x) / 2` decreases monotonically and the first
/// non-decreasing step lands exactly on `⌊√n⌋`. Inputs below two are
/// returned unchanged.
///
/// This is the correctness-critical primitive behind initial liquidity
/// minting: `isqrt(n)² ≤ n < (isqrt(n)+1)²` holds for every input.
///
/// # Examples
///
/// ```
/// use kelpie_swap::math::isqrt;
/// use num_bigint::BigUint;
///
/// assert_eq!(isqrt(&BigUint::from(0u8)), BigUint::from(0u8));
/// assert_eq!(isqrt(&BigUint::from(4_000_000u32)), BigUint::from(2000u32));
/// assert_eq!(isqrt(&BigUint::from(4_000_001u32)), BigUint::from(2000u32));
/// ```
#[must_use]
pub fn isqrt(n: &BigUint) -> BigUint {
    if n < &BigUint::from(2u8) {
        return n.clone();
    }

    // 2^ceil(bits/2) >= sqrt(n) for any n with the given bit length.
    let shift = n.bits().div_ceil(2);
    let mut x: BigUint = BigUint::one() << shift;
    loop {
        let next = (&x + n / &x) >> 1u32;
        if next >= x {
            return x;
        }
        x = next;
    }
}
