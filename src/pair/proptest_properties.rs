//! Property-based tests for the pair's pricing invariants.
//!
//! Four properties:
//!
//! 1. **Square root exactness**: `isqrt(n)² ≤ n < (isqrt(n)+1)²`.
//! 2. **Invariant preservation**: the reserve product never decreases
//!    across a quoted swap.
//! 3. **Round-trip domination**: re-quoting the same output on the
//!    post-trade pair never requires less input than was paid.
//! 4. **Price movement direction**: the mid price moves against the trade.

#![allow(clippy::panic)]

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use super::*;
use crate::domain::{Currency, CurrencyAmount, Token};
use crate::factory::PairAddressResolver;
use alloy_primitives::Address;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok(last_byte: u8) -> Token {
    let mut bytes = [0u8; 20];
    bytes[19] = last_byte;
    Token::new(ChainId::Nile, Address::from(bytes), 18)
}

fn amt(token: &Token, raw: u128) -> CurrencyAmount {
    let Ok(a) = CurrencyAmount::from_raw(Currency::from(token.clone()), raw) else {
        panic!("amount in range");
    };
    a
}

fn make_pair(reserve_a: u128, reserve_b: u128) -> Pair {
    let Ok(resolver) = PairAddressResolver::builtin() else {
        panic!("builtin registry");
    };
    let Ok(pair) = Pair::new(amt(&tok(1), reserve_a), amt(&tok(2), reserve_b), &resolver) else {
        panic!("valid pair");
    };
    pair
}

fn product(pair: &Pair) -> BigInt {
    pair.reserve0().raw() * pair.reserve1().raw()
}

proptest! {
    #[test]
    fn isqrt_is_exact_floor(hi in any::<u128>(), lo in any::<u128>()) {
        let n = (BigUint::from(hi) << 128u32) + BigUint::from(lo);
        let root = isqrt(&n);
        prop_assert!(&root * &root <= n);
        let next = &root + BigUint::one();
        prop_assert!(&next * &next > n);
    }

    #[test]
    fn reserve_product_never_decreases(
        reserve_a in 1u128..=1_000_000_000_000,
        reserve_b in 1u128..=1_000_000_000_000,
        input in 1u128..=1_000_000_000,
    ) {
        let pair = make_pair(reserve_a, reserve_b);
        let k_before = product(&pair);
        match pair.quote_output(&amt(&tok(1), input)) {
            Ok((_, next)) => prop_assert!(product(&next) >= k_before),
            // Dust inputs that truncate to zero output are rejected, not
            // mispriced.
            Err(e) => prop_assert_eq!(e, SwapError::InsufficientInputAmount),
        }
    }

    #[test]
    fn round_trip_input_dominates(
        reserve_a in 1u128..=1_000_000_000_000,
        reserve_b in 1u128..=1_000_000_000_000,
        input in 1u128..=1_000_000_000,
    ) {
        let pair = make_pair(reserve_a, reserve_b);
        let Ok((output, next)) = pair.quote_output(&amt(&tok(1), input)) else {
            // Dust input; nothing to round-trip.
            return Ok(());
        };
        let Ok(requote) = CurrencyAmount::from_raw(Currency::from(tok(2)), output.raw()) else {
            panic!("in range");
        };
        let (required, _) = next.quote_input(&requote).map_err(|e| {
            TestCaseError::fail(format!("round-trip quote failed: {e}"))
        })?;
        prop_assert!(required.raw() >= BigInt::from(input));
    }

    #[test]
    fn mid_price_moves_against_the_trade(
        reserve_a in 1_000u128..=1_000_000_000_000,
        reserve_b in 1_000u128..=1_000_000_000_000,
        input in 1u128..=1_000_000_000,
    ) {
        let pair = make_pair(reserve_a, reserve_b);
        let Ok((_, next)) = pair.quote_output(&amt(&tok(1), input)) else {
            return Ok(());
        };
        let (Ok(before), Ok(after)) = (pair.token0_price(), next.token0_price()) else {
            panic!("reserves are non-zero");
        };
        // Selling token0 makes it cheaper in terms of token1.
        prop_assert!(after.value() <= before.value());
    }
}
