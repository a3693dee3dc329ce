//! Unified error types for the Kelpie Swap SDK.
//!
//! All fallible operations across the crate return [`SwapError`], ensuring a
//! consistent error handling experience for consumers. Every variant is a
//! local, non-recoverable validation failure surfaced immediately to the
//! caller; nothing is retried internally.

use alloy_primitives::Address;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, SwapError>;

/// Unified error enum for all SDK operations.
///
/// # Examples
///
/// ```
/// use kelpie_swap::error::SwapError;
///
/// let err = SwapError::InsufficientReserves;
/// assert_eq!(err.to_string(), "insufficient reserves for quote");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    /// Two operands are denominated in incompatible currencies.
    #[error("currency mismatch: {0}")]
    CurrencyMismatch(&'static str),

    /// A zero or depleted reserve prevents a quote.
    #[error("insufficient reserves for quote")]
    InsufficientReserves,

    /// The quoted amount rounds to zero or non-positive.
    #[error("input amount too small to quote")]
    InsufficientInputAmount,

    /// The protocol fee path is active but no prior invariant was supplied.
    #[error("protocol fee requires the last recorded invariant")]
    InvariantRequired,

    /// The static pair table contains two entries for the same ordered pair.
    #[error("duplicate static pair entry for ({token_a}, {token_b})")]
    DuplicatePairEntry {
        /// First token address of the offending entry, as written.
        token_a: Address,
        /// Second token address of the offending entry, as written.
        token_b: Address,
    },

    /// A fixed-point conversion was requested below the minimum precision.
    #[error("requested {requested} decimal places, minimum is {minimum}")]
    PrecisionUnderflow {
        /// Decimal places the caller asked for.
        requested: i32,
        /// Smallest number of decimal places the policy allows.
        minimum: i32,
    },

    /// A token operand is structurally unusable for the operation.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A liquidity operand violates the operation's preconditions.
    #[error("invalid liquidity: {0}")]
    InvalidLiquidity(&'static str),

    /// A fraction was constructed with a zero denominator.
    #[error("fraction denominator must be non-zero")]
    ZeroDenominator,

    /// A raw amount does not fit the 256-bit unsigned integer range.
    #[error("amount does not fit the 256-bit unsigned range")]
    AmountOutOfRange,

    /// The injected factory lookup collaborator reported a failure.
    #[error("factory lookup failed: {0}")]
    LookupFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn display_currency_mismatch() {
        let err = SwapError::CurrencyMismatch("add requires equal currencies");
        assert_eq!(
            err.to_string(),
            "currency mismatch: add requires equal currencies"
        );
    }

    #[test]
    fn display_duplicate_pair_entry() {
        let err = SwapError::DuplicatePairEntry {
            token_a: address!("0000000000000000000000000000000000000001"),
            token_b: address!("0000000000000000000000000000000000000002"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("duplicate static pair entry"));
    }

    #[test]
    fn display_precision_underflow() {
        let err = SwapError::PrecisionUnderflow {
            requested: -2,
            minimum: 0,
        };
        assert_eq!(err.to_string(), "requested -2 decimal places, minimum is 0");
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(
            SwapError::InsufficientReserves,
            SwapError::InsufficientReserves
        );
        assert_ne!(
            SwapError::InsufficientReserves,
            SwapError::InsufficientInputAmount
        );
    }

    #[test]
    fn errors_are_cloneable() {
        let err = SwapError::LookupFailed("connection refused".to_string());
        assert_eq!(err.clone(), err);
    }
}
