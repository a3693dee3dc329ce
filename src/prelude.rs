//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use kelpie_swap::prelude::*;
//! ```

// Re-export chain configuration
pub use crate::chain::{ChainId, NetworkConfig, NetworkRegistry};

// Re-export domain types
pub use crate::domain::{Currency, CurrencyAmount, NativeCoin, Price, Token};

// Re-export math utilities
pub use crate::math::{isqrt, Fraction, Rounding};

// Re-export the pair entity
pub use crate::pair::Pair;

// Re-export address resolution
pub use crate::factory::{
    compute_pair_address, DiagnosticEvent, DiagnosticSink, FactoryLookup, PairAddressResolver,
    StaticPairTable, UNKNOWN_PAIR_SENTINEL,
};

// Re-export error types
pub use crate::error::{Result, SwapError};
