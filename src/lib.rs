//! # Kelpie Swap
//!
//! Exact-arithmetic pricing and pair-addressing core for a constant-product
//! AMM exchange SDK.
//!
//! Given the two reserve balances of a token pair, this crate computes
//! exact swap outputs and inputs, liquidity-token mint and burn amounts,
//! and the deterministic on-chain address identifying the pair, including
//! the static-table fallback used on platforms where hash-based derivation
//! is not trustworthy.
//!
//! All pricing runs over unbounded rational numbers: nothing overflows and
//! no precision is lost until a caller explicitly asks for a rounded
//! rendering. Every value object is immutable; quoting a swap returns the
//! result together with a fresh [`Pair`](pair::Pair) holding the
//! post-trade reserves.
//!
//! # Quick Start
//!
//! ```rust
//! use alloy_primitives::address;
//! use kelpie_swap::chain::ChainId;
//! use kelpie_swap::domain::{Currency, CurrencyAmount, Token};
//! use kelpie_swap::factory::PairAddressResolver;
//! use kelpie_swap::pair::Pair;
//!
//! // 1. A resolver over the built-in network configuration
//! let resolver = PairAddressResolver::builtin().expect("builtin registry");
//!
//! // 2. Two tokens on the same network
//! let alpha = Token::new(
//!     ChainId::Nile,
//!     address!("0000000000000000000000000000000000000001"),
//!     18,
//! );
//! let beta = Token::new(
//!     ChainId::Nile,
//!     address!("0000000000000000000000000000000000000002"),
//!     18,
//! );
//!
//! // 3. A pair over two reserves (raw smallest units)
//! let pair = Pair::new(
//!     CurrencyAmount::from_raw(Currency::from(alpha.clone()), 1000u32).expect("in range"),
//!     CurrencyAmount::from_raw(Currency::from(beta), 1000u32).expect("in range"),
//!     &resolver,
//! )
//! .expect("valid pair");
//!
//! // 4. Quote a swap: 100 alpha in, 90 beta out after the 0.3% fee
//! let input = CurrencyAmount::from_raw(Currency::from(alpha), 100u32).expect("in range");
//! let (output, post_trade) = pair.quote_output(&input).expect("quotable");
//! assert_eq!(output.raw(), 90.into());
//! assert_eq!(post_trade.reserve0().raw(), 1100.into());
//! assert_eq!(post_trade.reserve1().raw(), 910.into());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  builds amounts, asks for quotes
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Pair      │  swap and liquidity formulas over exact integers
//! └──────┬───────┘
//!        │ address derivation (memoized)
//!        ▼
//! ┌──────────────┐
//! │   Factory     │  create2-style derivation, static table, async lookup
//! └──────┬───────┘
//!        │ static configuration
//!        ▼
//! ┌──────────────┐
//! │ Chain + Math  │  network constants, Fraction, isqrt, Rounding
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`math`] | [`Fraction`](math::Fraction), [`Rounding`](math::Rounding), [`isqrt`](math::isqrt) |
//! | [`domain`] | [`Token`](domain::Token), [`Currency`](domain::Currency), [`CurrencyAmount`](domain::CurrencyAmount), [`Price`](domain::Price) |
//! | [`pair`] | the constant-product [`Pair`](pair::Pair) entity |
//! | [`factory`] | [`PairAddressResolver`](factory::PairAddressResolver) and its fallbacks |
//! | [`chain`] | [`ChainId`](chain::ChainId), [`NetworkRegistry`](chain::NetworkRegistry) static configuration |
//! | [`error`] | [`SwapError`](error::SwapError) unified error enum |
//! | [`prelude`] | convenience re-exports for common types |

pub mod chain;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pair;
pub mod prelude;
