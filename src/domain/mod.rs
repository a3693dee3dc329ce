//! Currency-aware value types used throughout the SDK.
//!
//! This module contains the value types that tie exact arithmetic to
//! currency identity: tokens, the native/token currency variant, amounts,
//! and prices. All types are immutable; binary operations validate that
//! their operands are denominated compatibly instead of coercing.

mod amount;
mod currency;
mod price;
mod token;

pub use amount::CurrencyAmount;
pub use currency::{Currency, NativeCoin};
pub use price::Price;
pub use token::Token;
