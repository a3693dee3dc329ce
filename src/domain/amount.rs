//! Currency-denominated exact amounts.

use core::fmt;

use num_bigint::BigInt;
use num_traits::Signed;
use once_cell::sync::Lazy;

use super::Currency;
use crate::error::{Result, SwapError};
use crate::math::{Fraction, Rounding};

/// Largest raw value accepted for an amount: `2^256 - 1`, the widest
/// unsigned integer the deployed contracts can represent.
static MAX_RAW_AMOUNT: Lazy<BigInt> = Lazy::new(|| (BigInt::from(1) << 256u32) - 1);

/// An exact amount denominated in a [`Currency`].
///
/// The underlying [`Fraction`] is expressed in the currency's smallest
/// unit, implicitly scaled by `10^decimals`. Binary operations require the
/// operand currencies to compare equal; mixing currencies is a programming
/// error surfaced as [`SwapError::CurrencyMismatch`], never a silent
/// coercion.
///
/// # Examples
///
/// ```
/// use kelpie_swap::chain::ChainId;
/// use kelpie_swap::domain::{Currency, CurrencyAmount};
///
/// let trx = Currency::native(ChainId::Mainnet);
/// let a = CurrencyAmount::from_raw(trx.clone(), 1_500_000).expect("in range");
/// let b = CurrencyAmount::from_raw(trx, 500_000).expect("in range");
/// let sum = a.add(&b).expect("same currency");
/// assert_eq!(sum.raw(), 2_000_000.into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAmount {
    currency: Currency,
    value: Fraction,
}

impl CurrencyAmount {
    /// Creates an amount from a raw integer already in the currency's
    /// smallest unit.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::AmountOutOfRange`] if `raw` is negative or
    /// exceeds `2^256 - 1`.
    pub fn from_raw(currency: Currency, raw: impl Into<BigInt>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_negative() || raw > *MAX_RAW_AMOUNT {
            return Err(SwapError::AmountOutOfRange);
        }
        Ok(Self {
            currency,
            value: Fraction::from_integer(raw),
        })
    }

    /// Creates an amount from an exact fraction of smallest units.
    #[must_use]
    pub const fn from_fraction(currency: Currency, value: Fraction) -> Self {
        Self { currency, value }
    }

    /// Returns the denominating currency.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Returns the exact value in smallest units.
    #[must_use]
    pub const fn as_fraction(&self) -> &Fraction {
        &self.value
    }

    /// Returns the integer number of smallest units, truncated toward
    /// zero.
    #[must_use]
    pub fn raw(&self) -> BigInt {
        self.value.quotient()
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::CurrencyMismatch`] if the currencies differ.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if !self.currency.equals(&other.currency) {
            return Err(SwapError::CurrencyMismatch(
                "cannot add amounts of different currencies",
            ));
        }
        Ok(Self {
            currency: self.currency.clone(),
            value: self.value.add(&other.value),
        })
    }

    /// Subtracts `other` from `self` for amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::CurrencyMismatch`] if the currencies differ.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        if !self.currency.equals(&other.currency) {
            return Err(SwapError::CurrencyMismatch(
                "cannot subtract amounts of different currencies",
            ));
        }
        Ok(Self {
            currency: self.currency.clone(),
            value: self.value.sub(&other.value),
        })
    }

    /// Renders the amount in whole-currency units with `decimal_places`
    /// fraction digits.
    ///
    /// # Errors
    ///
    /// Propagates [`SwapError::PrecisionUnderflow`] from the fixed-point
    /// conversion.
    pub fn to_fixed(&self, decimal_places: i32, rounding: Rounding) -> Result<String> {
        let scale = Fraction::from_integer(
            BigInt::from(10).pow(u32::from(self.currency.decimals())),
        );
        self.value.div(&scale)?.to_fixed_point(decimal_places, rounding)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency.symbol() {
            Some(symbol) => write!(f, "{} {symbol}", self.raw()),
            None => write!(f, "{}", self.raw()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::chain::ChainId;
    use crate::domain::Token;
    use alloy_primitives::Address;

    fn tok(last_byte: u8, decimals: u8) -> Currency {
        let mut bytes = [0u8; 20];
        bytes[19] = last_byte;
        Currency::from(Token::new(ChainId::Nile, Address::from(bytes), decimals))
    }

    fn amount(currency: Currency, raw: i64) -> CurrencyAmount {
        let Ok(a) = CurrencyAmount::from_raw(currency, raw) else {
            panic!("amount in range");
        };
        a
    }

    #[test]
    fn from_raw_accepts_zero_and_max() {
        assert!(CurrencyAmount::from_raw(tok(1, 18), 0).is_ok());
        let max = (BigInt::from(1) << 256u32) - 1;
        assert!(CurrencyAmount::from_raw(tok(1, 18), max).is_ok());
    }

    #[test]
    fn from_raw_rejects_negative() {
        assert_eq!(
            CurrencyAmount::from_raw(tok(1, 18), -1),
            Err(SwapError::AmountOutOfRange)
        );
    }

    #[test]
    fn from_raw_rejects_past_uint256() {
        let over = BigInt::from(1) << 256u32;
        assert_eq!(
            CurrencyAmount::from_raw(tok(1, 18), over),
            Err(SwapError::AmountOutOfRange)
        );
    }

    #[test]
    fn add_same_currency() {
        let sum = amount(tok(1, 18), 100).add(&amount(tok(1, 18), 50));
        assert_eq!(sum.map(|a| a.raw()), Ok(BigInt::from(150)));
    }

    #[test]
    fn add_different_currencies_rejected() {
        let result = amount(tok(1, 18), 100).add(&amount(tok(2, 18), 50));
        assert!(matches!(result, Err(SwapError::CurrencyMismatch(_))));
    }

    #[test]
    fn add_native_and_token_rejected() {
        let native = CurrencyAmount::from_raw(Currency::native(ChainId::Nile), 100);
        let Ok(native) = native else {
            panic!("amount in range");
        };
        let result = native.add(&amount(tok(1, 6), 50));
        assert!(matches!(result, Err(SwapError::CurrencyMismatch(_))));
    }

    #[test]
    fn sub_can_go_negative() {
        let diff = amount(tok(1, 18), 50).sub(&amount(tok(1, 18), 100));
        let Ok(diff) = diff else {
            panic!("same currency");
        };
        assert_eq!(diff.raw(), BigInt::from(-50));
    }

    #[test]
    fn sub_different_currencies_rejected() {
        let result = amount(tok(1, 18), 100).sub(&amount(tok(2, 18), 50));
        assert!(matches!(result, Err(SwapError::CurrencyMismatch(_))));
    }

    #[test]
    fn to_fixed_scales_by_decimals() {
        let a = amount(tok(1, 6), 1_500_000);
        assert_eq!(a.to_fixed(2, Rounding::Down), Ok("1.50".into()));
    }

    #[test]
    fn to_fixed_rounds_smallest_units() {
        let a = amount(tok(1, 6), 1_234_567);
        assert_eq!(a.to_fixed(2, Rounding::Down), Ok("1.23".into()));
        assert_eq!(a.to_fixed(2, Rounding::Up), Ok("1.24".into()));
        assert_eq!(a.to_fixed(2, Rounding::HalfUp), Ok("1.23".into()));
    }

    #[test]
    fn display_includes_symbol_when_known() {
        let usdt = Currency::from(Token::with_metadata(
            ChainId::Nile,
            Address::from([7u8; 20]),
            6,
            "USDT",
            "Tether USD",
        ));
        let a = amount(usdt, 42);
        assert_eq!(a.to_string(), "42 USDT");
    }

    #[test]
    fn equality_is_value_and_currency() {
        assert_eq!(amount(tok(1, 18), 100), amount(tok(1, 18), 100));
        assert_ne!(amount(tok(1, 18), 100), amount(tok(1, 18), 101));
        assert_ne!(amount(tok(1, 18), 100), amount(tok(2, 18), 100));
    }
}
