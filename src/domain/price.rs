//! Exchange rate between two currencies.

use num_bigint::BigInt;

use super::{Currency, CurrencyAmount};
use crate::error::{Result, SwapError};
use crate::math::{Fraction, Rounding};

/// An exact exchange rate quoting one currency in terms of another.
///
/// The stored fraction is the raw smallest-unit ratio
/// `quote_units / base_units`, kept unreduced and unrounded until a caller
/// explicitly asks for a fixed-point rendering.
///
/// # Examples
///
/// ```
/// use kelpie_swap::chain::ChainId;
/// use kelpie_swap::domain::{Currency, CurrencyAmount, Price};
///
/// let base = Currency::native(ChainId::Mainnet);
/// let quote = Currency::native(ChainId::Mainnet);
/// // 2 quote units per base unit.
/// let price = Price::new(base.clone(), quote, 1, 2).expect("non-zero base");
///
/// let amount = CurrencyAmount::from_raw(base, 100).expect("in range");
/// let quoted = price.quote(&amount).expect("base currency matches");
/// assert_eq!(quoted.raw(), 200.into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    base: Currency,
    quote: Currency,
    value: Fraction,
}

impl Price {
    /// Creates a price from raw reserve-style operands: `denominator`
    /// base units buy `numerator` quote units.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::ZeroDenominator`] if `denominator` is zero.
    pub fn new(
        base: Currency,
        quote: Currency,
        denominator: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
    ) -> Result<Self> {
        Ok(Self {
            base,
            quote,
            value: Fraction::new(numerator, denominator)?,
        })
    }

    /// Creates a price directly from an exact fraction of
    /// `quote units / base unit`.
    #[must_use]
    pub const fn from_fraction(base: Currency, quote: Currency, value: Fraction) -> Self {
        Self { base, quote, value }
    }

    /// Returns the base currency (the one being priced).
    #[must_use]
    pub const fn base(&self) -> &Currency {
        &self.base
    }

    /// Returns the quote currency (the one the price is expressed in).
    #[must_use]
    pub const fn quote_currency(&self) -> &Currency {
        &self.quote
    }

    /// Returns the raw smallest-unit ratio.
    #[must_use]
    pub const fn value(&self) -> &Fraction {
        &self.value
    }

    /// Returns the price of the quote currency in terms of the base.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::ZeroDenominator`] if the price is zero.
    pub fn invert(&self) -> Result<Self> {
        Ok(Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
            value: self.value.invert()?,
        })
    }

    /// Converts an amount of the base currency into the quote currency.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::CurrencyMismatch`] unless `amount` is
    /// denominated in the base currency.
    pub fn quote(&self, amount: &CurrencyAmount) -> Result<CurrencyAmount> {
        if !amount.currency().equals(&self.base) {
            return Err(SwapError::CurrencyMismatch(
                "price can only quote amounts denominated in its base currency",
            ));
        }
        Ok(CurrencyAmount::from_fraction(
            self.quote.clone(),
            amount.as_fraction().mul(&self.value),
        ))
    }

    /// Returns the ratio adjusted for the currencies' decimal scales, the
    /// human-meaningful "quote per one whole base unit" value.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature propagates the fraction
    /// constructor's zero-denominator check.
    pub fn adjusted(&self) -> Result<Fraction> {
        let scale = Fraction::new(
            BigInt::from(10).pow(u32::from(self.base.decimals())),
            BigInt::from(10).pow(u32::from(self.quote.decimals())),
        )?;
        Ok(self.value.mul(&scale))
    }

    /// Renders the decimal-adjusted price with `decimal_places` fraction
    /// digits.
    ///
    /// # Errors
    ///
    /// Propagates [`SwapError::PrecisionUnderflow`] from the fixed-point
    /// conversion.
    pub fn to_fixed(&self, decimal_places: i32, rounding: Rounding) -> Result<String> {
        self.adjusted()?.to_fixed_point(decimal_places, rounding)
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

    fn price(base: Currency, quote: Currency, d: i64, n: i64) -> Price {
        let Ok(p) = Price::new(base, quote, d, n) else {
            panic!("non-zero denominator");
        };
        p
    }

    #[test]
    fn zero_base_reserve_rejected() {
        assert!(Price::new(tok(1, 18), tok(2, 18), 0, 100).is_err());
    }

    #[test]
    fn quote_multiplies_exactly() {
        let p = price(tok(1, 18), tok(2, 18), 1000, 1500);
        let Ok(amount) = CurrencyAmount::from_raw(tok(1, 18), 200) else {
            panic!("in range");
        };
        let Ok(quoted) = p.quote(&amount) else {
            panic!("base matches");
        };
        assert!(quoted.currency().equals(&tok(2, 18)));
        assert_eq!(quoted.raw(), BigInt::from(300));
    }

    #[test]
    fn quote_rejects_wrong_currency() {
        let p = price(tok(1, 18), tok(2, 18), 1, 2);
        let Ok(amount) = CurrencyAmount::from_raw(tok(2, 18), 100) else {
            panic!("in range");
        };
        assert!(matches!(
            p.quote(&amount),
            Err(SwapError::CurrencyMismatch(_))
        ));
    }

    #[test]
    fn invert_swaps_roles() {
        let p = price(tok(1, 18), tok(2, 18), 4, 1);
        let Ok(inv) = p.invert() else {
            panic!("non-zero price");
        };
        assert!(inv.base().equals(&tok(2, 18)));
        assert!(inv.quote_currency().equals(&tok(1, 18)));
        let Ok(expected) = Fraction::new(4, 1) else {
            panic!("fraction");
        };
        assert_eq!(*inv.value(), expected);
    }

    #[test]
    fn invert_zero_price_rejected() {
        let p = price(tok(1, 18), tok(2, 18), 4, 0);
        assert!(p.invert().is_err());
    }

    #[test]
    fn adjusted_accounts_for_decimal_scales() {
        // 1 raw-unit ratio between a 6-decimals base and an 18-decimals
        // quote means one whole base unit buys 10^-12 whole quote units.
        let p = price(tok(1, 6), tok(2, 18), 1, 1);
        let Ok(adjusted) = p.adjusted() else {
            panic!("adjusted");
        };
        let Ok(expected) = Fraction::new(1, 1_000_000_000_000i64) else {
            panic!("fraction");
        };
        assert_eq!(adjusted, expected);
    }

    #[test]
    fn to_fixed_renders_adjusted_value() {
        let p = price(tok(1, 6), tok(2, 6), 3, 1);
        assert_eq!(p.to_fixed(2, Rounding::Down), Ok("0.33".into()));
        assert_eq!(p.to_fixed(2, Rounding::Up), Ok("0.34".into()));
    }

    #[test]
    fn value_is_unreduced() {
        let p = price(tok(1, 18), tok(2, 18), 1000, 1000);
        assert_eq!(*p.value().numerator(), BigInt::from(1000));
        assert_eq!(*p.value().denominator(), BigInt::from(1000));
    }
}
