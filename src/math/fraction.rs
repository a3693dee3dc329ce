//! Exact rational arithmetic over unbounded integers.
//!
//! [`Fraction`] is the arithmetic backbone of the SDK: every price, amount,
//! and quote is computed over numerator/denominator pairs of [`BigInt`], so
//! no operation can overflow and no precision is lost until a caller asks
//! for a fixed-point rendering with an explicit [`Rounding`] policy.
//!
//! Fractions are not kept reduced. Reduction never changes the value, and
//! deferring it keeps construction cheap; comparison cross-multiplies
//! instead of normalizing, which is exact because denominators are always
//! strictly positive.

use core::cmp::Ordering;
use core::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::{Result, SwapError};
use crate::math::Rounding;

/// Smallest number of decimal places a fixed-point rendering may request
/// unless the caller supplies its own minimum.
pub const MIN_FIXED_POINT_DECIMALS: i32 = 0;

/// An immutable rational number with an unbounded numerator and a strictly
/// positive unbounded denominator.
///
/// The sign lives in the numerator; construction normalizes a negative
/// denominator by negating both components. Every arithmetic operation
/// returns a new value.
///
/// # Examples
///
/// ```
/// use kelpie_swap::math::{Fraction, Rounding};
///
/// let third = Fraction::new(1, 3).expect("non-zero denominator");
/// assert_eq!(third.to_fixed_point(2, Rounding::Down).expect("ok"), "0.33");
/// assert_eq!(third.to_fixed_point(2, Rounding::Up).expect("ok"), "0.34");
/// ```
#[derive(Debug, Clone)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// Creates a new `Fraction`.
    ///
    /// A negative denominator is folded into the numerator so that the
    /// stored denominator is always strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::ZeroDenominator`] if `denominator` is zero.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Result<Self> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(SwapError::ZeroDenominator);
        }
        if denominator.is_negative() {
            return Ok(Self {
                numerator: -numerator,
                denominator: -denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Creates a fraction with denominator one.
    #[must_use]
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::from(1),
        }
    }

    /// Returns the numerator.
    #[must_use]
    pub const fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// Returns the denominator (always strictly positive).
    #[must_use]
    pub const fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Returns `true` if the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Adds two fractions exactly.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    /// Subtracts `other` from `self` exactly.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    /// Multiplies two fractions exactly.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    /// Divides `self` by `other` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::ZeroDenominator`] if `other` is zero.
    pub fn div(&self, other: &Self) -> Result<Self> {
        Self::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }

    /// Returns the multiplicative inverse.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::ZeroDenominator`] if the value is zero.
    pub fn invert(&self) -> Result<Self> {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Returns the integer quotient, truncated toward zero.
    #[must_use]
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// Renders the value with exactly `decimal_places` fraction digits,
    /// using the default minimum-precision policy of
    /// [`MIN_FIXED_POINT_DECIMALS`].
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::PrecisionUnderflow`] if `decimal_places` is
    /// below the default minimum.
    pub fn to_fixed_point(&self, decimal_places: i32, rounding: Rounding) -> Result<String> {
        self.to_fixed_point_with_min(decimal_places, MIN_FIXED_POINT_DECIMALS, rounding)
    }

    /// Renders the value with exactly `decimal_places` fraction digits
    /// under a caller-supplied minimum-precision policy.
    ///
    /// Negative `decimal_places` round the value to a multiple of
    /// `10^|decimal_places|` and render it as a plain integer.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::PrecisionUnderflow`] if `decimal_places` is
    /// below `minimum`.
    pub fn to_fixed_point_with_min(
        &self,
        decimal_places: i32,
        minimum: i32,
        rounding: Rounding,
    ) -> Result<String> {
        if decimal_places < minimum {
            return Err(SwapError::PrecisionUnderflow {
                requested: decimal_places,
                minimum,
            });
        }

        let negative = self.numerator.is_negative();
        let magnitude = self.rounded_magnitude_scaled(decimal_places, rounding);

        let rendered = if decimal_places > 0 {
            let places = decimal_places.unsigned_abs();
            let scale = BigInt::from(10).pow(places);
            let int_part = &magnitude / &scale;
            let frac_part = &magnitude % &scale;
            format!(
                "{int_part}.{frac_part:0>width$}",
                frac_part = frac_part.to_string(),
                width = places as usize
            )
        } else if decimal_places == 0 {
            magnitude.to_string()
        } else {
            let scale = BigInt::from(10).pow(decimal_places.unsigned_abs());
            (magnitude * scale).to_string()
        };

        if negative && !self.is_zero_rendering(&rendered) {
            Ok(format!("-{rendered}"))
        } else {
            Ok(rendered)
        }
    }

    /// Magnitude of the value scaled by `10^decimal_places`, rounded per
    /// the policy. Operates on absolute values; the sign is re-applied by
    /// the caller.
    fn rounded_magnitude_scaled(&self, decimal_places: i32, rounding: Rounding) -> BigInt {
        let abs_numerator = self.numerator.abs();
        let (scaled_numerator, denominator) = if decimal_places >= 0 {
            let scale = BigInt::from(10).pow(decimal_places.unsigned_abs());
            (abs_numerator * scale, self.denominator.clone())
        } else {
            let scale = BigInt::from(10).pow(decimal_places.unsigned_abs());
            (abs_numerator, &self.denominator * scale)
        };

        let quotient = &scaled_numerator / &denominator;
        let remainder = &scaled_numerator % &denominator;

        let bump = match rounding {
            Rounding::Down => false,
            Rounding::Up => !remainder.is_zero(),
            Rounding::HalfUp => &remainder * 2 >= denominator,
        };
        if bump {
            quotient + 1
        } else {
            quotient
        }
    }

    /// A rendering consisting only of zeros must not carry a minus sign.
    fn is_zero_rendering(&self, rendered: &str) -> bool {
        rendered.chars().all(|c| c == '0' || c == '.')
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    /// Exact comparison by cross-multiplication.
    ///
    /// Denominators are strictly positive, so multiplying through preserves
    /// the ordering without computing a common reduced form.
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = &self.numerator * &other.denominator;
        let rhs = &other.numerator * &self.denominator;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
