//! The constant-product pair entity.
//!
//! A [`Pair`] holds two canonically ordered reserves of a token pair and
//! answers swap and liquidity quotes with exact integer arithmetic. The
//! pricing invariant is `x × y = k`: the product of the reserves never
//! decreases across a quoted trade, because the 0.3% fee and every
//! division truncation are biased in the pool's favour.
//!
//! # Swap formulas
//!
//! Exact input (fee deducted from the input before pricing):
//!
//! ```text
//! net_input  = input × 997
//! output     = ⌊net_input × reserve_out / (reserve_in × 1000 + net_input)⌋
//! ```
//!
//! Exact output (required input rounded up so the pool is never
//! undercompensated):
//!
//! ```text
//! input = ⌊reserve_in × output × 1000 / ((reserve_out − output) × 997)⌋ + 1
//! ```
//!
//! A `Pair` is an immutable value: quoting returns the result together
//! with a fresh `Pair` holding the post-trade reserves.

use num_bigint::BigInt;
use num_traits::Zero;
use once_cell::sync::Lazy;

use crate::chain::ChainId;
use crate::domain::{Currency, CurrencyAmount, Price, Token};
use crate::error::{Result, SwapError};
use crate::factory::PairAddressResolver;
use crate::math::isqrt;

#[cfg(test)]
mod proptest_properties;

/// Numerator of the input share kept after the swap fee (997 of 1000).
static SWAP_FEE_NUMERATOR: Lazy<BigInt> = Lazy::new(|| BigInt::from(997));

/// Denominator of the swap fee fraction.
static SWAP_FEE_DENOMINATOR: Lazy<BigInt> = Lazy::new(|| BigInt::from(1000));

/// Liquidity permanently burned at pool genesis to prevent share-price
/// manipulation on the first deposit.
pub static MINIMUM_LIQUIDITY: Lazy<BigInt> = Lazy::new(|| BigInt::from(1000));

/// Decimal count of every pair's synthetic liquidity token.
pub const LIQUIDITY_TOKEN_DECIMALS: u8 = 18;

/// A constant-product pair: two canonically ordered reserves plus the
/// synthetic token representing ownership of them.
///
/// The liquidity token's address is the pair's own resolved address, so a
/// `Pair` doubles as the addressable identity of the pool.
///
/// # Examples
///
/// ```
/// use alloy_primitives::address;
/// use kelpie_swap::chain::ChainId;
/// use kelpie_swap::domain::{Currency, CurrencyAmount, Token};
/// use kelpie_swap::factory::PairAddressResolver;
/// use kelpie_swap::pair::Pair;
///
/// let resolver = PairAddressResolver::builtin().expect("builtin registry");
/// let a = Token::new(
///     ChainId::Nile,
///     address!("0000000000000000000000000000000000000001"),
///     18,
/// );
/// let b = Token::new(
///     ChainId::Nile,
///     address!("0000000000000000000000000000000000000002"),
///     18,
/// );
///
/// let pair = Pair::new(
///     CurrencyAmount::from_raw(Currency::from(a.clone()), 1000u32).expect("in range"),
///     CurrencyAmount::from_raw(Currency::from(b.clone()), 1000u32).expect("in range"),
///     &resolver,
/// )
/// .expect("valid pair");
///
/// let input = CurrencyAmount::from_raw(Currency::from(a), 100u32).expect("in range");
/// let (output, next) = pair.quote_output(&input).expect("quotable");
/// assert_eq!(output.raw(), 90.into());
/// assert_eq!(next.reserve_of(&b).expect("in pair").raw(), 910.into());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    liquidity_token: Token,
    tokens: [Token; 2],
    reserves: [CurrencyAmount; 2],
}

impl Pair {
    /// Creates a pair from two token-denominated reserve amounts.
    ///
    /// The reserves are sorted into canonical token order. The pair's
    /// address is derived through `resolver` and becomes the identity of
    /// the synthetic liquidity token (18 decimals).
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidToken`] if either amount is denominated in a
    ///   native coin, the tokens are on different networks, or they share
    ///   an address.
    pub fn new(
        amount_a: CurrencyAmount,
        amount_b: CurrencyAmount,
        resolver: &PairAddressResolver,
    ) -> Result<Self> {
        let token_a = Self::reserve_token(&amount_a)?.clone();
        let token_b = Self::reserve_token(&amount_b)?.clone();

        let (tokens, reserves) = if token_a.sorts_before(&token_b)? {
            ([token_a, token_b], [amount_a, amount_b])
        } else {
            ([token_b, token_a], [amount_b, amount_a])
        };

        let address = resolver.derive_address(&tokens[0], &tokens[1])?;
        let liquidity_token = Token::with_metadata(
            tokens[0].chain_id(),
            address,
            LIQUIDITY_TOKEN_DECIMALS,
            "KLP-V2",
            "Kelpie Swap V2",
        );

        Ok(Self {
            liquidity_token,
            tokens,
            reserves,
        })
    }

    fn reserve_token(amount: &CurrencyAmount) -> Result<&Token> {
        amount
            .currency()
            .as_token()
            .ok_or(SwapError::InvalidToken("pair reserves must be token-denominated"))
    }

    /// Post-trade successor sharing identity with `self`.
    fn with_reserves(&self, reserve0: CurrencyAmount, reserve1: CurrencyAmount) -> Self {
        Self {
            liquidity_token: self.liquidity_token.clone(),
            tokens: self.tokens.clone(),
            reserves: [reserve0, reserve1],
        }
    }

    /// Returns the lower-ordered token.
    #[must_use]
    pub const fn token0(&self) -> &Token {
        &self.tokens[0]
    }

    /// Returns the higher-ordered token.
    #[must_use]
    pub const fn token1(&self) -> &Token {
        &self.tokens[1]
    }

    /// Returns the reserve of [`token0`](Self::token0).
    #[must_use]
    pub const fn reserve0(&self) -> &CurrencyAmount {
        &self.reserves[0]
    }

    /// Returns the reserve of [`token1`](Self::token1).
    #[must_use]
    pub const fn reserve1(&self) -> &CurrencyAmount {
        &self.reserves[1]
    }

    /// Returns the synthetic token representing pool ownership.
    #[must_use]
    pub const fn liquidity_token(&self) -> &Token {
        &self.liquidity_token
    }

    /// Returns the pair's resolved address.
    #[must_use]
    pub const fn address(&self) -> alloy_primitives::Address {
        self.liquidity_token.address()
    }

    /// Returns the network the pair lives on.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.tokens[0].chain_id()
    }

    /// Returns `true` if `token` is either of the pair's tokens.
    #[must_use]
    pub fn involves_token(&self, token: &Token) -> bool {
        token.equals(self.token0()) || token.equals(self.token1())
    }

    /// Returns the reserve denominated in `token`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidToken`] if `token` is not in the pair.
    pub fn reserve_of(&self, token: &Token) -> Result<&CurrencyAmount> {
        if token.equals(self.token0()) {
            Ok(self.reserve0())
        } else if token.equals(self.token1()) {
            Ok(self.reserve1())
        } else {
            Err(SwapError::InvalidToken("token is not part of this pair"))
        }
    }

    /// Returns the counterpart of `token` in the pair.
    fn other(&self, token: &Token) -> Result<&Token> {
        if token.equals(self.token0()) {
            Ok(self.token1())
        } else if token.equals(self.token1()) {
            Ok(self.token0())
        } else {
            Err(SwapError::InvalidToken("token is not part of this pair"))
        }
    }

    /// Mid price of token0 in terms of token1: `reserve1 / reserve0`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::ZeroDenominator`] if the token0 reserve is
    /// zero.
    pub fn token0_price(&self) -> Result<Price> {
        Price::new(
            Currency::from(self.token0().clone()),
            Currency::from(self.token1().clone()),
            self.reserve0().raw(),
            self.reserve1().raw(),
        )
    }

    /// Mid price of token1 in terms of token0: `reserve0 / reserve1`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::ZeroDenominator`] if the token1 reserve is
    /// zero.
    pub fn token1_price(&self) -> Result<Price> {
        Price::new(
            Currency::from(self.token1().clone()),
            Currency::from(self.token0().clone()),
            self.reserve1().raw(),
            self.reserve0().raw(),
        )
    }

    /// Mid price of `token` in terms of the pair's other token.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidToken`] if `token` is not in the pair.
    pub fn price_of(&self, token: &Token) -> Result<Price> {
        if token.equals(self.token0()) {
            self.token0_price()
        } else if token.equals(self.token1()) {
            self.token1_price()
        } else {
            Err(SwapError::InvalidToken("token is not part of this pair"))
        }
    }

    /// Quotes the output of swapping `input` into the pair.
    ///
    /// Returns the output amount and a new `Pair` holding the post-trade
    /// reserves. Floor rounding and the 0.3% fee both favour the pool, so
    /// the reserve product never decreases.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidToken`] if `input` is not denominated in one
    ///   of the pair's tokens.
    /// - [`SwapError::InsufficientReserves`] if either reserve is zero.
    /// - [`SwapError::InsufficientInputAmount`] if the output truncates to
    ///   zero.
    pub fn quote_output(&self, input: &CurrencyAmount) -> Result<(CurrencyAmount, Pair)> {
        let input_token = Self::reserve_token(input)?;
        if !self.involves_token(input_token) {
            return Err(SwapError::InvalidToken("token is not part of this pair"));
        }
        if self.reserve0().raw().is_zero() || self.reserve1().raw().is_zero() {
            return Err(SwapError::InsufficientReserves);
        }

        let output_token = self.other(input_token)?.clone();
        let input_reserve = self.reserve_of(input_token)?;
        let output_reserve = self.reserve_of(&output_token)?;

        let net_input = input.raw() * &*SWAP_FEE_NUMERATOR;
        let numerator = &net_input * output_reserve.raw();
        let denominator = input_reserve.raw() * &*SWAP_FEE_DENOMINATOR + &net_input;
        let output = CurrencyAmount::from_raw(
            Currency::from(output_token.clone()),
            numerator / denominator,
        )?;
        if output.is_zero() {
            return Err(SwapError::InsufficientInputAmount);
        }

        let new_input_reserve = input_reserve.add(input)?;
        let new_output_reserve = output_reserve.sub(&output)?;
        let pair = if input_token.equals(self.token0()) {
            self.with_reserves(new_input_reserve, new_output_reserve)
        } else {
            self.with_reserves(new_output_reserve, new_input_reserve)
        };
        Ok((output, pair))
    }

    /// Quotes the input required to withdraw `output` from the pair.
    ///
    /// The `+ 1` after the floor division rounds the required input up so
    /// the pool is never undercompensated.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidToken`] if `output` is not denominated in one
    ///   of the pair's tokens.
    /// - [`SwapError::InsufficientReserves`] if either reserve is zero or
    ///   the requested output is not strictly below its reserve.
    pub fn quote_input(&self, output: &CurrencyAmount) -> Result<(CurrencyAmount, Pair)> {
        let output_token = Self::reserve_token(output)?;
        if !self.involves_token(output_token) {
            return Err(SwapError::InvalidToken("token is not part of this pair"));
        }
        if self.reserve0().raw().is_zero()
            || self.reserve1().raw().is_zero()
            || output.raw() >= self.reserve_of(output_token)?.raw()
        {
            return Err(SwapError::InsufficientReserves);
        }

        let input_token = self.other(output_token)?.clone();
        let output_reserve = self.reserve_of(output_token)?;
        let input_reserve = self.reserve_of(&input_token)?;

        let numerator = input_reserve.raw() * output.raw() * &*SWAP_FEE_DENOMINATOR;
        let denominator = (output_reserve.raw() - output.raw()) * &*SWAP_FEE_NUMERATOR;
        let input = CurrencyAmount::from_raw(
            Currency::from(input_token.clone()),
            numerator / denominator + 1,
        )?;

        let new_input_reserve = input_reserve.add(&input)?;
        let new_output_reserve = output_reserve.sub(output)?;
        let pair = if input_token.equals(self.token0()) {
            self.with_reserves(new_input_reserve, new_output_reserve)
        } else {
            self.with_reserves(new_output_reserve, new_input_reserve)
        };
        Ok((input, pair))
    }

    /// Quotes the liquidity minted for depositing `amount_a`/`amount_b`
    /// against the current reserves.
    ///
    /// For the genesis deposit (`total_supply` zero) the mint is
    /// `isqrt(amount0 × amount1) − MINIMUM_LIQUIDITY`, permanently burning
    /// the minimum. Afterwards it is the smaller of the two proportional
    /// contributions, so an imbalanced deposit cannot mint
    /// disproportionate liquidity.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidLiquidity`] if `total_supply` is not
    ///   denominated in the pair's liquidity token.
    /// - [`SwapError::InvalidToken`] if the deposit amounts do not match
    ///   the pair's tokens.
    /// - [`SwapError::InsufficientReserves`] if supply exists but a
    ///   reserve is zero.
    /// - [`SwapError::InsufficientInputAmount`] if the computed liquidity
    ///   is not strictly positive.
    pub fn quote_minted_liquidity(
        &self,
        total_supply: &CurrencyAmount,
        amount_a: &CurrencyAmount,
        amount_b: &CurrencyAmount,
    ) -> Result<CurrencyAmount> {
        if !self.is_liquidity_denominated(total_supply) {
            return Err(SwapError::InvalidLiquidity(
                "total supply must be denominated in the liquidity token",
            ));
        }

        let token_a = Self::reserve_token(amount_a)?;
        let token_b = Self::reserve_token(amount_b)?;
        let (amount0, amount1) = if token_a.sorts_before(token_b)? {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        let token0 = Self::reserve_token(amount0)?;
        let token1 = Self::reserve_token(amount1)?;
        if !token0.equals(self.token0()) || !token1.equals(self.token1()) {
            return Err(SwapError::InvalidToken("deposit tokens must match the pair"));
        }

        let liquidity = if total_supply.raw().is_zero() {
            let product = amount0.raw() * amount1.raw();
            BigInt::from(isqrt(product.magnitude())) - &*MINIMUM_LIQUIDITY
        } else {
            if self.reserve0().raw().is_zero() || self.reserve1().raw().is_zero() {
                return Err(SwapError::InsufficientReserves);
            }
            let share0 = amount0.raw() * total_supply.raw() / self.reserve0().raw();
            let share1 = amount1.raw() * total_supply.raw() / self.reserve1().raw();
            share0.min(share1)
        };

        if liquidity <= BigInt::zero() {
            return Err(SwapError::InsufficientInputAmount);
        }
        CurrencyAmount::from_raw(Currency::from(self.liquidity_token.clone()), liquidity)
    }

    /// Quotes the amount of `token` a liquidity position is worth.
    ///
    /// With the protocol fee active and a nonzero prior invariant
    /// `k_last`, the operator's phantom fee share
    /// `⌊supply × (rootK − rootKLast) / (rootK × 5 + rootKLast)⌋` dilutes
    /// the effective supply before the proportional value is taken.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidToken`] if `token` is not in the pair.
    /// - [`SwapError::InvalidLiquidity`] if `total_supply` or `liquidity`
    ///   is not denominated in the liquidity token, if `liquidity` exceeds
    ///   `total_supply`, or if the effective supply is zero.
    /// - [`SwapError::InvariantRequired`] if `protocol_fee_on` is set but
    ///   no prior invariant was supplied.
    pub fn quote_liquidity_value(
        &self,
        token: &Token,
        total_supply: &CurrencyAmount,
        liquidity: &CurrencyAmount,
        protocol_fee_on: bool,
        last_invariant: Option<&BigInt>,
    ) -> Result<CurrencyAmount> {
        if !self.involves_token(token) {
            return Err(SwapError::InvalidToken("token is not part of this pair"));
        }
        if !self.is_liquidity_denominated(total_supply) {
            return Err(SwapError::InvalidLiquidity(
                "total supply must be denominated in the liquidity token",
            ));
        }
        if !self.is_liquidity_denominated(liquidity) {
            return Err(SwapError::InvalidLiquidity(
                "liquidity must be denominated in the liquidity token",
            ));
        }
        if liquidity.raw() > total_supply.raw() {
            return Err(SwapError::InvalidLiquidity("liquidity exceeds total supply"));
        }

        let effective_supply = if protocol_fee_on {
            let k_last = last_invariant.ok_or(SwapError::InvariantRequired)?;
            if k_last.is_zero() {
                total_supply.raw()
            } else {
                let k = self.reserve0().raw() * self.reserve1().raw();
                let root_k = BigInt::from(isqrt(k.magnitude()));
                let root_k_last = BigInt::from(isqrt(k_last.magnitude()));
                if root_k > root_k_last {
                    let numerator = total_supply.raw() * (&root_k - &root_k_last);
                    let denominator = &root_k * 5 + &root_k_last;
                    total_supply.raw() + numerator / denominator
                } else {
                    total_supply.raw()
                }
            }
        } else {
            total_supply.raw()
        };

        if effective_supply.is_zero() {
            return Err(SwapError::InvalidLiquidity("total supply is zero"));
        }
        let value = liquidity.raw() * self.reserve_of(token)?.raw() / effective_supply;
        CurrencyAmount::from_raw(Currency::from(token.clone()), value)
    }

    fn is_liquidity_denominated(&self, amount: &CurrencyAmount) -> bool {
        amount
            .currency()
            .as_token()
            .is_some_and(|t| t.equals(&self.liquidity_token))
    }
}
