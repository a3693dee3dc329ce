//! Pair quoting walk-through.
//!
//! Demonstrates building a pair over exact reserves, quoting swaps in both
//! directions, minting liquidity, and resolving pair addresses.
//!
//! # Run
//!
//! ```bash
//! cargo run --example pair_quotes
//! ```

use alloy_primitives::address;
use kelpie_swap::chain::ChainId;
use kelpie_swap::domain::{Currency, CurrencyAmount, Token};
use kelpie_swap::factory::PairAddressResolver;
use kelpie_swap::math::Rounding;
use kelpie_swap::pair::Pair;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Constant-product pair quoting ===\n");

    // 1. Resolver over the built-in network configuration
    let resolver = PairAddressResolver::builtin()?;

    // 2. Two tokens on the Nile testnet
    let alpha = Token::with_metadata(
        ChainId::Nile,
        address!("0000000000000000000000000000000000000101"),
        18,
        "ALPHA",
        "Alpha Token",
    );
    let beta = Token::with_metadata(
        ChainId::Nile,
        address!("0000000000000000000000000000000000000202"),
        18,
        "BETA",
        "Beta Token",
    );

    // 3. A pair over balanced reserves
    let pair = Pair::new(
        CurrencyAmount::from_raw(Currency::from(alpha.clone()), 1_000_000u32)?,
        CurrencyAmount::from_raw(Currency::from(beta.clone()), 1_000_000u32)?,
        &resolver,
    )?;
    println!("Pair address:    {}", pair.address());
    println!("Liquidity token: {:?}", pair.liquidity_token().symbol());

    // 4. Mid price before trading
    let price = pair.token0_price()?;
    println!("\nMid price: {} (token1 per token0)", price.to_fixed(4, Rounding::HalfUp)?);

    // 5. Exact-in quote: sell 10_000 alpha
    let input = CurrencyAmount::from_raw(Currency::from(alpha.clone()), 10_000u32)?;
    let (output, after_sell) = pair.quote_output(&input)?;
    println!("\nSell {input} -> receive {output}");
    println!(
        "Post-trade reserves: ({}, {})",
        after_sell.reserve0(),
        after_sell.reserve1()
    );

    // 6. Exact-out quote: how much alpha buys exactly 5_000 beta?
    let wanted = CurrencyAmount::from_raw(Currency::from(beta), 5_000u32)?;
    let (required, _) = pair.quote_input(&wanted)?;
    println!("\nBuying {wanted} requires {required}");

    // 7. Genesis liquidity for a fresh pool
    let fresh = Pair::new(
        CurrencyAmount::from_raw(Currency::from(alpha.clone()), 0u32)?,
        CurrencyAmount::from_raw(
            Currency::from(Token::new(
                ChainId::Nile,
                address!("0000000000000000000000000000000000000303"),
                18,
            )),
            0u32,
        )?,
        &resolver,
    )?;
    let zero_supply =
        CurrencyAmount::from_raw(Currency::from(fresh.liquidity_token().clone()), 0u32)?;
    let deposit_a = CurrencyAmount::from_raw(Currency::from(alpha), 2_000u32)?;
    let deposit_b = CurrencyAmount::from_raw(
        Currency::from(Token::new(
            ChainId::Nile,
            address!("0000000000000000000000000000000000000303"),
            18,
        )),
        2_000u32,
    )?;
    let minted = fresh.quote_minted_liquidity(&zero_supply, &deposit_a, &deposit_b)?;
    println!("\nGenesis deposit of 2000/2000 mints {minted} (1000 burned forever)");

    Ok(())
}
