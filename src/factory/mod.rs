//! Pair address resolution.
//!
//! A pair's on-chain address is a pure function of its ordered token
//! addresses, the factory address, and the pair deployment-code hash. On
//! platforms missing the deterministic-deployment opcode that scheme is
//! not trustworthy, so a published static table and an asynchronous
//! on-chain query exist as fallbacks. [`PairAddressResolver`] owns all
//! three paths plus the memoization cache; nothing here is process-global.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`compute_pair_address`] | the deterministic hash derivation |
//! | [`PairAddressResolver`] | memoized derivation, static fallback, async delegation |
//! | [`StaticPairTable`] | duplicate-checked table of published pair addresses |
//! | [`FactoryLookup`] | contract for the injected asynchronous collaborator |
//! | [`DiagnosticSink`] | injectable receiver for non-fatal events |

mod diagnostics;
mod lookup;
mod resolver;
mod static_table;

pub use diagnostics::{DiagnosticEvent, DiagnosticSink, TracingSink};
pub use lookup::FactoryLookup;
pub use resolver::{compute_pair_address, PairAddressResolver, UNKNOWN_PAIR_SENTINEL};
pub use static_table::StaticPairTable;
