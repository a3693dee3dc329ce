//! Deterministic pair address derivation with fallbacks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use alloy_primitives::{address, keccak256, Address, B256};

use crate::chain::{ChainId, NetworkRegistry};
use crate::domain::Token;
use crate::error::{Result, SwapError};
use crate::factory::{DiagnosticEvent, DiagnosticSink, FactoryLookup, TracingSink};

/// Well-known sentinel returned when no address is known for a pair.
///
/// Callers must treat this value as "unknown pair", never as a usable
/// contract address.
pub const UNKNOWN_PAIR_SENTINEL: Address = address!("dEADBEeF00000000000000000000000000000000");

/// Computes the deterministic pair address for two token addresses.
///
/// The tokens are put in canonical byte order, hashed as a packed 40-byte
/// salt, and combined with the factory address and the pair deployment-code
/// hash per the standard deterministic-deployment scheme. The result is a
/// pure function of its inputs and independent of argument order.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{address, b256};
/// use kelpie_swap::factory::compute_pair_address;
///
/// let factory = address!("1111111111111111111111111111111111111111");
/// let hash = b256!("515ceede630d54ea899e245e075fe1f8d2574639cfb3fbc20c70fa8b8d9bb884");
/// let a = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
/// let b = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
///
/// assert_eq!(
///     compute_pair_address(factory, a, b, hash),
///     compute_pair_address(factory, b, a, hash),
/// );
/// ```
#[must_use]
pub fn compute_pair_address(
    factory: Address,
    token_a: Address,
    token_b: Address,
    pair_code_hash: B256,
) -> Address {
    let (token0, token1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    let mut packed = [0u8; 40];
    packed[..20].copy_from_slice(token0.as_slice());
    packed[20..].copy_from_slice(token1.as_slice());
    let salt = keccak256(packed);
    factory.create2(salt, pair_code_hash)
}

/// Resolves pair addresses for token pairs, by derivation, static lookup,
/// or an injected asynchronous collaborator.
///
/// The resolver owns all the state the resolution paths need: the network
/// registry, an explicit memoization cache for derived addresses, a
/// diagnostic sink, and the one-time unknown-pair warning latch. Nothing
/// is process-global; embedders share a resolver by handle.
///
/// # Thread Safety
///
/// Derivation is a pure function of its `(network, token0, token1)` key,
/// so concurrent callers racing on the cache at worst recompute the same
/// value and perform an idempotent last write.
pub struct PairAddressResolver {
    registry: NetworkRegistry,
    cache: RwLock<HashMap<(ChainId, Address, Address), Address>>,
    sink: Arc<dyn DiagnosticSink>,
    warned_unknown_pair: AtomicBool,
}

impl core::fmt::Debug for PairAddressResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PairAddressResolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl PairAddressResolver {
    /// Creates a resolver over `registry` with the default tracing sink.
    #[must_use]
    pub fn new(registry: NetworkRegistry) -> Self {
        Self::with_sink(registry, Arc::new(TracingSink))
    }

    /// Creates a resolver with an injected diagnostic sink.
    #[must_use]
    pub fn with_sink(registry: NetworkRegistry, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
            sink,
            warned_unknown_pair: AtomicBool::new(false),
        }
    }

    /// Creates a resolver over the built-in network registry.
    ///
    /// # Errors
    ///
    /// Propagates registry construction failures.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(NetworkRegistry::builtin()?))
    }

    /// Returns the resolver's network registry.
    #[must_use]
    pub const fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Validates the operands and returns them in canonical order.
    fn ordered<'t>(token_a: &'t Token, token_b: &'t Token) -> Result<(&'t Token, &'t Token)> {
        if token_a.sorts_before(token_b)? {
            Ok((token_a, token_b))
        } else {
            Ok((token_b, token_a))
        }
    }

    /// Derives the deterministic address for a token pair, memoized per
    /// `(network, token0, token1)`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidToken`] if the tokens are on different
    /// networks, share an address, or their network is not configured.
    pub fn derive_address(&self, token_a: &Token, token_b: &Token) -> Result<Address> {
        let (token0, token1) = Self::ordered(token_a, token_b)?;
        let chain = token0.chain_id();
        let key = (chain, token0.address(), token1.address());

        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(hit) = cache.get(&key) {
                return Ok(*hit);
            }
        }

        let config = self
            .registry
            .config(chain)
            .ok_or(SwapError::InvalidToken("token's network is not configured"))?;
        let derived = compute_pair_address(
            config.factory,
            token0.address(),
            token1.address(),
            config.pair_code_hash,
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.insert(key, derived);
        Ok(derived)
    }

    /// Looks the pair up in the network's static table.
    ///
    /// On a miss this records one [`DiagnosticEvent::UnknownPair`] per
    /// process and returns [`UNKNOWN_PAIR_SENTINEL`] instead of failing:
    /// callers built against partial tables keep working and must treat
    /// the sentinel as "unknown pair".
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidToken`] if the tokens are on different
    /// networks or share an address.
    pub fn static_address(&self, token_a: &Token, token_b: &Token) -> Result<Address> {
        let (token0, token1) = Self::ordered(token_a, token_b)?;
        let chain = token0.chain_id();
        let known = self
            .registry
            .static_table(chain)
            .and_then(|table| table.get(token0.address(), token1.address()));

        match known {
            Some(pair) => Ok(pair),
            None => {
                if !self.warned_unknown_pair.swap(true, Ordering::Relaxed) {
                    self.sink.record(DiagnosticEvent::UnknownPair {
                        chain,
                        token0: token0.address(),
                        token1: token1.address(),
                    });
                }
                Ok(UNKNOWN_PAIR_SENTINEL)
            }
        }
    }

    /// Asks the injected collaborator for the pair address, uncached.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidToken`] for invalid operands and
    /// propagates whatever the collaborator reports.
    pub async fn lookup_address(
        &self,
        token_a: &Token,
        token_b: &Token,
        lookup: &dyn FactoryLookup,
    ) -> Result<Address> {
        let (token0, token1) = Self::ordered(token_a, token_b)?;
        lookup
            .pair_for(token0.chain_id(), token0.address(), token1.address())
            .await
    }

    /// Resolves the pair address the way the token's deployment
    /// environment prescribes: derivation where deterministic deploys are
    /// trustworthy, the static table otherwise.
    ///
    /// # Errors
    ///
    /// As [`derive_address`](Self::derive_address) and
    /// [`static_address`](Self::static_address).
    pub fn resolve(&self, token_a: &Token, token_b: &Token) -> Result<Address> {
        let config = self
            .registry
            .config(token_a.chain_id())
            .ok_or(SwapError::InvalidToken("token's network is not configured"))?;
        if config.deterministic_addressing {
            self.derive_address(token_a, token_b)
        } else {
            self.static_address(token_a, token_b)
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Captures events for assertions instead of logging them.
    #[derive(Default)]
    struct CapturingSink {
        events: Mutex<Vec<DiagnosticEvent>>,
    }

    impl DiagnosticSink for CapturingSink {
        fn record(&self, event: DiagnosticEvent) {
            let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
            events.push(event);
        }
    }

    fn tok(chain: ChainId, last_byte: u8) -> Token {
        let mut bytes = [0u8; 20];
        bytes[19] = last_byte;
        Token::new(chain, Address::from(bytes), 18)
    }

    fn resolver() -> PairAddressResolver {
        let Ok(r) = PairAddressResolver::builtin() else {
            panic!("builtin registry");
        };
        r
    }

    // Tokens from the built-in Nile static table.
    fn nile_dtkn() -> Token {
        Token::new(
            ChainId::Nile,
            address!("42c142500ff7068f326c01a8f1b3cd8ea7d9377f"),
            18,
        )
    }

    fn nile_wtrx() -> Token {
        Token::new(
            ChainId::Nile,
            address!("8f44113a985076431b77f6078f0929f949cb8836"),
            6,
        )
    }

    #[test]
    fn compute_is_order_independent() {
        let factory = address!("1111111111111111111111111111111111111111");
        let hash = b256_fixture();
        let a = tok(ChainId::Nile, 1).address();
        let b = tok(ChainId::Nile, 2).address();
        assert_eq!(
            compute_pair_address(factory, a, b, hash),
            compute_pair_address(factory, b, a, hash)
        );
    }

    #[test]
    fn compute_differs_per_pair() {
        let factory = address!("1111111111111111111111111111111111111111");
        let hash = b256_fixture();
        let a = tok(ChainId::Nile, 1).address();
        let b = tok(ChainId::Nile, 2).address();
        let c = tok(ChainId::Nile, 3).address();
        assert_ne!(
            compute_pair_address(factory, a, b, hash),
            compute_pair_address(factory, a, c, hash)
        );
    }

    fn b256_fixture() -> B256 {
        alloy_primitives::b256!("515ceede630d54ea899e245e075fe1f8d2574639cfb3fbc20c70fa8b8d9bb884")
    }

    #[test]
    fn derive_is_deterministic_and_memoized() {
        let resolver = resolver();
        let a = tok(ChainId::Nile, 1);
        let b = tok(ChainId::Nile, 2);
        let first = resolver.derive_address(&a, &b);
        let second = resolver.derive_address(&b, &a);
        assert_eq!(first, second);
        assert!(first.is_ok());
    }

    #[test]
    fn derive_rejects_cross_chain() {
        let resolver = resolver();
        let a = tok(ChainId::Nile, 1);
        let b = tok(ChainId::Shasta, 2);
        assert!(matches!(
            resolver.derive_address(&a, &b),
            Err(SwapError::InvalidToken(_))
        ));
    }

    #[test]
    fn derive_rejects_identical_tokens() {
        let resolver = resolver();
        let a = tok(ChainId::Nile, 1);
        let b = tok(ChainId::Nile, 1);
        assert!(matches!(
            resolver.derive_address(&a, &b),
            Err(SwapError::InvalidToken(_))
        ));
    }

    #[test]
    fn static_lookup_finds_known_pair() {
        let resolver = resolver();
        assert_eq!(
            resolver.static_address(&nile_wtrx(), &nile_dtkn()),
            Ok(address!("02a6a10E4C7750a7F8dC159b95936B574c211f0D"))
        );
    }

    #[test]
    fn static_miss_returns_sentinel_and_warns_once() {
        let Ok(registry) = NetworkRegistry::builtin() else {
            panic!("builtin registry");
        };
        let sink = Arc::new(CapturingSink::default());
        let resolver = PairAddressResolver::with_sink(registry, sink.clone());

        let a = tok(ChainId::Nile, 0xf0);
        let b = tok(ChainId::Nile, 0xf1);
        let c = tok(ChainId::Nile, 0xf2);

        assert_eq!(resolver.static_address(&a, &b), Ok(UNKNOWN_PAIR_SENTINEL));
        assert_eq!(resolver.static_address(&a, &c), Ok(UNKNOWN_PAIR_SENTINEL));

        let events = sink.events.lock().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(events.len(), 1, "warning must fire exactly once");
        assert!(matches!(
            events[0],
            DiagnosticEvent::UnknownPair {
                chain: ChainId::Nile,
                ..
            }
        ));
    }

    #[test]
    fn resolve_prefers_static_table_when_not_deterministic() {
        // All built-in networks have deterministic_addressing = false.
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(&nile_dtkn(), &nile_wtrx()),
            Ok(address!("02a6a10E4C7750a7F8dC159b95936B574c211f0D"))
        );
    }

    #[test]
    fn resolve_derives_when_deterministic() {
        let Ok(registry) = NetworkRegistry::builtin() else {
            panic!("builtin registry");
        };
        let Some(base) = registry.config(ChainId::Nile) else {
            panic!("nile config");
        };
        let mut config = base.clone();
        config.deterministic_addressing = true;
        let Ok(custom) = NetworkRegistry::from_configs(vec![config]) else {
            panic!("custom registry");
        };
        let resolver = PairAddressResolver::new(custom);

        let derived = resolver.resolve(&nile_dtkn(), &nile_wtrx());
        let direct = resolver.derive_address(&nile_dtkn(), &nile_wtrx());
        assert_eq!(derived, direct);
        assert!(derived.is_ok());
    }

    #[test]
    fn sentinel_is_never_a_derived_address() {
        let resolver = resolver();
        let a = tok(ChainId::Nile, 1);
        let b = tok(ChainId::Nile, 2);
        let Ok(derived) = resolver.derive_address(&a, &b) else {
            panic!("derivable");
        };
        assert_ne!(derived, UNKNOWN_PAIR_SENTINEL);
    }
}
