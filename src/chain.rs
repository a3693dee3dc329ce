//! Network identity and the static per-network configuration surface.
//!
//! Each supported network carries a constant bundle: the factory contract
//! address, the pair deployment-code hash used by deterministic address
//! derivation, the wrapped-native token record, and the published table of
//! known pair addresses for platforms where derivation is not trustworthy.
//! The bundle is literal data supplied at process start, never derived.

use std::collections::HashMap;
use std::fmt;

use alloy_primitives::{address, b256, Address, B256};

use crate::domain::Token;
use crate::error::Result;
use crate::factory::StaticPairTable;

/// Identifier of a supported network.
///
/// The wire ids are the deployed platform's published chain ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainId {
    /// Production network.
    Mainnet,
    /// Primary public testnet.
    Nile,
    /// Secondary public testnet.
    Shasta,
}

impl ChainId {
    /// All supported networks.
    pub const ALL: [Self; 3] = [Self::Mainnet, Self::Nile, Self::Shasta];

    /// Returns the numeric chain id used on the wire.
    #[must_use]
    pub const fn id(self) -> u64 {
        match self {
            Self::Mainnet => 11_111,
            Self::Nile => 201_910_292,
            Self::Shasta => 1,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mainnet => "mainnet",
            Self::Nile => "nile",
            Self::Shasta => "shasta",
        };
        write!(f, "{name} ({})", self.id())
    }
}

/// Constant bundle describing one network deployment.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// The network this bundle describes.
    pub chain: ChainId,
    /// Address of the pair factory contract.
    pub factory: Address,
    /// Hash of the pair deployment code, the salt companion of the
    /// deterministic derivation scheme.
    pub pair_code_hash: B256,
    /// Whether derived addresses are trustworthy on this platform. When
    /// `false` the platform lacks the deterministic-deployment opcode and
    /// lookups should prefer the static table.
    pub deterministic_addressing: bool,
    /// The canonical wrapped form of the network's native coin.
    pub wrapped_native: Token,
    /// Published `(token_a, token_b, pair_address)` triples.
    pub static_pairs: Vec<(Address, Address, Address)>,
}

/// Immutable registry of all configured networks, built once at startup.
///
/// Construction canonicalizes every static pair list into a
/// [`StaticPairTable`] and fails fast on duplicate entries, so a
/// successfully built registry can serve lookups without further
/// validation.
#[derive(Debug)]
pub struct NetworkRegistry {
    configs: HashMap<ChainId, NetworkConfig>,
    tables: HashMap<ChainId, StaticPairTable>,
}

impl NetworkRegistry {
    /// Builds a registry from explicit network bundles.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::DuplicatePairEntry`](crate::error::SwapError::DuplicatePairEntry)
    /// if any network's static pair list contains two entries for the same
    /// ordered token pair.
    pub fn from_configs(configs: Vec<NetworkConfig>) -> Result<Self> {
        let mut tables = HashMap::with_capacity(configs.len());
        let mut by_chain = HashMap::with_capacity(configs.len());
        for config in configs {
            let table = StaticPairTable::from_triples(&config.static_pairs)?;
            tables.insert(config.chain, table);
            by_chain.insert(config.chain, config);
        }
        Ok(Self {
            configs: by_chain,
            tables,
        })
    }

    /// Builds the registry for the built-in deployments.
    ///
    /// # Errors
    ///
    /// Propagates static-table construction failures; the built-in data is
    /// duplicate-free, so this only fails if the data is edited carelessly.
    pub fn builtin() -> Result<Self> {
        Self::from_configs(vec![
            mainnet_config(),
            nile_config(),
            shasta_config(),
        ])
    }

    /// Returns the bundle for `chain`, if configured.
    #[must_use]
    pub fn config(&self, chain: ChainId) -> Option<&NetworkConfig> {
        self.configs.get(&chain)
    }

    /// Returns the canonicalized static pair table for `chain`.
    #[must_use]
    pub fn static_table(&self, chain: ChainId) -> Option<&StaticPairTable> {
        self.tables.get(&chain)
    }

    /// Returns the wrapped-native token for `chain`, if configured.
    #[must_use]
    pub fn wrapped_native(&self, chain: ChainId) -> Option<&Token> {
        self.configs.get(&chain).map(|c| &c.wrapped_native)
    }
}

fn mainnet_config() -> NetworkConfig {
    NetworkConfig {
        chain: ChainId::Mainnet,
        factory: address!("28d6a74c2e3a4da074011afef9238b59cf4fd825"),
        pair_code_hash: b256!("d81a8b57892d57f214f7ee297a246d0c81ad5dd2d7621668ea1705ea13da2f25"),
        deterministic_addressing: false,
        wrapped_native: Token::with_metadata(
            ChainId::Mainnet,
            address!("891cdb91d149f23b1a45d9c5ca78a88d0cb44c18"),
            6,
            "WTRX",
            "Wrapped TRX",
        ),
        static_pairs: vec![(
            address!("a614f803b6fd780986a42c78ec9c7f77e6ded13c"),
            address!("dfe9d10781d0e48bcc03f0fda2067e45aec6a144"),
            address!("025629d29f3b7686a2ab28bfd3b48ad29fbb691c"),
        )],
    }
}

fn nile_config() -> NetworkConfig {
    NetworkConfig {
        chain: ChainId::Nile,
        factory: address!("227044d0cd57e257b15c8c3bd5608e241b8b02ca"),
        pair_code_hash: b256!("f18ab5ba2b2ea93d5f80bbf9f1f4b2ccc8ad443571e6a3af023346a5dd669249"),
        deterministic_addressing: false,
        wrapped_native: Token::with_metadata(
            ChainId::Nile,
            address!("fb3b3134f13ccd2c81f4012e53024e8135d58fee"),
            6,
            "WTRX",
            "Wrapped TRX",
        ),
        static_pairs: vec![
            (
                address!("42c142500ff7068f326c01a8f1b3cd8ea7d9377f"),
                address!("8f44113a985076431b77f6078f0929f949cb8836"),
                address!("02a6a10E4C7750a7F8dC159b95936B574c211f0D"),
            ),
            (
                address!("ea51342dabbb928ae1e576bd39eff8aaf070a8c6"),
                address!("2129f037eb93a9a36eac7e2a0fb981f3ad3d0ae8"),
                address!("025629d29f3b7686a2ab28bfd3b48ad29fbb691c"),
            ),
        ],
    }
}

fn shasta_config() -> NetworkConfig {
    NetworkConfig {
        chain: ChainId::Shasta,
        factory: address!("b9fe040dd98a9718805c976f8a899ef17b0f43ed"),
        pair_code_hash: b256!("515ceede630d54ea899e245e075fe1f8d2574639cfb3fbc20c70fa8b8d9bb884"),
        deterministic_addressing: false,
        wrapped_native: Token::with_metadata(
            ChainId::Shasta,
            address!("A73FB788C5A6EF2BDB5FF621BC06F3CC8FF01A2A"),
            6,
            "WTRX",
            "Wrapped TRX",
        ),
        static_pairs: vec![
            (
                address!("A73FB788C5A6EF2BDB5FF621BC06F3CC8FF01A2A"),
                address!("D7377F28E13C4B255CD532E8182C0EF0F332E33F"),
                address!("0A5F4F46453AC545250BA305FDEF1D36EF3E8AAB"),
            ),
            (
                address!("A73FB788C5A6EF2BDB5FF621BC06F3CC8FF01A2A"),
                address!("4D59F65BA2D66D80F321E66BE5DF152E71AA302F"),
                address!("385EA972AFF458B32A35A7E9487747DEAF1AF054"),
            ),
            (
                address!("A73FB788C5A6EF2BDB5FF621BC06F3CC8FF01A2A"),
                address!("0B511B28D410B729D9D1502445FC1DAFE3B52810"),
                address!("7FEB8618565CE2085A7C6A03BEDB5BC9A5DFB999"),
            ),
            (
                address!("A73FB788C5A6EF2BDB5FF621BC06F3CC8FF01A2A"),
                address!("50ED1A4BD6335F1FE3570A4C167EF0A765817F67"),
                address!("4C6A66126A7B3271DCDC1B07C84AB83EEFD1092B"),
            ),
            (
                address!("50ED1A4BD6335F1FE3570A4C167EF0A765817F67"),
                address!("D7377F28E13C4B255CD532E8182C0EF0F332E33F"),
                address!("484809750F039BF7A181C7D9367C46E7914A62D4"),
            ),
            (
                address!("50ED1A4BD6335F1FE3570A4C167EF0A765817F67"),
                address!("4D59F65BA2D66D80F321E66BE5DF152E71AA302F"),
                address!("6016298F7AD4426B20485BE35CA289EA01A02AD0"),
            ),
            (
                address!("50ED1A4BD6335F1FE3570A4C167EF0A765817F67"),
                address!("0B511B28D410B729D9D1502445FC1DAFE3B52810"),
                address!("F0207A39AB5BB096039B953B9A84AE056A03E9CE"),
            ),
            (
                address!("0B511B28D410B729D9D1502445FC1DAFE3B52810"),
                address!("D7377F28E13C4B255CD532E8182C0EF0F332E33F"),
                address!("18430F57E0EC53BBB7146572258B46D000328243"),
            ),
            (
                address!("0B511B28D410B729D9D1502445FC1DAFE3B52810"),
                address!("4D59F65BA2D66D80F321E66BE5DF152E71AA302F"),
                address!("9857C2C3C765140342DA51A7231BE2726A04C96D"),
            ),
            (
                address!("4D59F65BA2D66D80F321E66BE5DF152E71AA302F"),
                address!("D7377F28E13C4B255CD532E8182C0EF0F332E33F"),
                address!("3B7E6AEA4ACF5D7884D847411F23B18C0EA62E39"),
            ),
        ],
    }
}
