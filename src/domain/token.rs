//! Token identity type.

use alloy_primitives::Address;

use crate::chain::ChainId;
use crate::error::{Result, SwapError};

/// The canonical identity of a token on a given network.
///
/// Identity is the `(chain_id, address)` pair; `decimals` describes the
/// token's smallest-unit scale and `symbol`/`name` are display metadata
/// that never participate in equality.
///
/// # Examples
///
/// ```
/// use alloy_primitives::address;
/// use kelpie_swap::chain::ChainId;
/// use kelpie_swap::domain::Token;
///
/// let usdt = Token::with_metadata(
///     ChainId::Mainnet,
///     address!("a614f803b6fd780986a42c78ec9c7f77e6ded13c"),
///     6,
///     "USDT",
///     "Tether USD",
/// );
/// assert_eq!(usdt.decimals(), 6);
/// assert_eq!(usdt.symbol(), Some("USDT"));
/// ```
#[derive(Debug, Clone)]
pub struct Token {
    chain_id: ChainId,
    address: Address,
    decimals: u8,
    symbol: Option<String>,
    name: Option<String>,
}

impl Token {
    /// Creates a token without display metadata.
    #[must_use]
    pub const fn new(chain_id: ChainId, address: Address, decimals: u8) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: None,
            name: None,
        }
    }

    /// Creates a token with symbol and name.
    #[must_use]
    pub fn with_metadata(
        chain_id: ChainId,
        address: Address,
        decimals: u8,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: Some(symbol.into()),
            name: Some(name.into()),
        }
    }

    /// Returns the network this token lives on.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the token contract address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the number of decimals of the smallest unit.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Returns the display symbol, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if the two tokens share a network and an address.
    ///
    /// Metadata differences are ignored.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }

    /// Returns `true` if this token's address orders before `other`'s.
    ///
    /// Addresses compare by their byte values, which is the same order as
    /// lower-cased hexadecimal strings.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidToken`] if the tokens live on different
    /// networks or share an address.
    pub fn sorts_before(&self, other: &Self) -> Result<bool> {
        if self.chain_id != other.chain_id {
            return Err(SwapError::InvalidToken("tokens are on different networks"));
        }
        if self.address == other.address {
            return Err(SwapError::InvalidToken("tokens share an address"));
        }
        Ok(self.address < other.address)
    }
}

/// Identity comparison: network and address only.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Token {}

impl core::hash::Hash for Token {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}
