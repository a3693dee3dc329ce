//! Currency as a tagged variant over the native coin and tokens.

use super::Token;
use crate::chain::ChainId;

/// The native coin of a network.
///
/// Unlike a [`Token`] it has no contract address; its identity is the
/// network itself.
#[derive(Debug, Clone)]
pub struct NativeCoin {
    chain_id: ChainId,
    decimals: u8,
    symbol: Option<String>,
    name: Option<String>,
}

impl NativeCoin {
    /// Decimal count of the native coin on every supported network.
    pub const DECIMALS: u8 = 6;

    /// Returns the network this coin belongs to.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the decimal count.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Returns the display symbol, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }
}

/// A currency an amount can be denominated in: the network's native coin
/// or a specific token.
///
/// Both variants expose the same capability surface (`chain_id`,
/// `decimals`, `symbol`, `equals`), so callers never branch on the variant
/// for ordinary arithmetic; only pair construction insists on tokens.
///
/// # Examples
///
/// ```
/// use kelpie_swap::chain::ChainId;
/// use kelpie_swap::domain::Currency;
///
/// let coin = Currency::native(ChainId::Mainnet);
/// assert!(coin.is_native());
/// assert_eq!(coin.decimals(), 6);
/// assert!(coin.as_token().is_none());
/// ```
#[derive(Debug, Clone)]
pub enum Currency {
    /// The network's native coin.
    Native(NativeCoin),
    /// A token identified by contract address.
    Token(Token),
}

impl Currency {
    /// Returns the native coin of `chain`.
    #[must_use]
    pub fn native(chain: ChainId) -> Self {
        Self::Native(NativeCoin {
            chain_id: chain,
            decimals: NativeCoin::DECIMALS,
            symbol: Some("TRX".to_string()),
            name: Some("TRX".to_string()),
        })
    }

    /// Returns the network this currency lives on.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        match self {
            Self::Native(coin) => coin.chain_id(),
            Self::Token(token) => token.chain_id(),
        }
    }

    /// Returns the decimal count of the smallest unit.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        match self {
            Self::Native(coin) => coin.decimals(),
            Self::Token(token) => token.decimals(),
        }
    }

    /// Returns the display symbol, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Native(coin) => coin.symbol(),
            Self::Token(token) => token.symbol(),
        }
    }

    /// Returns `true` for the native-coin variant.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }

    /// Returns the token record if this currency is a token.
    #[must_use]
    pub const fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Native(_) => None,
            Self::Token(token) => Some(token),
        }
    }

    /// Returns `true` if the two currencies are the same.
    ///
    /// Two natives are equal when they share a network; two tokens compare
    /// by token identity; a native never equals a token.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Native(a), Self::Native(b)) => a.chain_id() == b.chain_id(),
            (Self::Token(a), Self::Token(b)) => a.equals(b),
            _ => false,
        }
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Currency {}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    fn tok(last_byte: u8) -> Token {
        let mut bytes = [0u8; 20];
        bytes[19] = last_byte;
        Token::new(ChainId::Nile, Address::from(bytes), 18)
    }

    #[test]
    fn native_capabilities() {
        let coin = Currency::native(ChainId::Nile);
        assert!(coin.is_native());
        assert_eq!(coin.chain_id(), ChainId::Nile);
        assert_eq!(coin.decimals(), 6);
        assert_eq!(coin.symbol(), Some("TRX"));
    }

    #[test]
    fn token_capabilities() {
        let currency = Currency::from(tok(1));
        assert!(!currency.is_native());
        assert_eq!(currency.decimals(), 18);
        assert!(currency.as_token().is_some());
    }

    #[test]
    fn natives_equal_on_same_chain() {
        assert_eq!(
            Currency::native(ChainId::Mainnet),
            Currency::native(ChainId::Mainnet)
        );
        assert_ne!(
            Currency::native(ChainId::Mainnet),
            Currency::native(ChainId::Shasta)
        );
    }

    #[test]
    fn native_never_equals_token() {
        let coin = Currency::native(ChainId::Nile);
        let token = Currency::from(tok(1));
        assert_ne!(coin, token);
        assert_ne!(token, coin);
    }

    #[test]
    fn tokens_compare_by_identity() {
        assert_eq!(Currency::from(tok(1)), Currency::from(tok(1)));
        assert_ne!(Currency::from(tok(1)), Currency::from(tok(2)));
    }
}
