//! Canonicalized table of published pair addresses.

use std::collections::HashMap;

use alloy_primitives::Address;

use crate::error::{Result, SwapError};

/// Returns the two addresses in canonical byte order.
fn ordered(a: Address, b: Address) -> (Address, Address) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// An immutable lookup table of known pair addresses, built once from
/// literal `(token_a, token_b, pair_address)` triples.
///
/// Entries are keyed by canonically ordered token addresses, so `(A, B)`
/// and `(B, A)` refer to the same entry. Address comparison is byte-wise,
/// which matches lower-cased hexadecimal ordering regardless of how the
/// literals were written.
///
/// # Examples
///
/// ```
/// use alloy_primitives::address;
/// use kelpie_swap::factory::StaticPairTable;
///
/// let a = address!("0000000000000000000000000000000000000001");
/// let b = address!("0000000000000000000000000000000000000002");
/// let pair = address!("00000000000000000000000000000000000000aa");
///
/// let table = StaticPairTable::from_triples(&[(b, a, pair)]).expect("no duplicates");
/// assert_eq!(table.get(a, b), Some(pair));
/// assert_eq!(table.get(b, a), Some(pair));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticPairTable {
    entries: HashMap<(Address, Address), Address>,
}

impl StaticPairTable {
    /// Builds a table from literal triples.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::DuplicatePairEntry`] on the first triple whose
    /// ordered token pair was already present, before any lookup can be
    /// served from the table.
    pub fn from_triples(triples: &[(Address, Address, Address)]) -> Result<Self> {
        let mut entries = HashMap::with_capacity(triples.len());
        for &(token_a, token_b, pair) in triples {
            let key = ordered(token_a, token_b);
            if entries.insert(key, pair).is_some() {
                return Err(SwapError::DuplicatePairEntry { token_a, token_b });
            }
        }
        Ok(Self { entries })
    }

    /// Returns the pair address for two token addresses, in either order.
    #[must_use]
    pub fn get(&self, token_a: Address, token_b: Address) -> Option<Address> {
        self.entries.get(&ordered(token_a, token_b)).copied()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(last_byte: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last_byte;
        Address::from(bytes)
    }

    #[test]
    fn empty_table() {
        let Ok(table) = StaticPairTable::from_triples(&[]) else {
            panic!("empty input is valid");
        };
        assert!(table.is_empty());
        assert_eq!(table.get(addr(1), addr(2)), None);
    }

    #[test]
    fn lookup_is_order_independent() {
        let Ok(table) = StaticPairTable::from_triples(&[(addr(2), addr(1), addr(0xaa))]) else {
            panic!("no duplicates");
        };
        assert_eq!(table.get(addr(1), addr(2)), Some(addr(0xaa)));
        assert_eq!(table.get(addr(2), addr(1)), Some(addr(0xaa)));
    }

    #[test]
    fn duplicate_same_order_rejected() {
        let result = StaticPairTable::from_triples(&[
            (addr(1), addr(2), addr(0xaa)),
            (addr(1), addr(2), addr(0xbb)),
        ]);
        assert_eq!(
            result.map(|t| t.len()),
            Err(SwapError::DuplicatePairEntry {
                token_a: addr(1),
                token_b: addr(2),
            })
        );
    }

    #[test]
    fn duplicate_reversed_order_rejected() {
        let result = StaticPairTable::from_triples(&[
            (addr(1), addr(2), addr(0xaa)),
            (addr(2), addr(1), addr(0xaa)),
        ]);
        assert!(matches!(
            result,
            Err(SwapError::DuplicatePairEntry { .. })
        ));
    }

    #[test]
    fn distinct_pairs_coexist() {
        let Ok(table) = StaticPairTable::from_triples(&[
            (addr(1), addr(2), addr(0xaa)),
            (addr(1), addr(3), addr(0xbb)),
            (addr(2), addr(3), addr(0xcc)),
        ]) else {
            panic!("no duplicates");
        };
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(addr(3), addr(1)), Some(addr(0xbb)));
    }
}
