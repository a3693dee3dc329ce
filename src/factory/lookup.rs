//! Asynchronous factory-lookup collaborator contract.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::chain::ChainId;
use crate::error::Result;

/// An injected collaborator that can ask the on-chain factory for a pair
/// address, typically backed by a contract-call client.
///
/// This trait only defines the call contract. Timeout, retry, and
/// cancellation policy belong to the implementation; the resolver neither
/// caches nor retries what it returns.
#[async_trait]
pub trait FactoryLookup: Send + Sync {
    /// Returns the pair address for two token addresses on `chain`.
    ///
    /// # Errors
    ///
    /// Implementations should surface transport or contract failures as
    /// [`SwapError::LookupFailed`](crate::error::SwapError::LookupFailed).
    async fn pair_for(&self, chain: ChainId, token_a: Address, token_b: Address)
        -> Result<Address>;
}
