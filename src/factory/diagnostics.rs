//! Injectable diagnostic sink for non-fatal resolver events.

use alloy_primitives::Address;

use crate::chain::ChainId;

/// A non-fatal event the resolver wants to surface without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// No address is known for a canonically ordered pair; the resolver
    /// degraded to the sentinel address.
    UnknownPair {
        /// Network the lookup ran against.
        chain: ChainId,
        /// Lower-ordered token address.
        token0: Address,
        /// Higher-ordered token address.
        token1: Address,
    },
}

/// Receiver for resolver diagnostics.
///
/// The resolver itself stays side-effect free: anything worth telling an
/// operator goes through this trait, so tests can capture events and
/// embedders can route them wherever they like.
pub trait DiagnosticSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: DiagnosticEvent);
}

/// Default sink that forwards events to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::UnknownPair {
                chain,
                token0,
                token1,
            } => {
                tracing::warn!(
                    %chain,
                    %token0,
                    %token1,
                    "no known pair address; returning the sentinel address"
                );
            }
        }
    }
}
