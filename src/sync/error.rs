use thiserror::Error;

use crate::wire::error::WireError;

/// Per-message rejections surfaced by the receive entry points. A failure
/// drops the rest of that one message; it never aborts the tick loop.
/// Divergence itself is not an error here: unknown entities, stale baselines
/// and incompatible build sites are logged and skipped, not returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Out-of-range owner id in a check message
    #[error("invalid owner id {owner} in {message} message (valid range: 0-7)")]
    OwnerOutOfRange { message: &'static str, owner: u8 },

    /// Out-of-range sender id in a ping message
    #[error("invalid sender id {peer} in ping message (valid range: 0-7)")]
    PeerOutOfRange { peer: u8 },

    /// Received capacity exceeds the convergence bound (possibly corrupt or
    /// malicious message)
    #[error("received capacity {received} exceeds upgrade bound {max}")]
    CapacityOutOfRange { received: u8, max: u8 },

    /// Payload decode failure
    #[error("wire error: {0}")]
    Wire(#[from] WireError),
}
