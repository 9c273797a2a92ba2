use thiserror::Error;

/// Errors that can occur while decoding wire payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Ran off the end of the payload mid-field
    #[error("payload exhausted: needed {needed} more bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },

    /// Invalid message kind byte received (possibly malformed or malicious packet)
    #[error("invalid message kind {kind} received (valid range: 0-3)")]
    InvalidMessageKind { kind: u8 },

    /// Boolean field was neither 0 nor 1
    #[error("invalid bool byte {value}")]
    InvalidBool { value: u8 },
}
