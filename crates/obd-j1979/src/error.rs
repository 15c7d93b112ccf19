//! J1979 decode errors

use thiserror::Error;

/// Errors that can occur while decoding a positive ECU response
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload too short or first byte is not 0x40 + SID
    #[error("invalid envelope for service 0x{0:02X}")]
    InvalidEnvelope(u8),

    /// Payload length or PID ordering inconsistent with the dictionary
    #[error("response shape does not match the decoder dictionary")]
    InvalidResponseShape,

    /// Emission decode invoked with no dictionary installed
    #[error("no decoder dictionary installed")]
    MissingDictionary,

    /// A PID in the payload has no dictionary entry; the walk was aborted
    /// before anything could be decoded
    #[error("PID 0x{0:02X} missing from the decoder dictionary")]
    UnknownPid(u8),

    /// Structurally valid payload that decoded to no values
    #[error("response decoded to no values")]
    EmptyDecode,
}

/// Result type for J1979 decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;
