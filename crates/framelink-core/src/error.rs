//! Shared error type across framelink crates.

use thiserror::Error;

/// Stable error codes (used as log fields and in tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Connection-level failure reported by the transport.
    Transport,
    /// Inbound message is neither text nor a binary frame.
    Unclassifiable,
    /// Compressed payload could not be decoded.
    DecodeFailure,
    /// Command issued while the connection is not open.
    NotConnected,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config/protocol version.
    UnsupportedVersion,
    /// Malformed input event bytes.
    BadInput,
    /// Anything else.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Unclassifiable => "UNCLASSIFIABLE_MESSAGE",
            ErrorCode::DecodeFailure => "DECODE_FAILURE",
            ErrorCode::NotConnected => "NOT_CONNECTED",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::BadInput => "BAD_INPUT",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FrameLinkError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum FrameLinkError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("unclassifiable message: {0}")]
    UnclassifiableMessage(String),
    #[error("decode failure: {0}")]
    DecodeFailure(String),
    #[error("not connected")]
    NotConnected,
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("bad input event: {0}")]
    BadInput(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl FrameLinkError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            FrameLinkError::Transport(_) => ErrorCode::Transport,
            FrameLinkError::UnclassifiableMessage(_) => ErrorCode::Unclassifiable,
            FrameLinkError::DecodeFailure(_) => ErrorCode::DecodeFailure,
            FrameLinkError::NotConnected => ErrorCode::NotConnected,
            FrameLinkError::BadConfig(_) => ErrorCode::BadConfig,
            FrameLinkError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            FrameLinkError::BadInput(_) => ErrorCode::BadInput,
            FrameLinkError::Internal(_) => ErrorCode::Internal,
        }
    }
}
