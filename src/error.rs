//! Error types for the dialer-core library

use thiserror::Error;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors surfaced directly to the adapter's caller.
///
/// Consumer-visible failures (not-ready rejections, transport send
/// failures, unexpected engine responses) travel as callback events, not
/// as `Err` values; this enum covers API misuse only.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A callback handler is already registered
    #[error("callback handler already registered")]
    HandlerAlreadyRegistered,

    /// No callback handler registered for the attempted operation
    #[error("no callback handler registered")]
    HandlerMissing,

    /// A request is already awaiting its engine response
    #[error("request already pending: correlation id {correlation_id}")]
    RequestPending { correlation_id: u32 },

    /// Invalid state error
    #[error("invalid state: {message}")]
    InvalidState { message: String },
}

impl AdapterError {
    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}
