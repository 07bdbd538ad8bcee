//! Error types for searchql.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type for searchql operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for searchql.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not be established or used (handshake failure,
    /// socket error).
    #[error("connection error: {0}")]
    Connection(String),

    /// The server became unreachable or the connection was lost, typically
    /// because a configured timeout expired. Distinguished from
    /// [`Error::Connection`] so callers can apply retry policy selectively.
    #[error("server lost: {0}")]
    Timeout(String),

    /// The reply stream did not match what was dispatched (e.g. a requested
    /// meta result set was not actually produced by the daemon).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Caller misuse: executing on an unconnected session, reading meta from
    /// a result that never asked for it, and the like.
    #[error("invalid usage: {0}")]
    Usage(String),

    /// A column name or row index was outside the result set.
    #[error("out of range: {0}")]
    OutOfRange(String),
}

impl Error {
    /// Returns true for connection-level failures ([`Error::Connection`] and
    /// [`Error::Timeout`]); after one of these the session state is unknown
    /// and the connection should not be reused.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_) | Error::Timeout(_))
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            // The distinguished server-gone/connection-lost condition.
            TransportError::ConnectionLost(msg) => Error::Timeout(msg),
            TransportError::Io(e) => Error::Connection(e.to_string()),
            TransportError::Failed(msg) => Error::Connection(msg),
        }
    }
}
