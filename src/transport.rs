//! Transport abstraction.
//!
//! The engine is sans-I/O: everything protocol-level (handshake,
//! authentication, byte framing) lives behind the [`Transport`] trait, and
//! the session/demultiplexing logic above it only speaks in terms of
//! "send a payload", "wait for the reply" and "pull the next result set".
//! A production implementation wraps a wire client for the daemon's
//! protocol; tests drive the engine with a scripted in-memory transport.

use thiserror::Error;

use crate::config::{Config, Target};

/// Error reported by a [`Transport`] implementation.
///
/// `ConnectionLost` is the distinguished server-gone condition: the engine
/// maps it to [`crate::Error::Timeout`] so callers can tell "the daemon went
/// away" apart from every other connection failure.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server became unreachable or dropped the connection.
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    /// Socket-level failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other transport failure (handshake, framing, server refusal).
    #[error("{0}")]
    Failed(String),
}

/// One raw result set as delivered by the transport: column names in
/// daemon order plus row data, `None` marking SQL NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResult {
    /// Column names, positionally aligned with each row's values.
    pub columns: Vec<String>,
    /// Row data; inner `None` is a NULL value.
    pub rows: Vec<Vec<Option<String>>>,
}

/// A connected wire-protocol handle to the search daemon.
///
/// One `send` transmits a whole multi-statement payload; the daemon answers
/// with an ordered stream of result sets which the engine pulls off with
/// `store_result`/`next_result`. Implementations are not required to be
/// thread-safe; the engine never shares a transport across threads.
pub trait Transport: Sized {
    /// Process-wide, one-time setup. Must run before the first connect when
    /// the host process is multi-threaded. A no-op for pure-Rust transports;
    /// FFI-backed ones initialize their client library here.
    fn initialize() -> Result<(), TransportError> {
        Ok(())
    }

    /// Release process-wide resources acquired by [`Transport::initialize`].
    fn shutdown() {}

    /// Establish a connection to `target`, honoring the timeout and
    /// protocol-selection options in `config`.
    fn connect(target: &Target, config: &Config) -> Result<Self, TransportError>;

    /// Transmit one payload without waiting for the reply.
    fn send(&mut self, payload: &str) -> Result<(), TransportError>;

    /// Block until the daemon's reply to the last [`Transport::send`] is
    /// ready to be read.
    fn wait(&mut self) -> Result<(), TransportError>;

    /// Materialize the current result set of the reply stream.
    fn store_result(&mut self) -> Result<RawResult, TransportError>;

    /// Advance the reply stream to the following result set. Returns
    /// `Ok(false)` when the stream is exhausted.
    fn next_result(&mut self) -> Result<bool, TransportError>;
}
