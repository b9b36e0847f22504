//! Error types for Ignite REST operations.

use thiserror::Error;

/// The main error type for Ignite REST operations.
///
/// Every layer forwards the first error unchanged to its caller; no layer
/// retries or swallows errors.
#[derive(Debug, Error)]
pub enum IgniteError {
    /// Malformed `host:port` or `host:startPort..endPort` address spec.
    /// Raised before any connection attempt is made.
    #[error("address format error: {0}")]
    AddressFormat(String),

    /// Connection-related errors (no reachable endpoint, network failures).
    #[error("connection error: {0}")]
    Connection(String),

    /// Authentication errors (the server rejected the request signature).
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The fixed per-request deadline elapsed. Never retried.
    #[error("timeout error: {0}")]
    Timeout(String),

    /// HTTP-level failures other than 401 (unexpected status codes).
    #[error("transport error: {0}")]
    Transport(String),

    /// Malformed response bodies or payloads that fail to decode.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Application errors reported by the server, passed through verbatim.
    #[error("server error: {0}")]
    Server(String),

    /// Query cursor misuse (bulk fetch after paging, fetching past the last
    /// page). Raised synchronously, without a network round trip.
    #[error("cursor state error: {0}")]
    CursorState(String),
}

/// A specialized `Result` type for Ignite REST operations.
pub type Result<T> = std::result::Result<T, IgniteError>;
