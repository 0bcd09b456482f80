//! Crate-level error types.
//!
//! [`WatchlistError`] unifies every error source (configuration, WebSocket,
//! HTTP, JSON, TLS) behind a single enum so callers can match on the
//! variant they care about while still using the `?` operator for easy
//! propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WatchlistError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum WatchlistError {
    /// An environment variable held an unusable value.
    #[error("configuration error: {0}")]
    Config(String),

    /// A WebSocket operation (connect, send, receive) failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An HTTP request to the watchlist server failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// TLS configuration could not be built.
    #[error("tls error: {0}")]
    Tls(String),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// The server origin cannot be turned into a streaming URL.
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),

    /// An inbound frame was not a JSON object with a string `type`.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// An inbound frame carried a discriminant this client does not know.
    #[error("unknown message type: {0}")]
    UnknownMessageType(String),

    /// The server answered a mutation with `success: false`.
    #[error("{0}")]
    Api(String),
}
