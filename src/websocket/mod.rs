//! Live update channel to the watchlist server.
//!
//! This module is organized by concern:
//! - [`channel`] - Connection state machine and reconnect guard
//! - [`connection`] - Async driver that owns the socket and reconnects
//! - [`handler`] - Inbound frame decoding

pub mod channel;
mod connection;
mod handler;

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::{SplitSink, SplitStream};
use tokio::net::TcpStream;
use tokio_tungstenite::{Connector, MaybeTlsStream, WebSocketStream, connect_async_tls_with_config};
use tracing::info;
use tungstenite::Message;
use url::Url;

use crate::{Result, WatchlistError};

pub use channel::{ConnectAttempt, ConnectionState, LiveChannel, ReconnectTimer};
pub use connection::ConnectionManager;
pub use handler::decode_frame;

/// Path of the streaming endpoint on the server origin.
pub const STREAM_PATH: &str = "/ws";

/// Write half of a live channel connection.
pub type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Read half of a live channel connection.
pub type WsReader = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Derives the streaming URL from the server origin.
///
/// The scheme follows the origin's security context (`https` → `wss`,
/// `http` → `ws`) and the host, including any explicit port, is the
/// origin's own.
///
/// # Errors
///
/// Returns [`WatchlistError::InvalidOrigin`] for any other scheme or an
/// origin without a host.
pub fn stream_url(origin: &Url) -> Result<Url> {
    let scheme = match origin.scheme() {
        "https" => "wss",
        "http" => "ws",
        other => {
            return Err(WatchlistError::InvalidOrigin(format!(
                "unsupported scheme {other:?} in {origin}"
            )));
        }
    };

    let host = origin
        .host_str()
        .ok_or_else(|| WatchlistError::InvalidOrigin(format!("{origin} has no host")))?;

    let authority = match origin.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    Url::parse(&format!("{scheme}://{authority}{STREAM_PATH}"))
        .map_err(|e| WatchlistError::InvalidOrigin(format!("{origin}: {e}")))
}

/// Establishes a WebSocket connection to the given URL.
///
/// `wss` URLs are secured with `tls_config`; `ws` URLs ignore it.
///
/// # Errors
///
/// Returns a [`WatchlistError`] if the connection or TLS handshake fails.
pub async fn connect(url: &str, tls_config: Arc<rustls::ClientConfig>) -> Result<(WsWriter, WsReader)> {
    let connector = Connector::Rustls(tls_config);
    let (ws_stream, _) = connect_async_tls_with_config(url, None, false, Some(connector)).await?;
    info!(url, "WebSocket handshake completed");

    Ok(ws_stream.split())
}
