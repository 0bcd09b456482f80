//! WebSocket connection lifecycle management.
//!
//! [`ConnectionManager`] drives a [`LiveChannel`]: it opens the socket,
//! forwards decoded frames to the UI loop, and after every close waits the
//! fixed reconnect delay before asking the channel whether to reconnect.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tungstenite::Message as WsMessage;
use url::Url;

use super::{LiveChannel, WsReader, connect, handler::decode_frame, stream_url};
use crate::tui::Message;

/// Why the reader loop exited.
enum DisconnectReason {
    /// The server closed the connection or the stream ended.
    Closed,
    /// The transport reported an error.
    Error(String),
    /// The message channel to the UI loop was closed (app shutting down).
    Shutdown,
}

/// Manages the live channel connection including fixed-delay reconnects.
pub struct ConnectionManager {
    origin: Url,
    tls_config: Arc<rustls::ClientConfig>,
    channel: LiveChannel,
    tx: mpsc::UnboundedSender<Message>,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    #[must_use]
    pub fn new(
        origin: Url,
        tls_config: Arc<rustls::ClientConfig>,
        reconnect_delay: Duration,
        tx: mpsc::UnboundedSender<Message>,
    ) -> Self {
        Self {
            origin,
            tls_config,
            channel: LiveChannel::new(reconnect_delay),
            tx,
        }
    }

    /// Runs the connection manager until the UI loop goes away.
    ///
    /// Transport failures are reported to the UI and followed by one
    /// reconnect after the configured delay. An origin that cannot be turned
    /// into a streaming URL leaves the channel disconnected for good.
    pub async fn run(mut self) {
        let url = match stream_url(&self.origin) {
            Ok(url) => url,
            Err(e) => {
                error!("Cannot build live channel URL: {e}");
                let _ = self.tx.send(Message::Disconnected);
                return;
            }
        };

        let mut attempt = self.channel.connect();

        loop {
            let _ = self.tx.send(Message::Connecting);
            info!(url = %url, connection = attempt.id, "Connecting to live channel");

            match connect(url.as_str(), self.tls_config.clone()).await {
                Ok((write, read)) => {
                    if self.channel.on_open(attempt) {
                        let _ = self.tx.send(Message::Connected);
                    }

                    let reason = self.read_loop(read).await;
                    // The write half stays alive for the lifetime of the read loop.
                    drop(write);

                    match reason {
                        DisconnectReason::Closed => {}
                        DisconnectReason::Error(e) => {
                            let _ = self.tx.send(Message::TransportError(e));
                        }
                        DisconnectReason::Shutdown => {
                            info!("Connection manager shutting down");
                            return;
                        }
                    }
                }
                Err(e) => {
                    warn!("Connection failed: {e}");
                    let _ = self.tx.send(Message::TransportError(e.to_string()));
                }
            }

            let Some(timer) = self.channel.on_close(attempt) else {
                warn!(connection = attempt.id, "Close of inactive connection, stopping");
                return;
            };
            if self.tx.send(Message::Disconnected).is_err() {
                return;
            }

            tokio::select! {
                () = tokio::time::sleep(timer.delay) => {}
                () = self.tx.closed() => {
                    info!("Connection manager shutting down");
                    return;
                }
            }

            match self.channel.on_reconnect_timer(timer) {
                Some(next) => attempt = next,
                None => {
                    warn!(epoch = timer.epoch, "Reconnect timer declined, stopping");
                    return;
                }
            }
        }
    }

    /// Reads frames until the connection ends or the UI loop shuts down.
    async fn read_loop(&self, mut read: WsReader) -> DisconnectReason {
        loop {
            tokio::select! {
                frame = read.next() => {
                    match frame {
                        Some(Ok(WsMessage::Text(text))) => {
                            if let Some(message) = decode_frame(&text)
                                && self.tx.send(Message::Inbound(message)).is_err()
                            {
                                return DisconnectReason::Shutdown;
                            }
                        }
                        Some(Ok(WsMessage::Close(frame))) => {
                            info!(?frame, "Server closed live channel");
                            return DisconnectReason::Closed;
                        }
                        Some(Ok(_)) => {} // Binary/Ping/Pong frames
                        Some(Err(e)) => {
                            warn!("WebSocket error: {e}");
                            return DisconnectReason::Error(e.to_string());
                        }
                        None => {
                            warn!("WebSocket stream ended");
                            return DisconnectReason::Closed;
                        }
                    }
                }

                () = self.tx.closed() => {
                    return DisconnectReason::Shutdown;
                }
            }
        }
    }
}
