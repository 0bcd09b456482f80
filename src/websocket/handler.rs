//! Inbound frame decoding.

use tracing::{debug, warn};

use crate::error::WatchlistError;
use crate::models::{InboundMessage, parse_envelope};

/// Decodes a text frame into an [`InboundMessage`].
///
/// Frames that are not valid envelopes are dropped with a diagnostic log
/// and never reach the UI. Unknown discriminants are expected from newer
/// servers and only logged at debug level.
pub fn decode_frame(text: &str) -> Option<InboundMessage> {
    match parse_envelope(text) {
        Ok(message) => {
            debug!(kind = message.kind().as_str(), "Received live update");
            Some(message)
        }
        Err(WatchlistError::UnknownMessageType(tag)) => {
            debug!(msg_type = tag, "Ignoring unknown message type");
            None
        }
        Err(e) => {
            warn!(error = %e, len = text.len(), "Dropping malformed live update");
            None
        }
    }
}
