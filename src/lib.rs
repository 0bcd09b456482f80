//! Terminal client for a live stock watchlist.
//!
//! Keeps a streaming connection to the watchlist server's `/ws` endpoint,
//! renders stock updates, alert triggers, notifications and market summaries
//! as they arrive, and drives the server's REST endpoints for adding stocks
//! and managing price alerts.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod tls;
pub mod tui;
pub mod websocket;

pub use error::{Result, WatchlistError};
