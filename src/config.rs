//! Application configuration loaded from environment variables.
//!
//! - `WATCHLIST_ORIGIN`: server origin the client talks to (default
//!   `http://127.0.0.1:5000`); the live channel uses `/ws` on it
//! - `WATCHLIST_RECONNECT_DELAY_MS`: delay before a reconnect attempt
//! - `WATCHLIST_SUMMARY_REFRESH_MS`: market summary refresh while connected
//! - `WATCHLIST_RESYNC_INTERVAL_MS`: full reload while disconnected
//! - `WATCHLIST_CA_FILE`: extra PEM trust anchors for `https` origins
//! - `WATCHLIST_SOUND`: `0`, `false` or `off` silences alert bells

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::{Result, WatchlistError};

/// Default server origin.
const DEFAULT_ORIGIN: &str = "http://127.0.0.1:5000";

/// Fixed delay between a close and the reconnect attempt it schedules.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(5000);

/// Market summary refresh period while the live channel is up.
pub const DEFAULT_SUMMARY_REFRESH: Duration = Duration::from_millis(30_000);

/// Full reload period while the live channel is down.
pub const DEFAULT_RESYNC_INTERVAL: Duration = Duration::from_millis(30_000);

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub refresh: RefreshConfig,
    pub ui: UiConfig,
}

/// Where the watchlist server lives and how to trust it.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub origin: Url,
    pub ca_file: Option<PathBuf>,
}

/// Timer periods for reconnects and scheduled refreshes.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub reconnect_delay: Duration,
    pub summary_interval: Duration,
    pub resync_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            summary_interval: DEFAULT_SUMMARY_REFRESH,
            resync_interval: DEFAULT_RESYNC_INTERVAL,
        }
    }
}

/// Presentation preferences.
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub sound_enabled: bool,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`WatchlistError::Config`] if the origin is not an `http` or
/// `https` URL with a host, or if an interval is not a positive number of
/// milliseconds.
pub fn fetch_config() -> Result<AppConfig> {
    let raw_origin = non_empty_var("WATCHLIST_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
    let origin = parse_origin(&raw_origin)?;

    let refresh = RefreshConfig {
        reconnect_delay: millis_var("WATCHLIST_RECONNECT_DELAY_MS", DEFAULT_RECONNECT_DELAY)?,
        summary_interval: millis_var("WATCHLIST_SUMMARY_REFRESH_MS", DEFAULT_SUMMARY_REFRESH)?,
        resync_interval: millis_var("WATCHLIST_RESYNC_INTERVAL_MS", DEFAULT_RESYNC_INTERVAL)?,
    };

    let sound_enabled = non_empty_var("WATCHLIST_SOUND")
        .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no"))
        .unwrap_or(true);

    Ok(AppConfig {
        server: ServerConfig {
            origin,
            ca_file: non_empty_var("WATCHLIST_CA_FILE").map(PathBuf::from),
        },
        refresh,
        ui: UiConfig { sound_enabled },
    })
}

/// Parses and validates a server origin.
fn parse_origin(raw: &str) -> Result<Url> {
    let origin = Url::parse(raw)
        .map_err(|e| WatchlistError::Config(format!("WATCHLIST_ORIGIN {raw:?} is not a URL: {e}")))?;

    if !matches!(origin.scheme(), "http" | "https") {
        return Err(WatchlistError::Config(format!(
            "WATCHLIST_ORIGIN must use http or https, got {}",
            origin.scheme()
        )));
    }
    if origin.host_str().is_none() {
        return Err(WatchlistError::Config(
            "WATCHLIST_ORIGIN has no host".to_string(),
        ));
    }

    Ok(origin)
}

/// Reads a positive millisecond duration, falling back to `default`.
fn millis_var(name: &str, default: Duration) -> Result<Duration> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(WatchlistError::Config(format!("{name} must be greater than zero"))),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(_) => Err(WatchlistError::Config(format!(
            "{name} must be a number of milliseconds, got {raw:?}"
        ))),
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
