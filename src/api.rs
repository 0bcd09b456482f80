//! REST client for the watchlist server.
//!
//! Thin wrappers over the server's form and JSON endpoints. Mutations
//! return an [`ApiResponse`]; a `success: false` reply is turned into
//! [`WatchlistError::Api`] carrying the server's message, if any.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::models::{Alert, ApiResponse, MarketSummary, NewAlert, Stock, SymbolMatch};
use crate::{Result, WatchlistError};

/// HTTP client bound to one server origin.
#[derive(Clone, Debug)]
pub struct ApiClient {
    origin: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Builds a client for `origin`, trusting `tls_config` for `https`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Tls`] if the HTTP client cannot be built.
    pub fn new(origin: Url, tls_config: Arc<rustls::ClientConfig>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .use_preconfigured_tls((*tls_config).clone())
            .build()
            .map_err(|e| WatchlistError::Tls(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { origin, http })
    }

    /// Returns the origin this client talks to.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// `POST /add_stock`
    ///
    /// # Errors
    ///
    /// Returns a [`WatchlistError`] if the request fails or the server
    /// rejects the symbol.
    pub async fn add_stock(&self, symbol: &str) -> Result<ApiResponse> {
        let response = self
            .http
            .post(self.endpoint("/add_stock")?)
            .form(&[("symbol", symbol)])
            .send()
            .await?;
        info!(symbol, "Sent add_stock request");
        into_outcome(response).await
    }

    /// `POST /create_alert`
    ///
    /// # Errors
    ///
    /// Returns a [`WatchlistError`] if the request fails or the server
    /// rejects the alert.
    pub async fn create_alert(&self, alert: &NewAlert) -> Result<ApiResponse> {
        let response = self
            .http
            .post(self.endpoint("/create_alert")?)
            .form(alert)
            .send()
            .await?;
        info!(
            symbol = alert.symbol,
            alert_type = alert.alert_type.as_str(),
            target = %alert.target_value,
            "Sent create_alert request"
        );
        into_outcome(response).await
    }

    /// `DELETE /remove_stock/{symbol}`
    ///
    /// # Errors
    ///
    /// Returns a [`WatchlistError`] if the request fails or the server
    /// refuses the removal.
    pub async fn remove_stock(&self, symbol: &str) -> Result<ApiResponse> {
        let mut url = self.endpoint("/remove_stock")?;
        push_segment(&mut url, symbol)?;
        let response = self.http.delete(url).send().await?;
        info!(symbol, "Sent remove_stock request");
        into_outcome(response).await
    }

    /// `DELETE /remove_alert/{id}`
    ///
    /// # Errors
    ///
    /// Returns a [`WatchlistError`] if the request fails or the server
    /// refuses the removal.
    pub async fn remove_alert(&self, id: u64) -> Result<ApiResponse> {
        let mut url = self.endpoint("/remove_alert")?;
        push_segment(&mut url, &id.to_string())?;
        let response = self.http.delete(url).send().await?;
        info!(alert_id = id, "Sent remove_alert request");
        into_outcome(response).await
    }

    /// `GET /search_symbols?q=`
    ///
    /// # Errors
    ///
    /// Returns a [`WatchlistError`] if the request or decoding fails.
    pub async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        let mut url = self.endpoint("/search_symbols")?;
        url.query_pairs_mut().append_pair("q", query);
        self.get_json(url).await
    }

    /// `GET /api/stocks`
    ///
    /// # Errors
    ///
    /// Returns a [`WatchlistError`] if the request or decoding fails.
    pub async fn stocks(&self) -> Result<Vec<Stock>> {
        self.get_json(self.endpoint("/api/stocks")?).await
    }

    /// `GET /api/alerts`
    ///
    /// # Errors
    ///
    /// Returns a [`WatchlistError`] if the request or decoding fails.
    pub async fn alerts(&self) -> Result<Vec<Alert>> {
        self.get_json(self.endpoint("/api/alerts")?).await
    }

    /// `GET /api/triggered_alerts`
    ///
    /// # Errors
    ///
    /// Returns a [`WatchlistError`] if the request or decoding fails.
    pub async fn triggered_alerts(&self) -> Result<Vec<Alert>> {
        self.get_json(self.endpoint("/api/triggered_alerts")?).await
    }

    /// `GET /api/market_summary`
    ///
    /// # Errors
    ///
    /// Returns a [`WatchlistError`] if the request or decoding fails.
    pub async fn market_summary(&self) -> Result<MarketSummary> {
        self.get_json(self.endpoint("/api/market_summary")?).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.origin
            .join(path)
            .map_err(|e| WatchlistError::InvalidOrigin(format!("{}{path}: {e}", self.origin)))
    }
}

/// Appends one percent-encoded path segment.
fn push_segment(url: &mut Url, segment: &str) -> Result<()> {
    url.path_segments_mut()
        .map_err(|()| WatchlistError::InvalidOrigin("origin cannot have path segments".into()))?
        .push(segment);
    Ok(())
}

/// Decodes a mutation reply, mapping `success: false` to an error.
///
/// Error statuses that still carry a JSON reply keep the server's message.
async fn into_outcome(response: reqwest::Response) -> Result<ApiResponse> {
    let status_error = response.error_for_status_ref().err();
    let body = response.bytes().await?;

    match serde_json::from_slice::<ApiResponse>(&body) {
        Ok(outcome) if outcome.success && status_error.is_none() => Ok(outcome),
        Ok(outcome) => Err(WatchlistError::Api(outcome.message.unwrap_or_default())),
        Err(e) => Err(match status_error {
            Some(http) => http.into(),
            None => e.into(),
        }),
    }
}
