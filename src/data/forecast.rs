//! Multi-day forecast API client
//!
//! This module fetches the 4-day forecast from the remote service, validates the
//! response shape, and serves it from the TTL cache while it is fresh.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::ForecastPayload;
use crate::cache::{KeyValueStore, TtlCache, FORECAST_CACHE_KEY};

/// Default forecast endpoint
pub const DEFAULT_FORECAST_URL: &str =
    "https://api.data.gov.sg/v1/environment/4-day-weather-forecast";

/// Coarse classification of a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-success HTTP status
    Transport,
    /// Response parsed but the forecast data was missing or empty
    Shape,
    /// Network or decoding fault
    Unexpected,
}

/// Errors that can occur when fetching the forecast
///
/// Every variant collapses to the same "unavailable" rendering; the detail is
/// kept for logging.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// The server answered with a non-success status
    #[error("transport error: HTTP {status}")]
    Transport { status: u16 },

    /// The response did not contain a usable forecast sequence
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// The request could not be completed
    #[error("unexpected error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON
    #[error("unexpected error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchFailure::Transport { .. } => FailureKind::Transport,
            FetchFailure::InvalidShape(_) => FailureKind::Shape,
            FetchFailure::Network(_) | FetchFailure::Decode(_) => FailureKind::Unexpected,
        }
    }

    /// HTTP status code, when the failure came from the server
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchFailure::Transport { status } => Some(*status),
            _ => None,
        }
    }
}

/// Outcome of checking a decoded response against the expected shape
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid(ForecastPayload),
    Invalid(String),
}

/// Validates a forecast response body
///
/// Accepts either the wrapped `{"items": [<forecast set>, ...]}` form or a bare
/// forecast set. Only the first forecast set is used. The set must contain a
/// non-empty `forecasts` sequence.
///
/// # Returns
/// * `Ok(Validation)` - The body was JSON; the validation verdict
/// * `Err(serde_json::Error)` - The body was not JSON at all
pub fn validate_response(body: &str) -> Result<Validation, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;

    let forecast_set = match value {
        Value::Object(mut map) if map.contains_key("items") => match map.remove("items") {
            Some(Value::Array(items)) => items.into_iter().next(),
            _ => None,
        },
        other => Some(other),
    };

    let Some(forecast_set) = forecast_set else {
        return Ok(Validation::Invalid(
            "response contained no forecast sets".to_string(),
        ));
    };

    let payload: ForecastPayload = match serde_json::from_value(forecast_set) {
        Ok(payload) => payload,
        Err(e) => return Ok(Validation::Invalid(format!("malformed forecast set: {}", e))),
    };

    if payload.forecasts.is_empty() {
        return Ok(Validation::Invalid("forecast sequence is empty".to_string()));
    }

    Ok(Validation::Valid(payload))
}

/// Anything that can produce a forecast for the widget
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetches the forecast, never panicking or propagating a fault beyond `FetchFailure`
    async fn fetch_forecast(&self) -> Result<ForecastPayload, FetchFailure>;

    /// Drops any cached forecast so the next fetch goes to the network
    fn invalidate_cache(&self);
}

/// Client for fetching the forecast, backed by a TTL cache
#[derive(Debug)]
pub struct ForecastClient<S> {
    /// HTTP client for making requests
    http_client: Client,
    /// Forecast endpoint (allows override for testing)
    endpoint: String,
    /// Cache slot holding the last good payload
    cache: TtlCache<S, ForecastPayload>,
}

impl<S: KeyValueStore> ForecastClient<S> {
    /// Creates a client for `endpoint` caching into `store`
    pub fn new(endpoint: impl Into<String>, store: S) -> Self {
        Self::with_client(Client::new(), endpoint, store)
    }

    /// Creates a client with a custom HTTP client (e.g. one with a timeout)
    pub fn with_client(http_client: Client, endpoint: impl Into<String>, store: S) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            cache: TtlCache::new(store, FORECAST_CACHE_KEY),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn cache(&self) -> &TtlCache<S, ForecastPayload> {
        &self.cache
    }

    /// Fetches the forecast
    ///
    /// # Behavior
    /// - Returns cached data without a network call while the cache is fresh
    /// - Otherwise issues exactly one GET to the endpoint
    /// - On a valid response, writes the cache and returns the payload
    /// - On any failure, returns `FetchFailure` and leaves the cache untouched
    ///
    /// No retries are performed.
    pub async fn fetch_forecast(&self) -> Result<ForecastPayload, FetchFailure> {
        if let Some(entry) = self.cache.read() {
            if self.cache.is_fresh(&entry) {
                debug!(cached_at = %entry.timestamp, "serving forecast from cache");
                return Ok(entry.data);
            }
            debug!(cached_at = %entry.timestamp, "cached forecast is stale");
        }

        let payload = self.fetch_from_api().await.map_err(|e| {
            warn!(error = %e, kind = ?e.kind(), "forecast fetch failed");
            e
        })?;

        if let Err(e) = self.cache.write(&payload) {
            warn!(error = %e, "failed to cache forecast");
        }

        Ok(payload)
    }

    /// Fetches and validates the forecast directly from the API
    async fn fetch_from_api(&self) -> Result<ForecastPayload, FetchFailure> {
        info!(endpoint = %self.endpoint, "fetching forecast");

        let response = self.http_client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Transport {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        match validate_response(&body)? {
            Validation::Valid(payload) => Ok(payload),
            Validation::Invalid(reason) => Err(FetchFailure::InvalidShape(reason)),
        }
    }
}

#[async_trait]
impl<S: KeyValueStore> ForecastSource for ForecastClient<S> {
    async fn fetch_forecast(&self) -> Result<ForecastPayload, FetchFailure> {
        ForecastClient::fetch_forecast(self).await
    }

    fn invalidate_cache(&self) {
        if let Err(e) = self.cache.invalidate() {
            warn!(error = %e, "failed to invalidate forecast cache");
        }
    }
}
