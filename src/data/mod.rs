//! Core data models for the ShoreSquad forecast widget
//!
//! This module contains the forecast payload as it arrives from the remote
//! service (and as it is stored in the cache), plus the client that fetches it.

pub mod forecast;

pub use forecast::{
    validate_response, FailureKind, FetchFailure, ForecastClient, ForecastSource, Validation,
    DEFAULT_FORECAST_URL,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A low/high pair where either bound may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
}

impl Range {
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }
}

/// Wind speed range (km/h) and compass direction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: Option<Range>,
    #[serde(default)]
    pub direction: Option<String>,
}

/// Forecast for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date (ISO 8601, no time)
    pub date: NaiveDate,
    /// Free-text summary, e.g. "Thundery Showers"
    #[serde(rename = "forecast", default)]
    pub summary: String,
    /// Temperature range in °C
    #[serde(default)]
    pub temperature: Option<Range>,
    #[serde(default)]
    pub wind: Option<Wind>,
    /// Relative humidity range in percent
    #[serde(default)]
    pub relative_humidity: Option<Range>,
}

impl ForecastDay {
    pub fn temperature(&self) -> Range {
        self.temperature.unwrap_or_default()
    }

    pub fn wind_speed(&self) -> Range {
        self.wind.as_ref().and_then(|w| w.speed).unwrap_or_default()
    }

    pub fn wind_direction(&self) -> Option<&str> {
        self.wind.as_ref().and_then(|w| w.direction.as_deref())
    }

    pub fn relative_humidity(&self) -> Range {
        self.relative_humidity.unwrap_or_default()
    }
}

/// One forecast set: an ordered run of days, the first being today
///
/// A payload is only valid when `forecasts` is non-empty; see
/// [`validate_response`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub forecasts: Vec<ForecastDay>,
}

impl ForecastPayload {
    /// The first day of the forecast, if any
    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecasts.first()
    }
}
