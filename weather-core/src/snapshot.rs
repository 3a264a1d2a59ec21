//! Typed view of the AccuWeather payloads.
//!
//! Field names follow the vendor JSON (`PascalCase`). Anything not listed
//! here is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Payload, SnapshotError};

/// `{"Value": 21.5, "Unit": "C", "UnitType": 17}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitValue {
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

/// A reading reported in both unit systems. Only `Metric` is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Measurement {
    pub metric: UnitValue,
    #[serde(default)]
    pub imperial: Option<UnitValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WindDirection {
    pub degrees: u16,
    #[serde(default)]
    pub localized: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentWind {
    pub speed: Measurement,
    pub direction: WindDirection,
}

/// The `currentconditions` record for one location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentConditions {
    pub weather_icon: u32,
    #[serde(default)]
    pub weather_text: Option<String>,
    pub temperature: Measurement,
    pub pressure: Measurement,
    pub relative_humidity: u8,
    pub wind: CurrentWind,
    pub visibility: Measurement,
}

/// Daily wind block. Forecast values come in the requested unit system only,
/// so there is no `Metric`/`Imperial` split here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyWind {
    pub speed: UnitValue,
    pub direction: WindDirection,
}

/// One day of the daily forecast.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyForecast {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub epoch_date: DateTime<Utc>,
    pub temperature_max: UnitValue,
    pub temperature_min: UnitValue,
    pub total_liquid_day: UnitValue,
    pub precipitation_probability_day: u8,
    pub wind_day: DailyWind,
    pub icon_day: u32,
}

/// The most recent fetch result for a single location.
///
/// Built once from the vendor payload and never mutated afterwards; a refresh
/// produces a new snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VendorSnapshot {
    #[serde(flatten)]
    pub current: CurrentConditions,
    /// `None` when the payload has no `forecast` key at all.
    #[serde(default)]
    pub forecast: Option<Vec<DailyForecast>>,
}

impl VendorSnapshot {
    pub fn new(current: CurrentConditions, forecast: Option<Vec<DailyForecast>>) -> Self {
        Self { current, forecast }
    }

    /// Parse a combined payload: current conditions with an optional embedded
    /// `forecast` array.
    pub fn from_json(body: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(body)
            .map_err(|err| SnapshotError::malformed(Payload::CurrentConditions, err))
    }

    /// Same as [`VendorSnapshot::from_json`] for an already decoded value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SnapshotError> {
        serde_json::from_value(value)
            .map_err(|err| SnapshotError::malformed(Payload::CurrentConditions, err))
    }

    /// Parse the two payloads the vendor serves separately. A forecast given
    /// here replaces any list embedded in `current`.
    pub fn from_parts(current: &str, forecast: Option<&str>) -> Result<Self, SnapshotError> {
        let snapshot = Self::from_json(current)?;

        match forecast {
            None => Ok(snapshot),
            Some(body) => {
                let days: Vec<DailyForecast> = serde_json::from_str(body)
                    .map_err(|err| SnapshotError::malformed(Payload::DailyForecast, err))?;
                Ok(snapshot.with_forecast(Some(days)))
            }
        }
    }

    pub fn with_forecast(mut self, forecast: Option<Vec<DailyForecast>>) -> Self {
        self.forecast = forecast;
        self
    }
}
