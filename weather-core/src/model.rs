use serde::Serialize;

use crate::{Condition, ConditionTable, snapshot::DailyForecast};

/// One forecast day, keyed by the host's canonical attribute names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    /// ISO-8601 instant in UTC, e.g. `1970-01-01T00:00:00+00:00`.
    pub datetime: String,
    pub condition: Option<Condition>,
    pub native_temperature: f64,
    pub native_templow: f64,
    pub native_precipitation: f64,
    pub precipitation_probability: u8,
    pub native_wind_speed: f64,
    pub wind_bearing: u16,
}

impl ForecastEntry {
    pub(crate) fn from_daily(day: &DailyForecast, table: &ConditionTable) -> Self {
        Self {
            datetime: day.epoch_date.to_rfc3339(),
            condition: table.classify(day.icon_day),
            native_temperature: day.temperature_max.value,
            native_templow: day.temperature_min.value,
            native_precipitation: day.total_liquid_day.value,
            precipitation_probability: day.precipitation_probability_day,
            native_wind_speed: day.wind_day.speed.value,
            wind_bearing: day.wind_day.direction.degrees,
        }
    }
}

/// Every attribute the entity exposes, read from a single snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherState {
    pub condition: Option<Condition>,
    pub native_temperature: f64,
    pub native_pressure: f64,
    pub humidity: u8,
    pub native_wind_speed: f64,
    pub wind_bearing: u16,
    pub native_visibility: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Vec<ForecastEntry>>,
}
