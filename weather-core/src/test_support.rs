//! Vendor payload fixtures shared by the unit tests.

use serde_json::{Value, json};

use crate::VendorSnapshot;

pub(crate) fn current_json(icon: u32, temperature: f64) -> Value {
    json!({
        "LocalObservationDateTime": "2024-05-01T12:00:00+02:00",
        "EpochTime": 1_714_557_600,
        "WeatherText": "Sunny",
        "WeatherIcon": icon,
        "HasPrecipitation": false,
        "IsDayTime": true,
        "Temperature": {
            "Metric": { "Value": temperature, "Unit": "C", "UnitType": 17 },
            "Imperial": { "Value": 70.7, "Unit": "F", "UnitType": 18 }
        },
        "RelativeHumidity": 54,
        "Wind": {
            "Direction": { "Degrees": 225, "Localized": "SW", "English": "SW" },
            "Speed": {
                "Metric": { "Value": 14.8, "Unit": "km/h", "UnitType": 7 },
                "Imperial": { "Value": 9.2, "Unit": "mi/h", "UnitType": 9 }
            }
        },
        "Visibility": {
            "Metric": { "Value": 16.1, "Unit": "km", "UnitType": 6 },
            "Imperial": { "Value": 10.0, "Unit": "mi", "UnitType": 2 }
        },
        "Pressure": {
            "Metric": { "Value": 1012.0, "Unit": "mb", "UnitType": 14 },
            "Imperial": { "Value": 29.88, "Unit": "inHg", "UnitType": 12 }
        }
    })
}

pub(crate) fn daily_json(epoch: i64, icon: u32) -> Value {
    json!({
        "Date": "2024-05-01T07:00:00+02:00",
        "EpochDate": epoch,
        "TemperatureMax": { "Value": 24.1, "Unit": "C", "UnitType": 17 },
        "TemperatureMin": { "Value": 11.3, "Unit": "C", "UnitType": 17 },
        "TotalLiquidDay": { "Value": 1.2, "Unit": "mm", "UnitType": 3 },
        "PrecipitationProbabilityDay": 40,
        "WindDay": {
            "Speed": { "Value": 13.0, "Unit": "km/h", "UnitType": 7 },
            "Direction": { "Degrees": 180, "Localized": "S", "English": "S" }
        },
        "IconDay": icon
    })
}

/// A snapshot with `days` forecast entries, one day apart, icons cycling
/// through `1..=5`.
pub(crate) fn snapshot_with_days(icon: u32, days: usize) -> VendorSnapshot {
    let mut body = current_json(icon, 21.5);
    let forecast: Vec<Value> = (0..days)
        .map(|i| daily_json(i as i64 * 86_400, (i % 5) as u32 + 1))
        .collect();
    body["forecast"] = Value::Array(forecast);

    VendorSnapshot::from_value(body).expect("fixture must parse")
}

pub(crate) fn snapshot_without_forecast(icon: u32, temperature: f64) -> VendorSnapshot {
    VendorSnapshot::from_value(current_json(icon, temperature)).expect("fixture must parse")
}
