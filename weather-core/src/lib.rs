//! Core library for the `accuweather` CLI.
//!
//! This crate defines:
//! - A typed model of AccuWeather current-conditions and daily-forecast payloads
//! - Icon code classification into canonical weather conditions
//! - The data-source seam and an in-memory snapshot coordinator
//! - The weather entity, which reads canonical attributes out of the latest snapshot
//! - Configuration of tracked locations
//!
//! Fetching payloads from the vendor is left to whoever owns the coordinator.

pub mod condition;
pub mod config;
pub mod entity;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod source;
pub mod units;

#[cfg(test)]
mod test_support;

pub use condition::{Condition, ConditionTable};
pub use config::{Config, LocationConfig};
pub use entity::{ATTRIBUTION, SnapshotView, WeatherEntity};
pub use error::{Payload, SnapshotError};
pub use model::{ForecastEntry, WeatherState};
pub use snapshot::VendorSnapshot;
pub use source::{DataSource, DeviceInfo, SnapshotCoordinator};
pub use units::NativeUnits;
