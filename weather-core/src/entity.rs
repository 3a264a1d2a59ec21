//! The weather entity: a read-only view that maps the coordinator's latest
//! snapshot onto canonical attributes.

use std::sync::Arc;

use crate::{
    Condition, ConditionTable, DataSource, DeviceInfo, ForecastEntry, NativeUnits, VendorSnapshot,
    WeatherState,
};

pub const ATTRIBUTION: &str = "Data provided by AccuWeather";

/// Weather entity bound to one data source.
///
/// Every accessor loads the source's current snapshot once and computes from
/// it. Two accessors called in a row may therefore see two different
/// snapshots if a refresh lands in between; use [`WeatherEntity::view`] to
/// read several attributes from the same one.
#[derive(Debug)]
pub struct WeatherEntity<S> {
    source: S,
    table: ConditionTable,
    unique_id: String,
    device_info: DeviceInfo,
    units: NativeUnits,
}

impl<S: DataSource> WeatherEntity<S> {
    pub fn new(source: S) -> Self {
        Self::with_table(source, ConditionTable::default())
    }

    pub fn with_table(source: S, table: ConditionTable) -> Self {
        let unique_id = source.location_key().to_string();
        let device_info = source.device_info().clone();

        Self {
            source,
            table,
            unique_id,
            device_info,
            units: NativeUnits::METRIC,
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn attribution(&self) -> &'static str {
        ATTRIBUTION
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    pub fn units(&self) -> NativeUnits {
        self.units
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Pin the current snapshot.
    pub fn view(&self) -> SnapshotView<'_> {
        SnapshotView::new(self.source.snapshot(), &self.table)
    }

    pub fn condition(&self) -> Option<Condition> {
        self.view().condition()
    }

    pub fn native_temperature(&self) -> f64 {
        self.view().native_temperature()
    }

    pub fn native_pressure(&self) -> f64 {
        self.view().native_pressure()
    }

    pub fn humidity(&self) -> u8 {
        self.view().humidity()
    }

    pub fn native_wind_speed(&self) -> f64 {
        self.view().native_wind_speed()
    }

    pub fn wind_bearing(&self) -> u16 {
        self.view().wind_bearing()
    }

    pub fn native_visibility(&self) -> f64 {
        self.view().native_visibility()
    }

    pub fn forecast(&self) -> Option<Vec<ForecastEntry>> {
        self.view().forecast()
    }

    pub fn state(&self) -> WeatherState {
        self.view().state()
    }
}

/// Attribute accessors over one fixed snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotView<'a> {
    snapshot: Arc<VendorSnapshot>,
    table: &'a ConditionTable,
}

impl<'a> SnapshotView<'a> {
    pub fn new(snapshot: Arc<VendorSnapshot>, table: &'a ConditionTable) -> Self {
        Self { snapshot, table }
    }

    pub fn snapshot(&self) -> &VendorSnapshot {
        &self.snapshot
    }

    pub fn condition(&self) -> Option<Condition> {
        self.table.classify(self.snapshot.current.weather_icon)
    }

    pub fn native_temperature(&self) -> f64 {
        self.snapshot.current.temperature.metric.value
    }

    pub fn native_pressure(&self) -> f64 {
        self.snapshot.current.pressure.metric.value
    }

    pub fn humidity(&self) -> u8 {
        self.snapshot.current.relative_humidity
    }

    pub fn native_wind_speed(&self) -> f64 {
        self.snapshot.current.wind.speed.metric.value
    }

    pub fn wind_bearing(&self) -> u16 {
        self.snapshot.current.wind.direction.degrees
    }

    pub fn native_visibility(&self) -> f64 {
        self.snapshot.current.visibility.metric.value
    }

    /// `None` when the snapshot has no forecast; an empty list stays empty.
    pub fn forecast(&self) -> Option<Vec<ForecastEntry>> {
        let days = self.snapshot.forecast.as_ref()?;

        Some(
            days.iter()
                .map(|day| ForecastEntry::from_daily(day, self.table))
                .collect(),
        )
    }

    pub fn state(&self) -> WeatherState {
        WeatherState {
            condition: self.condition(),
            native_temperature: self.native_temperature(),
            native_pressure: self.native_pressure(),
            humidity: self.humidity(),
            native_wind_speed: self.native_wind_speed(),
            wind_bearing: self.wind_bearing(),
            native_visibility: self.native_visibility(),
            forecast: self.forecast(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        SnapshotCoordinator,
        test_support::{snapshot_with_days, snapshot_without_forecast},
    };
    use pretty_assertions::assert_eq;

    fn entity_for(snapshot: VendorSnapshot) -> WeatherEntity<Arc<SnapshotCoordinator>> {
        WeatherEntity::new(Arc::new(SnapshotCoordinator::new("268068", "Home", snapshot)))
    }

    #[test]
    fn construction_copies_static_metadata() {
        let entity = entity_for(snapshot_without_forecast(1, 21.5));

        assert_eq!(entity.unique_id(), "268068");
        assert_eq!(entity.attribution(), "Data provided by AccuWeather");
        assert_eq!(entity.device_info(), &DeviceInfo::for_location("268068", "Home"));
        assert_eq!(entity.units(), NativeUnits::METRIC);
        assert_eq!(entity.units().temperature, "°C");
        assert_eq!(entity.units().wind_speed, "km/h");
    }

    #[test]
    fn distinct_coordinators_give_distinct_ids() {
        let a = WeatherEntity::new(SnapshotCoordinator::new(
            "111",
            "A",
            snapshot_without_forecast(1, 1.0),
        ));
        let b = WeatherEntity::new(SnapshotCoordinator::new(
            "222",
            "B",
            snapshot_without_forecast(1, 1.0),
        ));

        assert_eq!(a.unique_id(), "111");
        assert_eq!(b.unique_id(), "222");
        assert_ne!(a.unique_id(), b.unique_id());
    }

    #[test]
    fn scalar_attributes_are_read_unconverted() {
        let entity = entity_for(snapshot_without_forecast(1, 21.5));

        assert_eq!(entity.native_temperature(), 21.5);
        assert_eq!(entity.native_pressure(), 1012.0);
        assert_eq!(entity.humidity(), 54);
        assert_eq!(entity.native_wind_speed(), 14.8);
        assert_eq!(entity.wind_bearing(), 225);
        assert_eq!(entity.native_visibility(), 16.1);
    }

    #[test]
    fn condition_resolves_known_and_unknown_icons() {
        assert_eq!(
            entity_for(snapshot_without_forecast(33, 5.0)).condition(),
            Some(Condition::ClearNight)
        );
        assert_eq!(
            entity_for(snapshot_without_forecast(18, 5.0)).condition(),
            Some(Condition::Pouring)
        );
        assert_eq!(entity_for(snapshot_without_forecast(99, 5.0)).condition(), None);
    }

    #[test]
    fn custom_table_is_used_for_current_and_forecast() {
        let table = ConditionTable::new([
            (Condition::Windy, vec![1]),
            (Condition::Sunny, vec![1, 2]),
        ]);
        let coordinator = SnapshotCoordinator::new("1", "Home", snapshot_with_days(1, 2));
        let entity = WeatherEntity::with_table(coordinator, table);

        assert_eq!(entity.condition(), Some(Condition::Windy));

        let conditions: Vec<_> = entity
            .forecast()
            .unwrap()
            .into_iter()
            .map(|entry| entry.condition)
            .collect();
        assert_eq!(conditions, vec![Some(Condition::Windy), Some(Condition::Sunny)]);
    }

    #[test]
    fn forecast_absent_without_forecast_key() {
        let entity = entity_for(snapshot_without_forecast(1, 21.5));
        assert_eq!(entity.forecast(), None);
    }

    #[test]
    fn forecast_preserves_length_and_order() {
        for days in [0, 1, 5] {
            let mut snapshot = snapshot_with_days(1, days);
            // Newest first, so sorting the output would be caught.
            if let Some(list) = snapshot.forecast.as_mut() {
                list.reverse();
            }
            let input: Vec<(String, u32)> = snapshot
                .forecast
                .iter()
                .flatten()
                .map(|day| (day.epoch_date.to_rfc3339(), day.icon_day))
                .collect();

            let forecast = entity_for(snapshot).forecast().expect("forecast present");

            assert_eq!(forecast.len(), days);
            let datetimes: Vec<String> = forecast.iter().map(|e| e.datetime.clone()).collect();
            let expected_datetimes: Vec<String> = input.iter().map(|(dt, _)| dt.clone()).collect();
            assert_eq!(datetimes, expected_datetimes);

            let conditions: Vec<Option<Condition>> =
                forecast.iter().map(|e| e.condition).collect();
            let expected_conditions: Vec<Option<Condition>> = input
                .iter()
                .map(|(_, icon)| ConditionTable::accuweather().classify(*icon))
                .collect();
            assert_eq!(conditions, expected_conditions);
        }
    }

    #[test]
    fn five_day_forecast_keeps_input_icon_sequence() {
        let forecast = entity_for(snapshot_with_days(1, 5)).forecast().unwrap();
        let conditions: Vec<_> = forecast.into_iter().map(|e| e.condition).collect();

        // Fixture icons run 1, 2, 3, 4, 5.
        assert_eq!(
            conditions,
            vec![
                Some(Condition::Sunny),
                Some(Condition::Sunny),
                Some(Condition::PartlyCloudy),
                Some(Condition::PartlyCloudy),
                Some(Condition::Sunny),
            ]
        );
    }

    #[test]
    fn forecast_entry_is_remapped() {
        let entity = entity_for(snapshot_with_days(1, 2));
        let forecast = entity.forecast().unwrap();

        assert_eq!(
            forecast[0],
            ForecastEntry {
                datetime: "1970-01-01T00:00:00+00:00".to_string(),
                condition: Some(Condition::Sunny),
                native_temperature: 24.1,
                native_templow: 11.3,
                native_precipitation: 1.2,
                precipitation_probability: 40,
                native_wind_speed: 13.0,
                wind_bearing: 180,
            }
        );
        assert_eq!(forecast[1].datetime, "1970-01-02T00:00:00+00:00");
    }

    #[test]
    fn forecast_condition_miss_is_none() {
        let mut snapshot = snapshot_with_days(1, 1);
        if let Some(days) = snapshot.forecast.as_mut() {
            days[0].icon_day = 9;
        }

        let entity = entity_for(snapshot);
        assert_eq!(entity.forecast().unwrap()[0].condition, None);
    }

    #[test]
    fn icon_codes_past_the_table_resolve_to_none() {
        let mut snapshot = snapshot_with_days(256, 1);
        if let Some(days) = snapshot.forecast.as_mut() {
            days[0].icon_day = 1000;
        }

        let entity = entity_for(snapshot);

        assert_eq!(entity.condition(), None);
        assert_eq!(entity.native_temperature(), 21.5);
        assert_eq!(entity.forecast().unwrap()[0].condition, None);
    }

    #[test]
    fn forecast_is_idempotent() {
        let entity = entity_for(snapshot_with_days(1, 5));
        assert_eq!(entity.forecast(), entity.forecast());
        assert_eq!(entity.state(), entity.state());
    }

    #[test]
    fn reads_follow_snapshot_replacement() {
        let coordinator = Arc::new(SnapshotCoordinator::new(
            "1",
            "Home",
            snapshot_without_forecast(1, 10.0),
        ));
        let entity = WeatherEntity::new(Arc::clone(&coordinator));

        let pinned = entity.view();
        assert_eq!(entity.native_temperature(), 10.0);

        coordinator.replace(snapshot_with_days(12, 3));

        assert_eq!(entity.native_temperature(), 21.5);
        assert_eq!(entity.condition(), Some(Condition::Rainy));
        assert_eq!(entity.forecast().map(|f| f.len()), Some(3));

        // The pinned view still answers from the snapshot it loaded.
        assert_eq!(pinned.native_temperature(), 10.0);
        assert_eq!(pinned.condition(), Some(Condition::Sunny));
        assert_eq!(pinned.forecast(), None);
    }

    #[test]
    fn state_collects_every_attribute() {
        let entity = entity_for(snapshot_with_days(3, 1));
        let state = entity.state();

        assert_eq!(state.condition, Some(Condition::PartlyCloudy));
        assert_eq!(state.native_temperature, 21.5);
        assert_eq!(state.humidity, 54);
        assert_eq!(state.forecast.map(|f| f.len()), Some(1));
    }
}
