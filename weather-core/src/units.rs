use serde::Serialize;

/// Units the entity reports its native values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeUnits {
    pub precipitation: &'static str,
    pub pressure: &'static str,
    pub temperature: &'static str,
    pub visibility: &'static str,
    pub wind_speed: &'static str,
}

impl NativeUnits {
    /// Values are always read from the vendor's `Metric` block.
    pub const METRIC: NativeUnits = NativeUnits {
        precipitation: "mm",
        pressure: "hPa",
        temperature: "°C",
        visibility: "km",
        wind_speed: "km/h",
    };
}
