//! Current weather model and display methods

use serde::{Deserialize, Serialize};

/// Current conditions at a location, in metric units
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherData {
    /// Temperature in Celsius
    pub temperature: f32,
    /// Lowercase main condition, e.g. "clear", "clouds", "rain"
    pub conditions: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f32,
}

impl WeatherData {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }
}
