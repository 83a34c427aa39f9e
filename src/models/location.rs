//! Location model for geographic coordinates and metadata

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

use crate::RecommenderError;

/// A geocoded location as exchanged with the form
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Resolved display address
    #[serde(default)]
    pub address: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(lat: f64, lon: f64, address: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            address: address.into(),
        }
    }

    /// Reject coordinates outside the WGS84 range
    pub fn validate(&self) -> crate::Result<()> {
        validate_coordinates(self.lat, self.lon)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }

    /// Round coordinates for cache key generation
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        round_coordinates(self.lat, self.lon, precision)
    }

    /// Great-circle distance in kilometers
    #[must_use]
    pub fn distance_km(&self, lat: f64, lon: f64) -> f64 {
        let from = HaversineLocation {
            latitude: self.lat,
            longitude: self.lon,
        };
        let to = HaversineLocation {
            latitude: lat,
            longitude: lon,
        };
        distance(from, to, Units::Kilometers)
    }
}

pub fn validate_coordinates(lat: f64, lon: f64) -> crate::Result<()> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(RecommenderError::validation(format!(
            "Latitude must be between -90 and 90, got {lat}"
        )));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(RecommenderError::validation(format!(
            "Longitude must be between -180 and 180, got {lon}"
        )));
    }
    Ok(())
}

#[must_use]
pub fn round_coordinates(lat: f64, lon: f64, precision: u32) -> (f64, f64) {
    let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
    let lat = (lat * multiplier).round() / multiplier;
    let lon = (lon * multiplier).round() / multiplier;
    (lat, lon)
}
