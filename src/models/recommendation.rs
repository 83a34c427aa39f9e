//! Scored destinations returned to the form

use serde::{Deserialize, Serialize};

use super::destination::Destination;

/// Individual score components, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub season: f64,
    pub weather: f64,
    pub preference: f64,
    pub popularity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub destination: Destination,
    /// Weighted match score in [0, 1]
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    /// Distance from the requested location, when both ends have coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl Recommendation {
    /// Match score as shown on the result card, e.g. "87.5%"
    #[must_use]
    pub fn format_score(&self) -> String {
        format!("{:.1}%", self.score * 100.0)
    }
}
