//! Destination catalog entries and their attribute vocabularies

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RecommenderError;

/// Kind of trip a destination offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    Beach,
    City,
    Cultural,
    Mountain,
    Nature,
}

impl DestinationType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beach => "beach",
            Self::City => "city",
            Self::Cultural => "cultural",
            Self::Mountain => "mountain",
            Self::Nature => "nature",
        }
    }
}

impl FromStr for DestinationType {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beach" => Ok(Self::Beach),
            "city" => Ok(Self::City),
            "cultural" => Ok(Self::Cultural),
            "mountain" => Ok(Self::Mountain),
            "nature" => Ok(Self::Nature),
            other => Err(RecommenderError::validation(format!(
                "Unknown destination type '{other}'. Must be one of: beach, city, cultural, mountain, nature"
            ))),
        }
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Tropical,
    Temperate,
    Mediterranean,
    Arid,
    Continental,
    Polar,
}

impl Climate {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tropical => "tropical",
            Self::Temperate => "temperate",
            Self::Mediterranean => "mediterranean",
            Self::Arid => "arid",
            Self::Continental => "continental",
            Self::Polar => "polar",
        }
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Meteorological season (northern hemisphere month boundaries)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season for a calendar month (1-12)
    #[must_use]
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Self::Winter,
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            _ => Self::Fall,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Low,
    Medium,
    High,
}

impl BudgetLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for BudgetLevel {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(RecommenderError::validation(format!(
                "Unknown budget level '{other}'. Must be one of: low, medium, high"
            ))),
        }
    }
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A travel destination with the attributes used for scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DestinationType,
    pub climate: Climate,
    #[serde(default)]
    pub activities: Vec<String>,
    pub best_season: Season,
    pub budget_level: BudgetLevel,
    /// Relative popularity in [0, 1]
    pub popularity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Destination {
    /// Coordinates when both are known
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}
