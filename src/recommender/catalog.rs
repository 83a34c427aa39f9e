//! Destination catalog loading

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::models::{BudgetLevel, Climate, Destination, DestinationType, Season};
use crate::{RecommenderError, Result};

/// Catalog shipped with the binary
#[must_use]
pub fn builtin_destinations() -> Vec<Destination> {
    vec![
        Destination {
            id: 1,
            name: "Bali, Indonesia".to_string(),
            kind: DestinationType::Beach,
            climate: Climate::Tropical,
            activities: vec![
                "surfing".to_string(),
                "yoga".to_string(),
                "temple_visits".to_string(),
            ],
            best_season: Season::Summer,
            budget_level: BudgetLevel::Medium,
            popularity: 0.9,
            latitude: Some(-8.3405),
            longitude: Some(115.0920),
        },
        Destination {
            id: 2,
            name: "Paris, France".to_string(),
            kind: DestinationType::City,
            climate: Climate::Temperate,
            activities: vec![
                "museums".to_string(),
                "shopping".to_string(),
                "dining".to_string(),
            ],
            best_season: Season::Spring,
            budget_level: BudgetLevel::High,
            popularity: 0.95,
            latitude: Some(48.8566),
            longitude: Some(2.3522),
        },
        Destination {
            id: 3,
            name: "Kyoto, Japan".to_string(),
            kind: DestinationType::Cultural,
            climate: Climate::Temperate,
            activities: vec![
                "temples".to_string(),
                "gardens".to_string(),
                "tea_ceremony".to_string(),
            ],
            best_season: Season::Spring,
            budget_level: BudgetLevel::Medium,
            popularity: 0.85,
            latitude: Some(35.0116),
            longitude: Some(135.7681),
        },
    ]
}

/// Reads a JSON array of destinations from `path`
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<Destination>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let destinations: Vec<Destination> = serde_json::from_str(&content).map_err(|e| {
        RecommenderError::config(format!("Invalid catalog {}: {e}", path.display()))
    })?;

    validate(&destinations)?;
    info!("Loaded {} destinations from {}", destinations.len(), path.display());
    Ok(destinations)
}

pub fn validate(destinations: &[Destination]) -> Result<()> {
    if destinations.is_empty() {
        return Err(RecommenderError::config("Destination catalog is empty"));
    }

    let mut seen = HashSet::new();
    for destination in destinations {
        if !seen.insert(destination.id) {
            return Err(RecommenderError::config(format!(
                "Duplicate destination id {}",
                destination.id
            )));
        }
        if !(0.0..=1.0).contains(&destination.popularity) {
            return Err(RecommenderError::config(format!(
                "Popularity of '{}' must be between 0 and 1",
                destination.name
            )));
        }
    }
    Ok(())
}
