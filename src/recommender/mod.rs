//! Destination ranking
//!
//! Combines season, current weather at the traveller's location, the
//! preferred trip type and destination popularity into a single match score.

pub mod catalog;
pub mod scoring;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::Result;
use crate::config::ScoringConfig;
use crate::config::ScoringWeights;
use crate::models::{Destination, Location, Recommendation, Season, UserPreferences, WeatherData};

pub struct TravelRecommender {
    destinations: Vec<Destination>,
    weights: ScoringWeights,
    max_results: usize,
}

impl TravelRecommender {
    pub fn new(
        destinations: Vec<Destination>,
        weights: ScoringWeights,
        max_results: usize,
    ) -> Result<Self> {
        catalog::validate(&destinations)?;
        Ok(Self {
            destinations,
            weights,
            max_results,
        })
    }

    /// Builds the recommender from config, reading the catalog file if one is set
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let destinations = match &config.catalog_path {
            Some(path) => catalog::load_from_file(path)?,
            None => catalog::builtin_destinations(),
        };
        Self::new(destinations, config.weights, config.max_results)
    }

    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Ranks the catalog for a traveller, best match first.
    ///
    /// Ties keep catalog order. At most `max_results` entries are returned.
    #[must_use]
    pub fn recommend(
        &self,
        preferences: &UserPreferences,
        weather: Option<&WeatherData>,
        origin: Option<&Location>,
        today: NaiveDate,
    ) -> Vec<Recommendation> {
        let season = Season::from_month(today.month());
        debug!("Scoring {} destinations for {}", self.destinations.len(), season);

        let mut recommendations: Vec<Recommendation> = self
            .destinations
            .iter()
            .map(|destination| {
                let breakdown = scoring::breakdown(destination, preferences, weather, season);
                let distance_km = origin
                    .zip(destination.coordinates())
                    .map(|(from, (lat, lon))| from.distance_km(lat, lon));
                Recommendation {
                    destination: destination.clone(),
                    score: scoring::combine(&breakdown, &self.weights),
                    breakdown,
                    distance_km,
                }
            })
            .collect();

        recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
        recommendations.truncate(self.max_results);
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DestinationType, TypePreference};

    fn recommender(max_results: usize) -> TravelRecommender {
        TravelRecommender::new(
            catalog::builtin_destinations(),
            ScoringWeights::default(),
            max_results,
        )
        .unwrap()
    }

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 15).unwrap()
    }

    fn names(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.destination.name.as_str()).collect()
    }

    #[test]
    fn test_spring_without_preferences() {
        let recs = recommender(5).recommend(&UserPreferences::default(), None, None, date(4));
        // Paris: 0.3 + 0.15 + 0.1 + 0.19 = 0.74, Kyoto: 0.72, Bali: 0.15+0.15+0.1+0.18 = 0.58
        assert_eq!(names(&recs), ["Paris, France", "Kyoto, Japan", "Bali, Indonesia"]);
        assert!((recs[0].score - 0.74).abs() < 1e-9);
        assert!((recs[1].score - 0.72).abs() < 1e-9);
        assert!((recs[2].score - 0.58).abs() < 1e-9);
    }

    #[test]
    fn test_preferred_type_reorders() {
        let prefs = UserPreferences {
            preferred_type: TypePreference::Kind(DestinationType::Beach),
            ..UserPreferences::default()
        };
        let sunny = WeatherData {
            temperature: 25.0,
            conditions: "clear".to_string(),
            humidity: 40,
            wind_speed: 2.0,
        };
        let recs = recommender(5).recommend(&prefs, Some(&sunny), None, date(7));
        assert_eq!(recs[0].destination.name, "Bali, Indonesia");
        // 0.3 + 0.3 + 0.2 + 0.18
        assert!((recs[0].score - 0.98).abs() < 1e-9);
        assert_eq!(recs[0].breakdown.weather, 1.0);
    }

    #[test]
    fn test_results_are_truncated() {
        let recs = recommender(2).recommend(&UserPreferences::default(), None, None, date(4));
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let mut destinations = catalog::builtin_destinations();
        for d in &mut destinations {
            d.popularity = 0.5;
            d.best_season = Season::Winter;
        }
        let recommender =
            TravelRecommender::new(destinations, ScoringWeights::default(), 5).unwrap();
        let recs = recommender.recommend(&UserPreferences::default(), None, None, date(1));
        assert_eq!(names(&recs), ["Bali, Indonesia", "Paris, France", "Kyoto, Japan"]);
    }

    #[test]
    fn test_distance_from_origin() {
        let origin = Location::new(48.8566, 2.3522, "Paris");
        let recs =
            recommender(5).recommend(&UserPreferences::default(), None, Some(&origin), date(4));
        let paris = recs
            .iter()
            .find(|r| r.destination.id == 2)
            .and_then(|r| r.distance_km)
            .unwrap();
        assert!(paris < 0.001);
        assert!(recs.iter().all(|r| r.distance_km.is_some()));

        let without = recommender(5).recommend(&UserPreferences::default(), None, None, date(4));
        assert!(without.iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn test_scores_stay_in_unit_range() {
        let recs = recommender(5).recommend(&UserPreferences::default(), None, None, date(10));
        assert!(recs.iter().all(|r| (0.0..=1.0).contains(&r.score)));
    }
}
