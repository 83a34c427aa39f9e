//! Score components for a single destination

use crate::config::ScoringWeights;
use crate::models::{
    Destination, ScoreBreakdown, Season, TypePreference, UserPreferences, WeatherData,
};

/// Score used when a component has nothing to judge by
pub const NEUTRAL_SCORE: f64 = 0.5;

const COMFORTABLE_TEMPERATURE: std::ops::RangeInclusive<f32> = 15.0..=30.0;
const FAIR_CONDITIONS: [&str; 2] = ["clear", "partly_cloudy"];

/// 1.0 when travelling in the destination's best season, otherwise 0.5
#[must_use]
pub fn season_score(destination: &Destination, current: Season) -> f64 {
    if destination.best_season == current {
        1.0
    } else {
        0.5
    }
}

/// Mean of a temperature score and a sky-conditions score
#[must_use]
pub fn weather_score(weather: Option<&WeatherData>) -> f64 {
    let Some(weather) = weather else {
        return NEUTRAL_SCORE;
    };

    let temp_score = if COMFORTABLE_TEMPERATURE.contains(&weather.temperature) {
        1.0
    } else {
        0.5
    };
    let conditions_score = if FAIR_CONDITIONS.contains(&weather.conditions.as_str()) {
        1.0
    } else {
        0.7
    };

    (temp_score + conditions_score) / 2.0
}

/// Neutral only when no preference was sent; a blank choice counts as a mismatch
#[must_use]
pub fn preference_score(destination: &Destination, preferences: &UserPreferences) -> f64 {
    match preferences.preferred_type {
        TypePreference::Unset => NEUTRAL_SCORE,
        TypePreference::Kind(kind) if kind == destination.kind => 1.0,
        TypePreference::Kind(_) | TypePreference::Blank => 0.3,
    }
}

#[must_use]
pub fn breakdown(
    destination: &Destination,
    preferences: &UserPreferences,
    weather: Option<&WeatherData>,
    current: Season,
) -> ScoreBreakdown {
    ScoreBreakdown {
        season: season_score(destination, current),
        weather: weather_score(weather),
        preference: preference_score(destination, preferences),
        popularity: destination.popularity,
    }
}

/// Weighted sum of the components
#[must_use]
pub fn combine(parts: &ScoreBreakdown, weights: &ScoringWeights) -> f64 {
    parts.season * weights.season
        + parts.weather * weights.weather
        + parts.preference * weights.preference
        + parts.popularity * weights.popularity
}
