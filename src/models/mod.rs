//! Data models for the travel recommender
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and the resolved address
//! - Weather: Current conditions used for scoring
//! - Destination: Catalog entries and their attribute vocabularies
//! - Preferences / Recommendation: What the form sends and receives

pub mod destination;
pub mod location;
pub mod preferences;
pub mod recommendation;
pub mod weather;

// Re-export all public types for convenient access
pub use destination::{BudgetLevel, Climate, Destination, DestinationType, Season};
pub use location::Location;
pub use preferences::{TypePreference, UserPreferences};
pub use recommendation::{Recommendation, ScoreBreakdown};
pub use weather::WeatherData;
