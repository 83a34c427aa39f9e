//! Travel recommender - weather-aware destination recommendations
//!
//! This library provides geocoding of free-form locations, current weather
//! lookup, destination scoring, the HTTP API serving the recommendation form,
//! and a client that drives the same form flow from the terminal.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod http;
pub mod models;
pub mod recommender;
pub mod telemetry;
pub mod ui;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use cache::PersistentCache;
pub use client::BackendClient;
pub use config::RecommenderConfig;
pub use error::RecommenderError;
pub use geocoding::{Geocoder, NominatimGeocoder};
pub use models::{Destination, Location, Recommendation, UserPreferences, WeatherData};
pub use recommender::TravelRecommender;
pub use weather::{OpenWeatherMapClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RecommenderError>;
