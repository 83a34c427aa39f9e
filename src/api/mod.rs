//! HTTP API consumed by the recommendation form

mod error;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::Json,
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    cache::PersistentCache,
    config::RecommenderConfig,
    geocoding::{CachedGeocoder, Geocoder, NominatimGeocoder},
    models::location::validate_coordinates,
    models::{Destination, Location, Recommendation, UserPreferences, WeatherData},
    recommender::TravelRecommender,
    weather::{CachedWeather, OpenWeatherMapClient, WeatherProvider},
};

pub use error::ApiError;

/// Shared state of all handlers
#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherProvider>,
    pub recommender: Arc<TravelRecommender>,
}

impl AppState {
    /// Wires the upstream clients, wrapped in the persistent cache when it is enabled
    pub fn from_config(config: &RecommenderConfig) -> anyhow::Result<Self> {
        let recommender = TravelRecommender::from_config(&config.recommender)
            .context("Failed to load destination catalog")?;

        let mut geocoder: Arc<dyn Geocoder> =
            Arc::new(NominatimGeocoder::new(&config.geocoding)?);
        let mut weather: Arc<dyn WeatherProvider> =
            Arc::new(OpenWeatherMapClient::new(&config.weather)?);

        if config.cache.enabled {
            let cache = PersistentCache::open(&config.cache.location).with_context(|| {
                format!("Failed to open cache database at {}", config.cache.location)
            })?;
            geocoder = Arc::new(CachedGeocoder::new(
                geocoder,
                cache.clone(),
                Duration::from_secs(u64::from(config.geocoding.cache_ttl_hours) * 3600),
            ));
            weather = Arc::new(CachedWeather::new(
                weather,
                cache,
                Duration::from_secs(u64::from(config.weather.cache_ttl_minutes) * 60),
            ));
        }

        if config.weather.api_key.is_none() {
            warn!("No weather API key configured; weather will not affect scores");
        }

        Ok(Self {
            geocoder,
            weather,
            recommender: Arc::new(recommender),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub status: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub status: String,
    pub weather: Option<WeatherData>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DestinationsResponse {
    pub status: String,
    pub destinations: Vec<Destination>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

const SUCCESS: &str = "success";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/location", get(get_location))
        .route("/weather", get(get_weather))
        .route("/recommendations", post(get_recommendations))
        .route("/destinations", get(get_destinations))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[instrument(skip(state))]
async fn get_location(
    State(state): State<AppState>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Json<Location>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let address = query
        .address
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Address is required".to_string()))?;

    match state.geocoder.geocode(&address).await? {
        Some(location) => Ok(Json(location)),
        None => Err(ApiError::NotFound("Could not find location".to_string())),
    }
}

#[instrument(skip(state))]
async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let Query(query) = query.map_err(|_| {
        ApiError::BadRequest("Latitude and longitude must be numbers".to_string())
    })?;
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Err(ApiError::BadRequest(
            "Latitude and longitude are required".to_string(),
        ));
    };
    validate_coordinates(lat, lon)?;

    let weather = state.weather.current(lat, lon).await?;
    Ok(Json(WeatherResponse {
        status: SUCCESS.to_string(),
        weather,
    }))
}

#[instrument(skip_all)]
async fn get_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if let Some(location) = &request.location {
        location.validate()?;
    }

    let weather = match &request.location {
        Some(location) => match state.weather.current(location.lat, location.lon).await {
            Ok(weather) => weather,
            Err(e) => {
                warn!("Scoring without weather: {e}");
                None
            }
        },
        None => None,
    };

    let recommendations = state.recommender.recommend(
        &request.preferences,
        weather.as_ref(),
        request.location.as_ref(),
        Utc::now().date_naive(),
    );

    info!(
        "Returning {} recommendations (weather known: {})",
        recommendations.len(),
        weather.is_some()
    );

    Ok(Json(RecommendationResponse {
        status: SUCCESS.to_string(),
        recommendations,
    }))
}

async fn get_destinations(State(state): State<AppState>) -> Json<DestinationsResponse> {
    Json(DestinationsResponse {
        status: SUCCESS.to_string(),
        destinations: state.recommender.destinations().to_vec(),
    })
}
