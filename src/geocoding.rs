//! Geocoding of free-form addresses
//!
//! Resolves the location string typed into the form into coordinates via a
//! Nominatim-compatible search API, optionally backed by the persistent cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::cache::{self, PersistentCache};
use crate::config::GeocodingConfig;
use crate::models::Location;
use crate::{RecommenderError, Result, http};

/// Something that can turn an address into coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `address`; `Ok(None)` when nothing matches.
    async fn geocode(&self, address: &str) -> Result<Option<Location>>;
}

/// Single hit of the Nominatim `/search` endpoint
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl TryFrom<NominatimPlace> for Location {
    type Error = RecommenderError;

    fn try_from(place: NominatimPlace) -> Result<Self> {
        let lat = place.lat.parse::<f64>().map_err(|_| {
            RecommenderError::geocoding(format!("Invalid latitude '{}'", place.lat))
        })?;
        let lon = place.lon.parse::<f64>().map_err(|_| {
            RecommenderError::geocoding(format!("Invalid longitude '{}'", place.lon))
        })?;
        Ok(Location::new(lat, lon, place.display_name))
    }
}

pub struct NominatimGeocoder {
    client: ClientWithMiddleware,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocodingConfig) -> anyhow::Result<Self> {
        let client =
            http::retrying_client(&config.user_agent, config.timeout_seconds, config.max_retries)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<Location>> {
        let address = normalize_address(address)?;
        let start_time = Instant::now();

        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(address)
        );
        debug!("Nominatim request URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            RecommenderError::geocoding(format!("Request to geocoding service failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding service answered {} for '{}'", status, address);
            return Err(RecommenderError::geocoding(format!(
                "Geocoding service returned HTTP {status}"
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            RecommenderError::geocoding(format!("Invalid geocoding response: {e}"))
        })?;

        let Some(place) = places.into_iter().next() else {
            warn!("No results found for location '{}'", address);
            return Ok(None);
        };

        let location = Location::try_from(place)?;
        info!(
            "Geocoded '{}' to ({:.4}, {:.4}) in {:.3}s",
            address,
            location.lat,
            location.lon,
            start_time.elapsed().as_secs_f64()
        );
        Ok(Some(location))
    }
}

/// Trimmed address, rejecting blank input before any request is made.
pub fn normalize_address(address: &str) -> Result<&str> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(RecommenderError::validation("Location cannot be empty"));
    }
    Ok(trimmed)
}

/// Caches geocoding answers, including misses
pub struct CachedGeocoder {
    inner: Arc<dyn Geocoder>,
    cache: PersistentCache,
    ttl: Duration,
}

impl CachedGeocoder {
    pub fn new(inner: Arc<dyn Geocoder>, cache: PersistentCache, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    fn cache_key(address: &str) -> String {
        format!("geocode:{}", address.to_lowercase())
    }
}

#[async_trait]
impl Geocoder for CachedGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Location>> {
        let address = normalize_address(address)?;
        let key = Self::cache_key(address);

        match self.cache.get::<Option<Location>>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!("Geocoding cache read failed: {e:#}"),
        }

        let location = self.inner.geocode(address).await?;

        if let Err(e) = self
            .cache
            .put(&key, location.clone(), cache::jittered(self.ttl))
            .await
        {
            warn!("Geocoding cache write failed: {e:#}");
        }
        Ok(location)
    }
}
