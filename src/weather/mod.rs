//! Current weather lookup used to score destinations

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::Result;
use crate::cache::{self, PersistentCache};
use crate::models::WeatherData;
use crate::models::location::{round_coordinates, validate_coordinates};

pub mod openweathermap;

pub use openweathermap::OpenWeatherMapClient;

/// Source of current conditions at a coordinate
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// `Ok(None)` when conditions are unknown (no key, upstream refused).
    async fn current(&self, lat: f64, lon: f64) -> Result<Option<WeatherData>>;
}

/// Caches current weather on a ~1 km grid
pub struct CachedWeather {
    inner: Arc<dyn WeatherProvider>,
    cache: PersistentCache,
    ttl: Duration,
}

impl CachedWeather {
    pub fn new(inner: Arc<dyn WeatherProvider>, cache: PersistentCache, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    #[must_use]
    pub fn cache_key(lat: f64, lon: f64) -> String {
        let (lat, lon) = round_coordinates(lat, lon, 2);
        format!("weather:{lat:.2}:{lon:.2}")
    }
}

#[async_trait]
impl WeatherProvider for CachedWeather {
    async fn current(&self, lat: f64, lon: f64) -> Result<Option<WeatherData>> {
        validate_coordinates(lat, lon)?;
        let key = Self::cache_key(lat, lon);

        match self.cache.get::<WeatherData>(&key).await {
            Ok(Some(cached)) => return Ok(Some(cached)),
            Ok(None) => {}
            Err(e) => warn!("Weather cache read failed: {e:#}"),
        }

        let weather = self.inner.current(lat, lon).await?;

        // only known conditions are cached
        if let Some(weather) = &weather {
            if let Err(e) = self
                .cache
                .put(&key, weather.clone(), cache::jittered(self.ttl))
                .await
            {
                warn!("Weather cache write failed: {e:#}");
            }
        }
        Ok(weather)
    }
}
