//! OpenWeatherMap current-weather client

use std::time::Instant;

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::WeatherData;
use crate::{RecommenderError, Result, http};

/// `/weather` response, reduced to the fields we use
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    wind: Option<WindBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f32,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    main: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f32,
}

impl From<CurrentWeatherResponse> for WeatherData {
    fn from(response: CurrentWeatherResponse) -> Self {
        let conditions = response
            .weather
            .first()
            .map(|c| c.main.to_lowercase())
            .unwrap_or_else(|| "clear".to_string());
        Self {
            temperature: response.main.temp,
            conditions,
            humidity: response.main.humidity,
            wind_speed: response.wind.map(|w| w.speed).unwrap_or_default(),
        }
    }
}

pub struct OpenWeatherMapClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherMapClient {
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let client = http::retrying_client(
            concat!("travel-recommender/", env!("CARGO_PKG_VERSION")),
            config.timeout_seconds,
            config.max_retries,
        )?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn current(&self, lat: f64, lon: f64) -> Result<Option<WeatherData>> {
        let Some(api_key) = &self.api_key else {
            debug!("No weather API key configured, skipping lookup");
            return Ok(None);
        };
        let start_time = Instant::now();

        let url = format!(
            "{}/weather?lat={lat}&lon={lon}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(api_key)
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            RecommenderError::weather(format!("Request to weather service failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather service answered {} for ({:.4}, {:.4})", status, lat, lon);
            return Ok(None);
        }

        let body: CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|e| RecommenderError::weather(format!("Invalid weather response: {e}")))?;
        let weather = WeatherData::from(body);

        info!(
            "Retrieved current weather ({}, {}) in {:.3}s",
            weather.format_temperature(),
            weather.conditions,
            start_time.elapsed().as_secs_f64()
        );
        Ok(Some(weather))
    }
}
