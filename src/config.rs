//! Configuration management for the travel recommender
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::RecommenderError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Geocoding API configuration
    pub geocoding: GeocodingConfig,
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Scoring and catalog settings
    pub recommender: ScoringConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with a built front end, served for non-API paths
    pub static_dir: Option<String>,
    pub request_timeout_seconds: u32,
    pub body_limit_kb: u32,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
}

/// Geocoding API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Base URL of a Nominatim-compatible search API
    pub base_url: String,
    /// Nominatim requires an identifying User-Agent
    pub user_agent: String,
    pub timeout_seconds: u32,
    pub max_retries: u32,
    pub cache_ttl_hours: u32,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; without it weather is treated as unknown
    pub api_key: Option<String>,
    /// Base URL for weather API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    pub max_retries: u32,
    pub cache_ttl_minutes: u32,
}

/// Scoring settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Maximum number of recommendations to return
    pub max_results: usize,
    /// JSON file with an array of destinations, replacing the built-in catalog
    pub catalog_path: Option<String>,
    pub weights: ScoringWeights,
}

/// Weights of the individual score components; must sum to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub season: f64,
    pub weather: f64,
    pub preference: f64,
    pub popularity: f64,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Cache directory location
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
    /// OTLP/HTTP endpoint for span export, disabled when unset
    pub otlp_endpoint: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u32 {
    30
}

fn default_body_limit_kb() -> u32 {
    64
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    concat!("travel-recommender/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_geocoding_ttl() -> u32 {
    24 * 7
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_weather_ttl() -> u32 {
    60
}

fn default_max_results() -> usize {
    5
}

fn default_cache_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("travel-recommender"))
        .unwrap_or_else(|| PathBuf::from(".cache/travel-recommender"))
        .to_string_lossy()
        .into_owned()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            request_timeout_seconds: default_request_timeout(),
            body_limit_kb: default_body_limit_kb(),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            cache_ttl_hours: default_geocoding_ttl(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            cache_ttl_minutes: default_weather_ttl(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            catalog_path: None,
            weights: ScoringWeights::default(),
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            season: 0.3,
            weather: 0.3,
            preference: 0.2,
            popularity: 0.2,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl ScoringWeights {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.season + self.weather + self.preference + self.popularity
    }
}

impl RecommenderConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. TRAVEL_RECOMMENDER_SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("TRAVEL_RECOMMENDER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: RecommenderConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.weather.api_key.is_none() {
            config.weather.api_key = std::env::var("OPENWEATHERMAP_API_KEY").ok();
        }

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travel-recommender").join("config.toml"))
    }

    /// Apply default values to zeroed or empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.server.body_limit_kb == 0 {
            self.server.body_limit_kb = default_body_limit_kb();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.user_agent.is_empty() {
            self.geocoding.user_agent = default_user_agent();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_timeout();
        }
        if self.geocoding.cache_ttl_hours == 0 {
            self.geocoding.cache_ttl_hours = default_geocoding_ttl();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_timeout();
        }
        if self.weather.cache_ttl_minutes == 0 {
            self.weather.cache_ttl_minutes = default_weather_ttl();
        }
        if self.weather.api_key.as_deref().is_some_and(str::is_empty) {
            self.weather.api_key = None;
        }
        if self.recommender.max_results == 0 {
            self.recommender.max_results = default_max_results();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_weights()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(RecommenderError::config("Server port cannot be 0").into());
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                RecommenderError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.geocoding.timeout_seconds > 300 || self.weather.timeout_seconds > 300 {
            return Err(
                RecommenderError::config("Upstream API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.geocoding.max_retries > 10 || self.weather.max_retries > 10 {
            return Err(RecommenderError::config("Upstream API max retries cannot exceed 10").into());
        }

        if self.recommender.max_results > 100 {
            return Err(RecommenderError::config("Maximum results cannot exceed 100").into());
        }

        Ok(())
    }

    fn validate_weights(&self) -> Result<()> {
        let weights = &self.recommender.weights;
        let all = [
            weights.season,
            weights.weather,
            weights.preference,
            weights.popularity,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(
                RecommenderError::config("Scoring weights must be non-negative numbers").into(),
            );
        }
        if (weights.sum() - 1.0).abs() > 1e-6 {
            return Err(RecommenderError::config(format!(
                "Scoring weights must sum to 1.0, got {:.3}",
                weights.sum()
            ))
            .into());
        }
        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RecommenderError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RecommenderError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Weather", &self.weather.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(RecommenderError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.server.tls_cert_path.is_some() != self.server.tls_key_path.is_some() {
            return Err(RecommenderError::config(
                "TLS requires both tls_cert_path and tls_key_path",
            )
            .into());
        }

        Ok(())
    }
}
