//! Error types and handling for the travel recommender

use thiserror::Error;

/// Main error type for the travel recommender
#[derive(Error, Debug)]
pub enum RecommenderError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Geocoding service errors
    #[error("Geocoding error: {message}")]
    Geocoding { message: String },

    /// Weather service errors
    #[error("Weather error: {message}")]
    Weather { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// A requested resource does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Non-2xx answer from the recommendation API, message as sent by the server
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl RecommenderError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new geocoding error
    pub fn geocoding<S: Into<String>>(message: S) -> Self {
        Self::Geocoding {
            message: message.into(),
        }
    }

    /// Create a new weather error
    pub fn weather<S: Into<String>>(message: S) -> Self {
        Self::Weather {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn rejected<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RecommenderError::Config { message } => {
                format!("Configuration error: {message}")
            }
            RecommenderError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            RecommenderError::Geocoding { .. } => {
                "Unable to reach the geocoding service. Please try again later.".to_string()
            }
            RecommenderError::Weather { .. } => {
                "Unable to reach the weather service. Please try again later.".to_string()
            }
            RecommenderError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            RecommenderError::NotFound { message }
            | RecommenderError::Rejected { message, .. } => message.clone(),
            RecommenderError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            RecommenderError::General { message } => message.clone(),
        }
    }
}

impl From<reqwest_middleware::Error> for RecommenderError {
    fn from(err: reqwest_middleware::Error) -> Self {
        Self::general(format!("HTTP request failed: {err}"))
    }
}

impl From<reqwest::Error> for RecommenderError {
    fn from(err: reqwest::Error) -> Self {
        Self::general(format!("HTTP request failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = RecommenderError::config("empty catalog");
        assert!(matches!(config_err, RecommenderError::Config { .. }));

        let geo_err = RecommenderError::geocoding("connection failed");
        assert!(matches!(geo_err, RecommenderError::Geocoding { .. }));

        let validation_err = RecommenderError::validation("invalid coordinates");
        assert!(matches!(validation_err, RecommenderError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = RecommenderError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let geo_err = RecommenderError::geocoding("timeout after 10s");
        assert!(geo_err.user_message().contains("Unable to reach"));
        assert!(!geo_err.user_message().contains("timeout after"));

        let validation_err = RecommenderError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let missing = RecommenderError::not_found("Could not find location");
        assert_eq!(missing.user_message(), "Could not find location");

        let rejected = RecommenderError::rejected(400, "Invalid input: bad latitude");
        assert_eq!(rejected.user_message(), "Invalid input: bad latitude");
        assert_eq!(rejected.to_string(), "HTTP 400: Invalid input: bad latitude");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RecommenderError = io_err.into();
        assert!(matches!(err, RecommenderError::Io { .. }));
    }
}
