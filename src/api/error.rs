use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::RecommenderError;

/// Error returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Domain(#[from] RecommenderError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error body in the shape the form expects
#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    message: String,
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Domain(err) => {
                let status = match err {
                    RecommenderError::Validation { .. } => StatusCode::BAD_REQUEST,
                    RecommenderError::NotFound { .. } => StatusCode::NOT_FOUND,
                    RecommenderError::Geocoding { .. } | RecommenderError::Weather { .. } => {
                        tracing::error!("Upstream error: {}", err);
                        StatusCode::BAD_GATEWAY
                    }
                    _ => {
                        tracing::error!("Internal error: {}", err);
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.user_message())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = Json(ErrorResponse {
            status: "error",
            message,
        });
        (status, body).into_response()
    }
}
