//! Client for the recommendation API, as used by the form

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::api::{RecommendationRequest, RecommendationResponse};
use crate::models::{Location, Recommendation, UserPreferences};
use crate::{RecommenderError, Result};

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("travel-recommender/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `GET /api/location`
    #[instrument(skip(self))]
    pub async fn locate(&self, address: &str) -> Result<Location> {
        let url = format!(
            "{}/api/location?address={}",
            self.base_url,
            urlencoding::encode(address)
        );
        debug!("Requesting {}", url);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RecommenderError::not_found("Could not find location"));
        }
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// `POST /api/recommendations`
    #[instrument(skip_all)]
    pub async fn recommendations(
        &self,
        preferences: &UserPreferences,
        location: &Location,
    ) -> Result<Vec<Recommendation>> {
        let url = format!("{}/api/recommendations", self.base_url);
        let request = RecommendationRequest {
            preferences: preferences.clone(),
            location: Some(location.clone()),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        let response = Self::check(response).await?;
        let body: RecommendationResponse = response.json().await?;
        Ok(body.recommendations)
    }

    /// Turns a non-2xx answer into an error carrying the server's message
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => format!("Request failed with HTTP {status}"),
        };
        Err(RecommenderError::rejected(status.as_u16(), message))
    }
}
