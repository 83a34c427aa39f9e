//! Terminal rendition of the recommendation form
//!
//! Mirrors the form flow: capture preferences and a location, resolve the
//! location, request recommendations, then render one of the view states.

use std::fmt;

use tracing::debug;

use crate::client::BackendClient;
use crate::models::{Recommendation, TypePreference, UserPreferences};
use crate::{RecommenderError, Result};

/// What the user filled in
#[derive(Debug, Clone)]
pub struct TripForm {
    pub preferences: UserPreferences,
    pub location: String,
}

/// An untouched form still submits an empty type choice.
impl Default for TripForm {
    fn default() -> Self {
        Self {
            preferences: UserPreferences {
                preferred_type: TypePreference::Blank,
                ..UserPreferences::default()
            },
            location: String::new(),
        }
    }
}

impl TripForm {
    pub fn validate(&self) -> Result<()> {
        if self.location.trim().is_empty() {
            return Err(RecommenderError::validation("Location cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Failed(String),
    Loaded(Vec<Recommendation>),
}

/// Runs the two lookups in order and returns the resulting view state.
pub async fn submit(client: &BackendClient, form: &TripForm) -> ViewState {
    match fetch(client, form).await {
        Ok(recommendations) => ViewState::Loaded(recommendations),
        Err(e) => ViewState::Failed(e.user_message()),
    }
}

async fn fetch(client: &BackendClient, form: &TripForm) -> Result<Vec<Recommendation>> {
    form.validate()?;
    let location = client.locate(form.location.trim()).await?;
    debug!("Location resolved to {}", location.format_coordinates());
    client.recommendations(&form.preferences, &location).await
}

#[must_use]
pub fn render(state: &ViewState) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading => "Fetching recommendations...\n".to_string(),
        ViewState::Failed(message) => format!("Error: {message}\n"),
        ViewState::Loaded(recommendations) if recommendations.is_empty() => {
            "No recommendations found\n".to_string()
        }
        ViewState::Loaded(recommendations) => recommendations
            .iter()
            .map(|rec| Card(rec).to_string())
            .collect(),
    }
}

/// One recommendation as a block of text, followed by a blank line
struct Card<'a>(&'a Recommendation);

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rec = self.0;
        let d = &rec.destination;
        writeln!(f, "{}", d.name)?;
        writeln!(f, "  Type: {}", d.kind)?;
        writeln!(f, "  Climate: {}", d.climate)?;
        writeln!(f, "  Best Season: {}", d.best_season)?;
        writeln!(f, "  Budget Level: {}", d.budget_level)?;
        writeln!(f, "  Activities: {}", d.activities.join(", "))?;
        if let Some(km) = rec.distance_km {
            writeln!(f, "  Distance: {km:.0} km")?;
        }
        writeln!(f, "  Match Score: {}", rec.format_score())?;
        writeln!(f)
    }
}
