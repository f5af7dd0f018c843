use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use quiz_core::model::QuizSettings;

use crate::error::LoadError;

/// One entry of the movies catalogue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub title: String,
    #[serde(rename = "imDbRating", deserialize_with = "rating_from_text")]
    pub rating: f32,
    #[serde(rename = "image")]
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
struct MoviesResponse {
    #[serde(default)]
    items: Vec<Movie>,
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
}

/// HTTP client for the movies catalogue and poster images.
#[derive(Clone, Debug)]
pub struct MoviesClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MoviesClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// # Errors
    ///
    /// Returns `LoadError::NotConfigured` when the settings carry no base URL.
    pub fn from_settings(settings: &QuizSettings) -> Result<Self, LoadError> {
        let base_url = settings.api_base_url().ok_or(LoadError::NotConfigured)?;
        Ok(Self::new(base_url, settings.api_key().map(str::to_owned)))
    }

    /// Fetch the full catalogue.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` on transport failures, non-success statuses, or an
    /// error message reported in the response body.
    pub async fn fetch_movies(&self) -> Result<Vec<Movie>, LoadError> {
        let url = format!("{}/movies", self.base_url.trim_end_matches('/'));
        let mut request = self.client.get(url);
        if let Some(key) = self.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(LoadError::HttpStatus(response.status()));
        }

        let body: MoviesResponse = response.json().await?;
        if let Some(message) = body.error_message.filter(|m| !m.trim().is_empty()) {
            return Err(LoadError::Api(message));
        }
        debug!(count = body.items.len(), "fetched movies");
        Ok(body.items)
    }

    /// Download a poster.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` on transport failures or non-success statuses.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LoadError::HttpStatus(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

// Ratings arrive as text ("8.6") or occasionally as numbers; blanks count as 0.
fn rating_from_text<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f32),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(value) => value,
        Raw::Text(text) => text.trim().parse().unwrap_or(0.0),
    })
}
