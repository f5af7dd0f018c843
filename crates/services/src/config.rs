use std::env;

use quiz_core::model::{QuizSettings, QuizSettingsDraft, SettingsError};

pub const DEFAULT_DB_URL: &str = "sqlite:movie_quiz.sqlite3";

/// Runtime configuration assembled from the environment.
#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub db_url: String,
    pub settings: QuizSettings,
}

impl QuizConfig {
    /// Read `MOVIE_QUIZ_DB_URL`, `MOVIE_QUIZ_API_URL`, `MOVIE_QUIZ_API_KEY`
    /// and `MOVIE_QUIZ_ROUND_LENGTH`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the API URL or round length is invalid.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`QuizConfig::from_env`] with an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the API URL or round length is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let db_url = lookup("MOVIE_QUIZ_DB_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.into());

        let round_length = match lookup("MOVIE_QUIZ_ROUND_LENGTH") {
            None => None,
            Some(raw) => Some(
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| SettingsError::InvalidRoundLength)?,
            ),
        };

        let settings = QuizSettingsDraft {
            api_base_url: lookup("MOVIE_QUIZ_API_URL"),
            api_key: lookup("MOVIE_QUIZ_API_KEY"),
            round_length,
        }
        .validate()?;

        Ok(Self { db_url, settings })
    }
}
