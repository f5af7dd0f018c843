//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::engine::QuizError;
use quiz_core::model::{SettingsError, StatisticsKey};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `StatisticsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatisticsError {
    #[error("stored value for {key} is corrupt")]
    Corrupt { key: StatisticsKey },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while loading questions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("movies endpoint is not configured")]
    NotConfigured,
    #[error("movies request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("movies API error: {0}")]
    Api(String),
    #[error("need {required} movies for a round but only {available} are available")]
    NotEnoughMovies { available: usize, required: usize },
    #[error("no questions available")]
    Empty,
}

/// Errors emitted by `QuizGameService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error("no round has been started")]
    NotStarted,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
}

/// Errors emitted while bootstrapping quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Load(#[from] LoadError),
}
