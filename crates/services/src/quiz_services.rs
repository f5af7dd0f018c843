use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::config::QuizConfig;
use crate::error::QuizServicesError;
use crate::game::QuizGameService;
use crate::loader::QuestionLoader;
use crate::movies::MoviesQuestionLoader;
use crate::statistics_service::StatisticsService;

/// Assembles the statistics store and question supply for a front end.
#[derive(Clone)]
pub struct QuizServices {
    round_length: usize,
    statistics: StatisticsService,
    loader: Arc<dyn QuestionLoader>,
}

impl QuizServices {
    /// Build services from the environment. See [`QuizConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns `QuizServicesError` if the configuration is invalid, the movies
    /// endpoint is not configured, or the database cannot be opened.
    pub async fn from_env(clock: Clock) -> Result<Self, QuizServicesError> {
        let config = QuizConfig::from_env()?;
        Self::from_config(&config, clock).await
    }

    /// Build `SQLite`-backed statistics and the network movie loader.
    ///
    /// # Errors
    ///
    /// Returns `QuizServicesError` if the movies endpoint is not configured or
    /// the database cannot be opened.
    pub async fn from_config(
        config: &QuizConfig,
        clock: Clock,
    ) -> Result<Self, QuizServicesError> {
        let loader = MoviesQuestionLoader::from_settings(&config.settings)?;
        let storage = Storage::sqlite(&config.db_url).await?;
        Ok(Self::new(
            &storage,
            clock,
            Arc::new(loader),
            config.settings.round_length(),
        ))
    }

    #[must_use]
    pub fn new(
        storage: &Storage,
        clock: Clock,
        loader: Arc<dyn QuestionLoader>,
        round_length: usize,
    ) -> Self {
        Self {
            round_length,
            statistics: StatisticsService::new(clock, Arc::clone(&storage.preferences)),
            loader,
        }
    }

    #[must_use]
    pub fn round_length(&self) -> usize {
        self.round_length
    }

    #[must_use]
    pub fn statistics(&self) -> StatisticsService {
        self.statistics.clone()
    }

    #[must_use]
    pub fn loader(&self) -> Arc<dyn QuestionLoader> {
        Arc::clone(&self.loader)
    }

    /// A fresh game driver sharing this instance's storage and loader.
    #[must_use]
    pub fn game(&self) -> QuizGameService {
        QuizGameService::new(self.loader(), self.statistics(), self.round_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DB_URL;
    use crate::error::LoadError;
    use quiz_core::model::QuizSettings;
    use quiz_core::time::fixed_clock;

    #[tokio::test]
    async fn missing_movies_endpoint_is_reported() {
        let config = QuizConfig {
            db_url: DEFAULT_DB_URL.into(),
            settings: QuizSettings::default(),
        };

        let err = QuizServices::from_config(&config, fixed_clock())
            .await
            .err()
            .expect("should fail without an API URL");
        assert!(matches!(
            err,
            QuizServicesError::Load(LoadError::NotConfigured)
        ));
    }
}
