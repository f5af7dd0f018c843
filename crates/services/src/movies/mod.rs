mod client;
mod factory;

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use quiz_core::model::{Question, QuizSettings};

use crate::error::LoadError;
use crate::loader::QuestionLoader;

pub use client::{Movie, MoviesClient};
pub use factory::{MovieQuestionFactory, PlannedQuestion};

/// Network-backed question supply: fetches the catalogue, picks a round of
/// movies and downloads their posters.
pub struct MoviesQuestionLoader {
    client: MoviesClient,
    factory: MovieQuestionFactory,
    rng: Mutex<StdRng>,
}

impl MoviesQuestionLoader {
    #[must_use]
    pub fn new(client: MoviesClient, factory: MovieQuestionFactory) -> Self {
        Self {
            client,
            factory,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// # Errors
    ///
    /// Returns `LoadError::NotConfigured` when the settings carry no base URL.
    pub fn from_settings(settings: &QuizSettings) -> Result<Self, LoadError> {
        Ok(Self::new(
            MoviesClient::from_settings(settings)?,
            MovieQuestionFactory::new(settings.round_length()),
        ))
    }

    /// Use a seeded generator so the picked movies and thresholds are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }
}

#[async_trait]
impl QuestionLoader for MoviesQuestionLoader {
    async fn load_questions(&self) -> Result<Vec<Question>, LoadError> {
        let movies = self.client.fetch_movies().await.inspect_err(|err| {
            warn!(error = %err, "failed to load movies");
        })?;

        let plan = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.factory.plan(&movies, &mut *rng)?
        };

        let mut questions = Vec::with_capacity(plan.len());
        for planned in plan {
            // Poster failures degrade to an empty image.
            let image = match self.client.fetch_image(&planned.movie.image_url).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(title = %planned.movie.title, error = %err, "failed to load poster");
                    Vec::new()
                }
            };
            questions.push(planned.into_question(image));
        }

        debug!(count = questions.len(), "built movie questions");
        Ok(questions)
    }
}
