use rand::Rng;
use rand::seq::IndexedRandom;

use quiz_core::model::Question;

use super::client::Movie;
use crate::error::LoadError;

const THRESHOLD_MIN: u8 = 5;
const THRESHOLD_MAX: u8 = 9;

/// A movie picked for the round together with the rating threshold it will be asked about.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedQuestion {
    pub movie: Movie,
    pub threshold: u8,
}

impl PlannedQuestion {
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "Is the rating of this movie greater than {}?",
            self.threshold
        )
    }

    #[must_use]
    pub fn correct_answer(&self) -> bool {
        self.movie.rating > f32::from(self.threshold)
    }

    #[must_use]
    pub fn into_question(self, image: Vec<u8>) -> Question {
        let text = self.text();
        let correct_answer = self.correct_answer();
        Question::new(image, text, correct_answer)
    }
}

/// Turns a movie catalogue into rating questions.
#[derive(Debug, Clone, Copy)]
pub struct MovieQuestionFactory {
    round_length: usize,
}

impl MovieQuestionFactory {
    #[must_use]
    pub fn new(round_length: usize) -> Self {
        Self { round_length }
    }

    #[must_use]
    pub fn round_length(&self) -> usize {
        self.round_length
    }

    /// Pick `round_length` distinct movies and a threshold for each.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotEnoughMovies` if the catalogue is too small.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        movies: &[Movie],
        rng: &mut R,
    ) -> Result<Vec<PlannedQuestion>, LoadError> {
        if movies.len() < self.round_length {
            return Err(LoadError::NotEnoughMovies {
                available: movies.len(),
                required: self.round_length,
            });
        }

        let picked: Vec<&Movie> = movies.choose_multiple(rng, self.round_length).collect();
        Ok(picked
            .into_iter()
            .map(|movie| PlannedQuestion {
                movie: movie.clone(),
                threshold: rng.random_range(THRESHOLD_MIN..=THRESHOLD_MAX),
            })
            .collect())
    }
}
