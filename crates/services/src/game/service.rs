use std::sync::Arc;

use quiz_core::QuizEngine;
use tracing::{debug, info};

use super::view::{NextScreen, QuizStep, RoundAnswer, RoundSummary};
use crate::error::GameError;
use crate::loader::QuestionLoader;
use crate::statistics_service::StatisticsService;

/// Drives rounds: loads questions, advances the engine, and records the
/// result when the last answer comes in.
pub struct QuizGameService {
    loader: Arc<dyn QuestionLoader>,
    statistics: StatisticsService,
    round_length: usize,
    engine: Option<QuizEngine>,
}

impl QuizGameService {
    #[must_use]
    pub fn new(
        loader: Arc<dyn QuestionLoader>,
        statistics: StatisticsService,
        round_length: usize,
    ) -> Self {
        Self {
            loader,
            statistics,
            round_length,
            engine: None,
        }
    }

    #[must_use]
    pub fn statistics(&self) -> &StatisticsService {
        &self.statistics
    }

    #[must_use]
    pub fn round_length(&self) -> usize {
        self.round_length
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.engine.is_some()
    }

    /// Correct answers so far in the current round.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.engine.as_ref().map_or(0, QuizEngine::correct_count)
    }

    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.engine.as_ref().is_some_and(QuizEngine::is_complete)
    }

    /// Load questions and show the first one.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Load` when the loader fails (the previous round, if
    /// any, is kept) and `GameError::Quiz` when too few questions arrive.
    pub async fn start_round(&mut self) -> Result<QuizStep, GameError> {
        let questions = self.loader.load_questions().await?;
        let engine = QuizEngine::with_round_length(questions, self.round_length)?;
        let step = QuizStep::from_engine(&engine)?;
        self.engine = Some(engine);
        debug!(round_length = self.round_length, "round started");
        Ok(step)
    }

    /// Fetch a new set of questions for the next round.
    ///
    /// # Errors
    ///
    /// See [`QuizGameService::start_round`].
    pub async fn reload(&mut self) -> Result<QuizStep, GameError> {
        let Some(engine) = self.engine.as_mut() else {
            return self.start_round().await;
        };
        let questions = self.loader.load_questions().await?;
        engine.replace_questions(questions)?;
        Ok(QuizStep::from_engine(engine)?)
    }

    /// # Errors
    ///
    /// Returns `GameError::NotStarted` before the first round and
    /// `GameError::Quiz` once the round is complete.
    pub fn current_step(&self) -> Result<QuizStep, GameError> {
        let engine = self.engine.as_ref().ok_or(GameError::NotStarted)?;
        Ok(QuizStep::from_engine(engine)?)
    }

    /// Answer the current question. The completing answer stores the round
    /// in the statistics and yields the results screen.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotStarted` before the first round,
    /// `GameError::Quiz` when the round is already complete, and
    /// `GameError::Statistics` if the result cannot be stored.
    pub async fn answer(&mut self, given: bool) -> Result<RoundAnswer, GameError> {
        let engine = self.engine.as_mut().ok_or(GameError::NotStarted)?;
        let outcome = engine.submit_answer(given)?;
        debug!(
            given,
            is_correct = outcome.is_correct,
            index = engine.current_index(),
            "answer submitted"
        );

        if !outcome.is_round_complete {
            return Ok(RoundAnswer {
                outcome,
                next: NextScreen::Question(QuizStep::from_engine(engine)?),
            });
        }

        let correct = to_u32(engine.correct_count());
        let total = to_u32(engine.round_length());
        let record = self.statistics.store(correct, total).await?;
        info!(correct, total, games_played = record.games_played, "round complete");

        Ok(RoundAnswer {
            outcome,
            next: NextScreen::Results(RoundSummary::new(correct, total, &record)),
        })
    }

    /// Replay the same questions from the start.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotStarted` before the first round.
    pub fn play_again(&mut self) -> Result<QuizStep, GameError> {
        let engine = self.engine.as_mut().ok_or(GameError::NotStarted)?;
        engine.reset();
        Ok(QuizStep::from_engine(engine)?)
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
