use quiz_core::QuizEngine;
use quiz_core::engine::{AnswerOutcome, QuizError};
use quiz_core::model::{GameResult, StatisticsRecord};

/// What the player sees for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizStep {
    pub image: Vec<u8>,
    pub question: String,
    pub position: usize,
    pub total: usize,
}

impl QuizStep {
    /// Build the step for the engine's current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::OutOfRange` if the round is already complete.
    pub fn from_engine(engine: &QuizEngine) -> Result<Self, QuizError> {
        let question = engine.current_question()?;
        Ok(Self {
            image: question.image().to_vec(),
            question: question.text().to_owned(),
            position: engine.question_number(),
            total: engine.round_length(),
        })
    }

    /// Counter label such as `3/10`.
    #[must_use]
    pub fn question_number(&self) -> String {
        format!("{}/{}", self.position, self.total)
    }
}

/// End-of-round result together with the lifetime statistics it was stored into.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub correct: u32,
    pub total: u32,
    pub games_played: u64,
    pub best_game: GameResult,
    pub accuracy: f64,
}

impl RoundSummary {
    #[must_use]
    pub fn new(correct: u32, total: u32, record: &StatisticsRecord) -> Self {
        Self {
            correct,
            total,
            games_played: record.games_played,
            best_game: record.best_game,
            accuracy: record.total_accuracy(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        "This round is over!"
    }

    #[must_use]
    pub fn button_text(&self) -> &'static str {
        "Play again"
    }

    /// Multi-line result text: score, games played, record with its date, and average accuracy.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Your result: {}/{}\nQuizzes played: {}\nRecord: {}/{} ({})\nAverage accuracy: {:.2}%",
            self.correct,
            self.total,
            self.games_played,
            self.best_game.correct(),
            self.best_game.total(),
            self.best_game.date().format("%d.%m.%y %H:%M"),
            self.accuracy,
        )
    }
}

/// Screen to show after an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum NextScreen {
    Question(QuizStep),
    Results(RoundSummary),
}

/// Result of answering the current question through the game service.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundAnswer {
    pub outcome: AnswerOutcome,
    pub next: NextScreen,
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;
    use quiz_core::time::fixed_now;

    #[test]
    fn step_reports_one_based_counter() {
        let questions = vec![
            Question::new(vec![9], "first?", true),
            Question::new(vec![8], "second?", false),
        ];
        let mut engine = QuizEngine::with_round_length(questions, 2).unwrap();
        engine.submit_answer(true).unwrap();

        let step = QuizStep::from_engine(&engine).unwrap();
        assert_eq!(step.question, "second?");
        assert_eq!(step.image, vec![8]);
        assert_eq!(step.question_number(), "2/2");
    }

    #[test]
    fn summary_message_lists_statistics() {
        let record = StatisticsRecord {
            lifetime_correct: 12,
            lifetime_total: 20,
            games_played: 2,
            best_game: GameResult::new(7, 10, fixed_now()),
        };
        let summary = RoundSummary::new(5, 10, &record);

        assert_eq!(
            summary.message(),
            "Your result: 5/10\nQuizzes played: 2\nRecord: 7/10 (14.11.23 22:13)\nAverage accuracy: 60.00%"
        );
        assert_eq!(summary.title(), "This round is over!");
        assert_eq!(summary.button_text(), "Play again");
    }
}
