use std::fmt;

use thiserror::Error;

use crate::model::{DEFAULT_ROUND_LENGTH, Question};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Misuse of the round state machine. These are caller bugs, not runtime conditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question index {index} is out of range for a round of {round_length}")]
    OutOfRange { index: usize, round_length: usize },

    #[error("round is complete; reset before answering again")]
    InvalidState,

    #[error("round length must be at least 1")]
    EmptyRound,

    #[error("round needs {required} questions but only {available} were supplied")]
    NotEnoughQuestions { available: usize, required: usize },
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    InProgress,
    Complete,
}

/// Result of submitting one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub is_round_complete: bool,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Linear progression through a fixed-length round of questions.
///
/// `InProgress` advances one question per answer; the answer that fills the
/// round moves to `Complete`, which only [`QuizEngine::reset`] leaves.
pub struct QuizEngine {
    questions: Vec<Question>,
    current_index: usize,
    correct_count: usize,
    round_length: usize,
}

impl QuizEngine {
    /// Build a round of [`DEFAULT_ROUND_LENGTH`] questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotEnoughQuestions` if fewer questions are supplied.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        Self::with_round_length(questions, DEFAULT_ROUND_LENGTH)
    }

    /// Build a round of `round_length` questions. Extra questions are dropped.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyRound` when `round_length` is zero and
    /// `QuizError::NotEnoughQuestions` when the supply is too short.
    pub fn with_round_length(
        mut questions: Vec<Question>,
        round_length: usize,
    ) -> Result<Self, QuizError> {
        if round_length == 0 {
            return Err(QuizError::EmptyRound);
        }
        if questions.len() < round_length {
            return Err(QuizError::NotEnoughQuestions {
                available: questions.len(),
                required: round_length,
            });
        }
        questions.truncate(round_length);

        Ok(Self {
            questions,
            current_index: 0,
            correct_count: 0,
            round_length,
        })
    }

    #[must_use]
    pub fn round_length(&self) -> usize {
        self.round_length
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// 1-based position of the current question, as shown in a "3/10" counter.
    #[must_use]
    pub fn question_number(&self) -> usize {
        (self.current_index + 1).min(self.round_length)
    }

    #[must_use]
    pub fn state(&self) -> RoundState {
        if self.current_index >= self.round_length {
            RoundState::Complete
        } else {
            RoundState::InProgress
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state() == RoundState::Complete
    }

    /// The question awaiting an answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::OutOfRange` once the round is complete.
    pub fn current_question(&self) -> Result<&Question, QuizError> {
        self.questions
            .get(self.current_index)
            .ok_or(QuizError::OutOfRange {
                index: self.current_index,
                round_length: self.round_length,
            })
    }

    /// Check `given` against the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidState` if the round is already complete.
    pub fn submit_answer(&mut self, given: bool) -> Result<AnswerOutcome, QuizError> {
        if self.is_complete() {
            return Err(QuizError::InvalidState);
        }

        let is_correct = self.current_question()?.is_correct(given);
        if is_correct {
            self.correct_count += 1;
        }
        self.current_index += 1;

        Ok(AnswerOutcome {
            is_correct,
            is_round_complete: self.current_index == self.round_length,
        })
    }

    /// Start the same questions over.
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.correct_count = 0;
    }

    /// Swap in a fresh set of questions and reset progress.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotEnoughQuestions` if the new set is shorter than the
    /// round; the current round is left untouched in that case.
    pub fn replace_questions(&mut self, mut questions: Vec<Question>) -> Result<(), QuizError> {
        if questions.len() < self.round_length {
            return Err(QuizError::NotEnoughQuestions {
                available: questions.len(),
                required: self.round_length,
            });
        }
        questions.truncate(self.round_length);
        self.questions = questions;
        self.reset();
        Ok(())
    }
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("questions_len", &self.questions.len())
            .field("current_index", &self.current_index)
            .field("correct_count", &self.correct_count)
            .field("round_length", &self.round_length)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_answer: bool) -> Question {
        Question::new(vec![0xFF, 0xD8], "Is the rating above 7?", correct_answer)
    }

    fn round(answers: &[bool]) -> QuizEngine {
        let questions = answers.iter().copied().map(question).collect();
        QuizEngine::with_round_length(questions, answers.len()).unwrap()
    }

    #[test]
    fn two_question_round_matches_expected_outcomes() {
        let mut engine = round(&[true, false]);

        let first = engine.submit_answer(true).unwrap();
        assert_eq!(
            first,
            AnswerOutcome {
                is_correct: true,
                is_round_complete: false
            }
        );

        let second = engine.submit_answer(true).unwrap();
        assert_eq!(
            second,
            AnswerOutcome {
                is_correct: false,
                is_round_complete: true
            }
        );
        assert_eq!(engine.correct_count(), 1);
        assert_eq!(engine.state(), RoundState::Complete);
    }

    #[test]
    fn completion_is_reported_only_on_last_answer() {
        for len in 1..=12 {
            let mut engine = round(&vec![true; len]);
            for i in 1..=len {
                let outcome = engine.submit_answer(i % 2 == 0).unwrap();
                assert_eq!(outcome.is_round_complete, i == len, "len {len}, answer {i}");
            }
        }
    }

    #[test]
    fn correct_count_matches_number_of_matching_answers() {
        let expected = [true, false, false, true, true, false, true, false, true, true];
        let given = [true, true, false, false, true, true, true, false, false, true];
        let mut engine = QuizEngine::new(expected.iter().copied().map(question).collect()).unwrap();

        for (i, answer) in given.iter().enumerate() {
            engine.submit_answer(*answer).unwrap();
            assert!(engine.correct_count() <= engine.current_index());
            assert!(engine.correct_count() <= i + 1);
        }

        let matches = expected.iter().zip(given).filter(|(e, g)| **e == *g).count();
        assert_eq!(engine.correct_count(), matches);
    }

    #[test]
    fn complete_round_rejects_progression_calls() {
        let mut engine = round(&[true]);
        engine.submit_answer(false).unwrap();

        assert_eq!(engine.submit_answer(true), Err(QuizError::InvalidState));
        assert_eq!(
            engine.current_question().unwrap_err(),
            QuizError::OutOfRange {
                index: 1,
                round_length: 1
            }
        );
    }

    #[test]
    fn reset_restarts_a_completed_round() {
        let mut engine = round(&[true, true]);
        engine.submit_answer(true).unwrap();
        engine.submit_answer(true).unwrap();
        assert!(engine.is_complete());

        engine.reset();
        assert_eq!(engine.state(), RoundState::InProgress);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.correct_count(), 0);
        assert_eq!(engine.question_number(), 1);
        assert!(engine.current_question().is_ok());
    }

    #[test]
    fn default_round_uses_ten_questions_and_drops_extras() {
        let engine = QuizEngine::new((0..15).map(|i| question(i % 2 == 0)).collect()).unwrap();
        assert_eq!(engine.round_length(), DEFAULT_ROUND_LENGTH);

        let err = QuizEngine::new(vec![question(true); 3]).unwrap_err();
        assert_eq!(
            err,
            QuizError::NotEnoughQuestions {
                available: 3,
                required: 10
            }
        );
        assert_eq!(
            QuizEngine::with_round_length(vec![question(true)], 0).unwrap_err(),
            QuizError::EmptyRound
        );
    }

    #[test]
    fn replace_questions_resets_progress() {
        let mut engine = round(&[true, true]);
        engine.submit_answer(true).unwrap();

        engine
            .replace_questions(vec![question(false), question(false)])
            .unwrap();
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.current_question().unwrap().correct_answer());

        let err = engine.replace_questions(vec![question(true)]).unwrap_err();
        assert!(matches!(err, QuizError::NotEnoughQuestions { .. }));
    }
}
