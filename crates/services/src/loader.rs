use async_trait::async_trait;
use quiz_core::model::Question;

use crate::error::LoadError;

/// Supplies the questions for a round.
///
/// Implementations do not retry; a failed load is surfaced so the caller can
/// offer the player another attempt.
#[async_trait]
pub trait QuestionLoader: Send + Sync {
    /// # Errors
    ///
    /// Returns `LoadError` if the questions cannot be produced.
    async fn load_questions(&self) -> Result<Vec<Question>, LoadError>;
}

/// Loader over a fixed, bundled list of questions.
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionLoader {
    questions: Vec<Question>,
}

impl StaticQuestionLoader {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionLoader for StaticQuestionLoader {
    async fn load_questions(&self) -> Result<Vec<Question>, LoadError> {
        if self.questions.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(self.questions.clone())
    }
}
