use serde::{Deserialize, Serialize};

/// A single yes/no quiz question: poster bytes, prompt text and the expected answer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    image: Vec<u8>,
    text: String,
    correct_answer: bool,
}

impl Question {
    #[must_use]
    pub fn new(image: Vec<u8>, text: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image,
            text: text.into(),
            correct_answer,
        }
    }

    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn correct_answer(&self) -> bool {
        self.correct_answer
    }

    /// Returns true when `given` matches the expected answer.
    #[must_use]
    pub fn is_correct(&self, given: bool) -> bool {
        given == self.correct_answer
    }
}

// Image blobs can be large; keep debug output readable.
impl std::fmt::Debug for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Question")
            .field("image_len", &self.image.len())
            .field("text", &self.text)
            .field("correct_answer", &self.correct_answer)
            .finish()
    }
}
