use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    correct: u32,
    total: u32,
    date: DateTime<Utc>,
}

impl GameResult {
    #[must_use]
    pub fn new(correct: u32, total: u32, date: DateTime<Utc>) -> Self {
        Self {
            correct,
            total,
            date,
        }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Strictly more correct answers than `other`. Equal scores never win,
    /// so the earliest record of a score is the one kept.
    #[must_use]
    pub fn is_better_than(&self, other: &GameResult) -> bool {
        self.correct > other.correct
    }
}
