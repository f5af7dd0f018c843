use serde::{Deserialize, Serialize};

use crate::model::GameResult;

/// Keys of the persisted statistics scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticsKey {
    CorrectAnswers,
    TotalQuestions,
    GamesCount,
    BestGameCorrect,
    BestGameTotal,
    BestGameDate,
}

impl StatisticsKey {
    pub const ALL: [StatisticsKey; 6] = [
        StatisticsKey::CorrectAnswers,
        StatisticsKey::TotalQuestions,
        StatisticsKey::GamesCount,
        StatisticsKey::BestGameCorrect,
        StatisticsKey::BestGameTotal,
        StatisticsKey::BestGameDate,
    ];

    /// Key name as written to the preference store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatisticsKey::CorrectAnswers => "correctAnswers",
            StatisticsKey::TotalQuestions => "totalQuestions",
            StatisticsKey::GamesCount => "gamesCount",
            StatisticsKey::BestGameCorrect => "bestGame.correct",
            StatisticsKey::BestGameTotal => "bestGame.total",
            StatisticsKey::BestGameDate => "bestGame.date",
        }
    }
}

impl std::fmt::Display for StatisticsKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifetime statistics as read back from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    pub lifetime_correct: u64,
    pub lifetime_total: u64,
    pub games_played: u64,
    pub best_game: GameResult,
}

impl StatisticsRecord {
    /// Percentage of correct answers over all games, `0.0` before any question was answered.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_accuracy(&self) -> f64 {
        if self.lifetime_total == 0 {
            return 0.0;
        }
        self.lifetime_correct as f64 / self.lifetime_total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn record(correct: u64, total: u64) -> StatisticsRecord {
        StatisticsRecord {
            lifetime_correct: correct,
            lifetime_total: total,
            games_played: 1,
            best_game: GameResult::new(0, 0, fixed_now()),
        }
    }

    #[test]
    fn accuracy_guards_empty_totals() {
        assert!(record(0, 0).total_accuracy().abs() < f64::EPSILON);
    }

    #[test]
    fn accuracy_is_percentage() {
        assert!((record(12, 20).total_accuracy() - 60.0).abs() < 1e-9);
        assert!((record(10, 10).total_accuracy() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn keys_match_persisted_names() {
        let names: Vec<_> = StatisticsKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            [
                "correctAnswers",
                "totalQuestions",
                "gamesCount",
                "bestGame.correct",
                "bestGame.total",
                "bestGame.date",
            ]
        );
    }
}
