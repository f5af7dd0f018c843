use std::collections::HashMap;
use std::sync::Arc;

use quiz_core::model::{GameResult, StatisticsKey, StatisticsRecord};
use storage::repository::{PreferenceStore, PreferenceValue};
use tracing::{debug, info};

use crate::Clock;
use crate::error::StatisticsError;

/// Lifetime quiz statistics kept in a preference store.
///
/// Every value lives under one of the [`StatisticsKey`] names. Missing counters
/// read as zero; a missing best-game date reads as the clock's current time.
#[derive(Clone)]
pub struct StatisticsService {
    clock: Clock,
    preferences: Arc<dyn PreferenceStore>,
}

impl StatisticsService {
    #[must_use]
    pub fn new(clock: Clock, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self { clock, preferences }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Read every statistics key in one pass.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::Storage` if the store cannot be read and
    /// `StatisticsError::Corrupt` if a value has the wrong type or sign.
    pub async fn snapshot(&self) -> Result<StatisticsRecord, StatisticsError> {
        let keys: Vec<&str> = StatisticsKey::ALL.iter().map(|key| key.as_str()).collect();
        let values = self.preferences.get_many(&keys).await?;

        let best_correct = counter(&values, StatisticsKey::BestGameCorrect)?;
        let best_total = counter(&values, StatisticsKey::BestGameTotal)?;
        let best_date = match values.get(StatisticsKey::BestGameDate.as_str()) {
            None => self.clock.now(),
            Some(value) => value.as_date().ok_or(StatisticsError::Corrupt {
                key: StatisticsKey::BestGameDate,
            })?,
        };

        Ok(StatisticsRecord {
            lifetime_correct: counter(&values, StatisticsKey::CorrectAnswers)?,
            lifetime_total: counter(&values, StatisticsKey::TotalQuestions)?,
            games_played: counter(&values, StatisticsKey::GamesCount)?,
            best_game: GameResult::new(
                narrow(best_correct, StatisticsKey::BestGameCorrect)?,
                narrow(best_total, StatisticsKey::BestGameTotal)?,
                best_date,
            ),
        })
    }

    /// Record a finished round and return the updated statistics.
    ///
    /// The best game is replaced only when `correct` is strictly greater than
    /// the recorded one. All changed keys are written as one batch.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError` if the current values cannot be read or the
    /// update cannot be written.
    pub async fn store(&self, correct: u32, total: u32) -> Result<StatisticsRecord, StatisticsError> {
        let mut record = self.snapshot().await?;

        record.games_played = record.games_played.saturating_add(1);
        record.lifetime_correct = record.lifetime_correct.saturating_add(u64::from(correct));
        record.lifetime_total = record.lifetime_total.saturating_add(u64::from(total));

        let mut entries = vec![
            (
                StatisticsKey::GamesCount.as_str(),
                PreferenceValue::Integer(widen(record.games_played)),
            ),
            (
                StatisticsKey::CorrectAnswers.as_str(),
                PreferenceValue::Integer(widen(record.lifetime_correct)),
            ),
            (
                StatisticsKey::TotalQuestions.as_str(),
                PreferenceValue::Integer(widen(record.lifetime_total)),
            ),
        ];

        let candidate = GameResult::new(correct, total, self.clock.now());
        if candidate.is_better_than(&record.best_game) {
            info!(
                correct,
                total,
                previous = record.best_game.correct(),
                "new best game"
            );
            record.best_game = candidate;
            entries.extend([
                (
                    StatisticsKey::BestGameCorrect.as_str(),
                    PreferenceValue::Integer(i64::from(correct)),
                ),
                (
                    StatisticsKey::BestGameTotal.as_str(),
                    PreferenceValue::Integer(i64::from(total)),
                ),
                (
                    StatisticsKey::BestGameDate.as_str(),
                    PreferenceValue::Date(candidate.date()),
                ),
            ]);
        }

        self.preferences.set_many(&entries).await?;
        debug!(
            games_played = record.games_played,
            lifetime_correct = record.lifetime_correct,
            lifetime_total = record.lifetime_total,
            "stored game result"
        );
        Ok(record)
    }

    /// Percentage of correct answers across all games; `0.0` before the first game.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError` if the statistics cannot be read.
    pub async fn total_accuracy(&self) -> Result<f64, StatisticsError> {
        Ok(self.snapshot().await?.total_accuracy())
    }

    /// # Errors
    ///
    /// Returns `StatisticsError` if the statistics cannot be read.
    pub async fn best_game(&self) -> Result<GameResult, StatisticsError> {
        Ok(self.snapshot().await?.best_game)
    }

    /// # Errors
    ///
    /// Returns `StatisticsError` if the statistics cannot be read.
    pub async fn games_played(&self) -> Result<u64, StatisticsError> {
        let values = self
            .preferences
            .get_many(&[StatisticsKey::GamesCount.as_str()])
            .await?;
        counter(&values, StatisticsKey::GamesCount)
    }
}

fn counter(
    values: &HashMap<String, PreferenceValue>,
    key: StatisticsKey,
) -> Result<u64, StatisticsError> {
    match values.get(key.as_str()) {
        None => Ok(0),
        Some(value) => value
            .as_integer()
            .and_then(|v| u64::try_from(v).ok())
            .ok_or(StatisticsError::Corrupt { key }),
    }
}

fn narrow(value: u64, key: StatisticsKey) -> Result<u32, StatisticsError> {
    u32::try_from(value).map_err(|_| StatisticsError::Corrupt { key })
}

fn widen(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryPreferenceStore;

    fn service(store: &InMemoryPreferenceStore) -> StatisticsService {
        StatisticsService::new(fixed_clock(), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn empty_store_reads_as_zero() {
        let store = InMemoryPreferenceStore::new();
        let stats = service(&store);

        assert_eq!(stats.games_played().await.unwrap(), 0);
        assert!(stats.total_accuracy().await.unwrap().abs() < f64::EPSILON);
        let best = stats.best_game().await.unwrap();
        assert_eq!(best.correct(), 0);
        assert_eq!(best.total(), 0);
        assert_eq!(best.date(), fixed_now());
    }

    #[tokio::test]
    async fn keeps_best_and_accumulates_totals() {
        let store = InMemoryPreferenceStore::new();
        let stats = service(&store);

        stats.store(7, 10).await.unwrap();
        stats.store(5, 10).await.unwrap();

        assert_eq!(stats.best_game().await.unwrap().correct(), 7);
        assert!((stats.total_accuracy().await.unwrap() - 60.0).abs() < 1e-9);
        assert_eq!(stats.games_played().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn equal_score_keeps_first_date() {
        let store = InMemoryPreferenceStore::new();
        service(&store).store(6, 10).await.unwrap();

        let later = Clock::fixed(fixed_now() + Duration::days(3));
        let stats = service(&store).with_clock(later);
        stats.store(6, 10).await.unwrap();
        assert_eq!(stats.best_game().await.unwrap().date(), fixed_now());

        stats.store(8, 10).await.unwrap();
        let best = stats.best_game().await.unwrap();
        assert_eq!(best.correct(), 8);
        assert_eq!(best.date(), later.now());
    }

    #[tokio::test]
    async fn k_stores_add_k_games_and_sum_of_totals() {
        let store = InMemoryPreferenceStore::new();
        let stats = service(&store);
        let rounds = [(3, 10), (10, 10), (0, 5), (9, 12), (4, 4)];

        for (correct, total) in rounds {
            stats.store(correct, total).await.unwrap();
        }

        let record = stats.snapshot().await.unwrap();
        assert_eq!(record.games_played, rounds.len() as u64);
        assert_eq!(
            record.lifetime_total,
            rounds.iter().map(|(_, t)| u64::from(*t)).sum::<u64>()
        );
        assert_eq!(
            record.best_game.correct(),
            rounds.iter().map(|(c, _)| *c).max().unwrap()
        );
    }

    #[tokio::test]
    async fn perfect_games_give_full_accuracy() {
        let store = InMemoryPreferenceStore::new();
        let stats = service(&store);
        stats.store(10, 10).await.unwrap();
        stats.store(10, 10).await.unwrap();

        assert!((stats.total_accuracy().await.unwrap() - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn writes_the_six_documented_keys() {
        let store = InMemoryPreferenceStore::new();
        service(&store).store(4, 10).await.unwrap();

        for key in StatisticsKey::ALL {
            assert!(
                store.get(key.as_str()).await.unwrap().is_some(),
                "missing {key}"
            );
        }
        assert_eq!(
            store.get("correctAnswers").await.unwrap(),
            Some(PreferenceValue::Integer(4))
        );
    }

    #[tokio::test]
    async fn negative_counter_is_corrupt() {
        let store = InMemoryPreferenceStore::new();
        store
            .set("gamesCount", PreferenceValue::Integer(-1))
            .await
            .unwrap();

        let err = service(&store).snapshot().await.unwrap_err();
        assert!(matches!(
            err,
            StatisticsError::Corrupt {
                key: StatisticsKey::GamesCount
            }
        ));
    }

    #[tokio::test]
    async fn date_stored_as_integer_is_corrupt() {
        let store = InMemoryPreferenceStore::new();
        store
            .set("bestGame.date", PreferenceValue::Integer(1))
            .await
            .unwrap();

        let err = service(&store).best_game().await.unwrap_err();
        assert!(matches!(
            err,
            StatisticsError::Corrupt {
                key: StatisticsKey::BestGameDate
            }
        ));
    }
}
