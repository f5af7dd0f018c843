use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{PreferenceStore, PreferenceValue, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn split(value: PreferenceValue) -> (Option<i64>, Option<DateTime<Utc>>) {
    match value {
        PreferenceValue::Integer(v) => (Some(v), None),
        PreferenceValue::Date(d) => (None, Some(d)),
    }
}

fn map_preference_row(row: &sqlx::sqlite::SqliteRow) -> Result<PreferenceValue, StorageError> {
    let int_value: Option<i64> = row.try_get("int_value").map_err(ser)?;
    let date_value: Option<DateTime<Utc>> = row.try_get("date_value").map_err(ser)?;

    match (int_value, date_value) {
        (Some(v), None) => Ok(PreferenceValue::Integer(v)),
        (None, Some(d)) => Ok(PreferenceValue::Date(d)),
        _ => {
            let key: String = row.try_get("key").map_err(ser)?;
            Err(StorageError::Serialization(format!(
                "preference {key} must hold exactly one value"
            )))
        }
    }
}

const UPSERT: &str = r"
    INSERT INTO preferences (key, int_value, date_value, updated_at)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(key) DO UPDATE SET
        int_value = excluded.int_value,
        date_value = excluded.date_value,
        updated_at = excluded.updated_at
";

#[async_trait]
impl PreferenceStore for SqliteRepository {
    async fn get(&self, key: &str) -> Result<Option<PreferenceValue>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT key, int_value, date_value
            FROM preferences
            WHERE key = ?1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_preference_row).transpose()
    }

    async fn set(&self, key: &str, value: PreferenceValue) -> Result<(), StorageError> {
        let (int_value, date_value) = split(value);
        sqlx::query(UPSERT)
            .bind(key)
            .bind(int_value)
            .bind(date_value)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM preferences WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }

    async fn set_many(&self, entries: &[(&str, PreferenceValue)]) -> Result<(), StorageError> {
        let updated_at = Utc::now();
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for (key, value) in entries {
            let (int_value, date_value) = split(*value);
            sqlx::query(UPSERT)
                .bind(*key)
                .bind(int_value)
                .bind(date_value)
                .bind(updated_at)
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
