use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::collections::BTreeSet;
use tracing::warn;

use quiz_core::model::TopicId;

use crate::repository::{ExclusionRepository, StorageError};

use super::SqliteRepository;

/// Durable key for one topic's served-question history.
fn exclusion_key(topic: &TopicId) -> String {
    format!("usedQuestions_{topic}")
}

#[async_trait]
impl ExclusionRepository for SqliteRepository {
    async fn load_used(&self, topic: &TopicId) -> Result<BTreeSet<usize>, StorageError> {
        let row = sqlx::query("SELECT indices FROM used_questions WHERE key = ?1")
            .bind(exclusion_key(topic))
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(BTreeSet::new());
        };

        let raw: String = row
            .try_get("indices")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        // Corrupt history degrades to "no memory" instead of failing the
        // session start; collecting into a set drops duplicate indices.
        match serde_json::from_str::<Vec<usize>>(&raw) {
            Ok(indices) => Ok(indices.into_iter().collect()),
            Err(err) => {
                warn!(topic = %topic, error = %err, "corrupt exclusion history, reading as empty");
                Ok(BTreeSet::new())
            }
        }
    }

    async fn save_used(
        &self,
        topic: &TopicId,
        used: &BTreeSet<usize>,
    ) -> Result<(), StorageError> {
        let indices: Vec<usize> = used.iter().copied().collect();
        let raw = serde_json::to_string(&indices)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO used_questions (key, indices, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                indices = excluded.indices,
                updated_at = excluded.updated_at
            ",
        )
        .bind(exclusion_key(topic))
        .bind(raw)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear_used(&self, topic: &TopicId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM used_questions WHERE key = ?1")
            .bind(exclusion_key(topic))
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
