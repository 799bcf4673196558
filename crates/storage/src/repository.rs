use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use quiz_core::model::{TopicBank, TopicId, TopicSummary};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable per-topic memory of question indices already served.
///
/// Implementations must read absent or corrupt history as an empty set —
/// exclusion memory degrades, it never blocks a session.
#[async_trait]
pub trait ExclusionRepository: Send + Sync {
    /// Load the served-index set for a topic. Absent history is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for connection-level failures; corrupt
    /// values are logged and read as empty.
    async fn load_used(&self, topic: &TopicId) -> Result<BTreeSet<usize>, StorageError>;

    /// Overwrite the served-index set for a topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be written.
    async fn save_used(&self, topic: &TopicId, used: &BTreeSet<usize>)
    -> Result<(), StorageError>;

    /// Drop all history for a topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    async fn clear_used(&self, topic: &TopicId) -> Result<(), StorageError>;
}

/// Read-only access to the question banks.
#[async_trait]
pub trait BankRepository: Send + Sync {
    /// List every available topic with its title and pool size.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank source cannot be enumerated.
    async fn list_topics(&self) -> Result<Vec<TopicSummary>, StorageError>;

    /// Load the full question pool for one topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the topic has no bank, or other
    /// storage errors for unreadable/malformed banks.
    async fn load_bank(&self, topic: &TopicId) -> Result<TopicBank, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    banks: Arc<Mutex<HashMap<TopicId, TopicBank>>>,
    used: Arc<Mutex<HashMap<TopicId, BTreeSet<usize>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a bank, replacing any previous bank for the topic.
    pub fn insert_bank(&self, bank: TopicBank) {
        if let Ok(mut guard) = self.banks.lock() {
            guard.insert(bank.topic_id().clone(), bank);
        }
    }
}

#[async_trait]
impl ExclusionRepository for InMemoryRepository {
    async fn load_used(&self, topic: &TopicId) -> Result<BTreeSet<usize>, StorageError> {
        let guard = self
            .used
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(topic).cloned().unwrap_or_default())
    }

    async fn save_used(
        &self,
        topic: &TopicId,
        used: &BTreeSet<usize>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .used
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(topic.clone(), used.clone());
        Ok(())
    }

    async fn clear_used(&self, topic: &TopicId) -> Result<(), StorageError> {
        let mut guard = self
            .used
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(topic);
        Ok(())
    }
}

#[async_trait]
impl BankRepository for InMemoryRepository {
    async fn list_topics(&self) -> Result<Vec<TopicSummary>, StorageError> {
        let guard = self
            .banks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut topics: Vec<TopicSummary> = guard.values().map(TopicBank::summary).collect();
        topics.sort_by(|a, b| a.topic_id.cmp(&b.topic_id));
        Ok(topics)
    }

    async fn load_bank(&self, topic: &TopicId) -> Result<TopicBank, StorageError> {
        let guard = self
            .banks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(topic).cloned().ok_or(StorageError::NotFound)
    }
}

/// Aggregates the bank and exclusion repositories behind trait objects for
/// easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub banks: Arc<dyn BankRepository>,
    pub exclusions: Arc<dyn ExclusionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let banks: Arc<dyn BankRepository> = Arc::new(repo.clone());
        let exclusions: Arc<dyn ExclusionRepository> = Arc::new(repo);
        Self { banks, exclusions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;

    fn build_bank(topic: &str, questions: usize) -> TopicBank {
        let questions = (0..questions)
            .map(|i| {
                Question::new(
                    format!("Q{i}"),
                    vec!["yes".to_string(), "no".to_string()],
                    "yes",
                )
                .unwrap()
            })
            .collect();
        TopicBank::new(TopicId::new(topic).unwrap(), format!("Unit {topic}"), questions)
    }

    #[tokio::test]
    async fn used_set_round_trips() {
        let repo = InMemoryRepository::new();
        let topic = TopicId::new("tema1").unwrap();

        assert!(repo.load_used(&topic).await.unwrap().is_empty());

        let used: BTreeSet<usize> = [3, 1, 2].into_iter().collect();
        repo.save_used(&topic, &used).await.unwrap();
        assert_eq!(repo.load_used(&topic).await.unwrap(), used);

        repo.clear_used(&topic).await.unwrap();
        assert!(repo.load_used(&topic).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn banks_are_listed_sorted_by_topic() {
        let repo = InMemoryRepository::new();
        repo.insert_bank(build_bank("tema2", 4));
        repo.insert_bank(build_bank("tema1", 3));

        let topics = repo.list_topics().await.unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].topic_id.as_str(), "tema1");
        assert_eq!(topics[0].question_count, 3);
        assert_eq!(topics[1].topic_id.as_str(), "tema2");
    }

    #[tokio::test]
    async fn missing_bank_is_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo
            .load_bank(&TopicId::new("nope").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
