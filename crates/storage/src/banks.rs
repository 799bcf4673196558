use async_trait::async_trait;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

use quiz_core::model::{Question, QuestionError, TopicBank, TopicId, TopicSummary};

use crate::repository::{BankRepository, StorageError};

/// On-disk shape of one topic's bank file.
///
/// This mirrors the wire format so the domain `Question` type never carries
/// serialization concerns. A missing `quiz` key reads as an empty pool.
#[derive(Debug, Clone, Deserialize)]
pub struct BankFile {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub quiz: Vec<BankQuestionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BankQuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl BankFile {
    /// Convert the parsed file into a validated domain bank.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if any question in the file is invalid; a
    /// malformed bank fails as a whole rather than serving a skewed pool.
    pub fn into_bank(self, topic_id: TopicId) -> Result<TopicBank, QuestionError> {
        let questions = self
            .quiz
            .into_iter()
            .map(|record| Question::new(record.question, record.options, record.answer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TopicBank::new(topic_id, self.title, questions))
    }
}

/// Bank repository reading `<dir>/<topic>.json` files.
#[derive(Debug, Clone)]
pub struct FsBankRepository {
    dir: PathBuf,
}

impl FsBankRepository {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_bank(&self, topic: &TopicId, path: &Path) -> Result<TopicBank, StorageError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound
            } else {
                StorageError::Connection(err.to_string())
            }
        })?;
        let file: BankFile = serde_json::from_slice(&bytes)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        file.into_bank(topic.clone())
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

#[async_trait]
impl BankRepository for FsBankRepository {
    async fn list_topics(&self) -> Result<Vec<TopicSummary>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let mut topics = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let Ok(topic_id) = TopicId::new(stem) else {
                continue;
            };
            match self.read_bank(&topic_id, &path).await {
                Ok(bank) => topics.push(bank.summary()),
                Err(err) => {
                    // Unreadable banks disappear from the picker instead of
                    // breaking the listing.
                    warn!(topic = %topic_id, error = %err, "skipping unreadable bank file");
                }
            }
        }

        topics.sort_by(|a, b| a.topic_id.cmp(&b.topic_id));
        Ok(topics)
    }

    async fn load_bank(&self, topic: &TopicId) -> Result<TopicBank, StorageError> {
        let path = self.dir.join(format!("{topic}.json"));
        self.read_bank(topic, &path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    fn scratch_dir() -> PathBuf {
        let seq = DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "quiz-banks-test-{}-{seq}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_bank(dir: &Path, topic: &str, body: &str) {
        std::fs::write(dir.join(format!("{topic}.json")), body).unwrap();
    }

    const VALID_BANK: &str = r#"{
        "title": "Unit 1",
        "quiz": [
            { "question": "Q1", "options": ["a", "b"], "answer": "a" },
            { "question": "Q2", "options": ["x", "y", "z"], "answer": "z" }
        ]
    }"#;

    #[tokio::test]
    async fn loads_bank_from_file() {
        let dir = scratch_dir();
        write_bank(&dir, "tema1", VALID_BANK);

        let repo = FsBankRepository::new(&dir);
        let bank = repo
            .load_bank(&TopicId::new("tema1").unwrap())
            .await
            .unwrap();
        assert_eq!(bank.title(), "Unit 1");
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[1].answer(), "z");
    }

    #[tokio::test]
    async fn missing_quiz_key_reads_as_empty_pool() {
        let dir = scratch_dir();
        write_bank(&dir, "tema1", r#"{ "title": "Empty unit" }"#);

        let repo = FsBankRepository::new(&dir);
        let bank = repo
            .load_bank(&TopicId::new("tema1").unwrap())
            .await
            .unwrap();
        assert!(bank.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_a_serialization_error() {
        let dir = scratch_dir();
        write_bank(&dir, "tema1", "not json at all");

        let repo = FsBankRepository::new(&dir);
        let err = repo
            .load_bank(&TopicId::new("tema1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn invalid_question_fails_the_bank() {
        let dir = scratch_dir();
        write_bank(
            &dir,
            "tema1",
            r#"{ "quiz": [ { "question": "Q", "options": ["a", "b"], "answer": "c" } ] }"#,
        );

        let repo = FsBankRepository::new(&dir);
        let err = repo
            .load_bank(&TopicId::new("tema1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = scratch_dir();
        let repo = FsBankRepository::new(&dir);
        let err = repo
            .load_bank(&TopicId::new("absent").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn listing_skips_unreadable_banks() {
        let dir = scratch_dir();
        write_bank(&dir, "tema1", VALID_BANK);
        write_bank(&dir, "tema2", "{ broken");
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let repo = FsBankRepository::new(&dir);
        let topics = repo.list_topics().await.unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].topic_id.as_str(), "tema1");
        assert_eq!(topics[0].question_count, 2);
    }
}
