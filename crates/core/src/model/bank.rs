use crate::model::{Question, TopicId};

/// The full, read-only question pool for one topic.
///
/// Questions are identified by their position in this pool; the exclusion
/// history persists those positions across sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicBank {
    topic_id: TopicId,
    title: String,
    questions: Vec<Question>,
}

impl TopicBank {
    #[must_use]
    pub fn new(topic_id: TopicId, title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            topic_id,
            title: title.into(),
            questions,
        }
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> TopicSummary {
        TopicSummary {
            topic_id: self.topic_id.clone(),
            title: self.title.clone(),
            question_count: self.questions.len(),
        }
    }
}

/// Listing projection for the topic picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub topic_id: TopicId,
    pub title: String,
    pub question_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n: usize) -> Question {
        Question::new(
            format!("Q{n}"),
            vec!["yes".to_string(), "no".to_string()],
            "yes",
        )
        .unwrap()
    }

    #[test]
    fn summary_reflects_pool_size() {
        let bank = TopicBank::new(
            TopicId::new("tema1").unwrap(),
            "Unit 1",
            vec![question(1), question(2)],
        );
        let summary = bank.summary();
        assert_eq!(summary.question_count, 2);
        assert_eq!(summary.title, "Unit 1");
        assert_eq!(summary.topic_id.as_str(), "tema1");
    }

    #[test]
    fn empty_bank() {
        let bank = TopicBank::new(TopicId::new("tema2").unwrap(), "", Vec::new());
        assert!(bank.is_empty());
        assert_eq!(bank.len(), 0);
    }
}
