use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for a topic (one question bank).
///
/// Topics are named after their bank file, e.g. `tema3`, so the identifier is
/// a non-empty trimmed string rather than a numeric row id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopicId(String);

impl TopicId {
    /// Creates a new `TopicId` from a non-empty string.
    ///
    /// # Errors
    ///
    /// Returns `ParseTopicIdError` if the value is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseTopicIdError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ParseTopicIdError);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a `TopicId` from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTopicIdError;

impl fmt::Display for ParseTopicIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "topic id must not be empty")
    }
}

impl std::error::Error for ParseTopicIdError {}

impl FromStr for TopicId {
    type Err = ParseTopicIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_id_display() {
        let id = TopicId::new("tema1").unwrap();
        assert_eq!(id.to_string(), "tema1");
    }

    #[test]
    fn topic_id_trims_whitespace() {
        let id = TopicId::new("  tema2  ").unwrap();
        assert_eq!(id.as_str(), "tema2");
    }

    #[test]
    fn topic_id_rejects_empty() {
        assert!(TopicId::new("   ").is_err());
        assert!("".parse::<TopicId>().is_err());
    }

    #[test]
    fn topic_id_roundtrip() {
        let original = TopicId::new("tema4").unwrap();
        let parsed: TopicId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}
