use std::collections::BTreeSet;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use quiz_core::model::{TopicId, TopicSummary};
use storage::repository::{BankRepository, ExclusionRepository};

use crate::error::SessionError;
use crate::sessions::engine::{BuiltSession, QuizEngine};
use crate::sessions::select;
use crate::sessions::session::QuizSession;

/// Builds sessions against the durable stores.
///
/// A build never mutates existing state: it loads, draws, persists the
/// updated exclusion history, and hands back a fully constructed
/// `BuiltSession` for the engine to swap in. Bank load failures route to the
/// exhausted outcome and exclusion-store failures degrade to an empty
/// history — neither blocks the learner.
#[derive(Clone)]
pub struct QuizService {
    banks: Arc<dyn BankRepository>,
    exclusions: Arc<dyn ExclusionRepository>,
    page_size: usize,
}

impl QuizService {
    #[must_use]
    pub fn new(
        banks: Arc<dyn BankRepository>,
        exclusions: Arc<dyn ExclusionRepository>,
    ) -> Self {
        Self {
            banks,
            exclusions,
            page_size: QuizEngine::DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// List the available topics for the picker.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the bank source cannot be listed.
    pub async fn topics(&self) -> Result<Vec<TopicSummary>, SessionError> {
        Ok(self.banks.list_topics().await?)
    }

    /// Build a session for the topic using a thread-local rng.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionCount` for a zero request.
    pub async fn build_session(
        &self,
        topic_id: TopicId,
        requested: usize,
    ) -> Result<BuiltSession, SessionError> {
        self.build_session_with_rng(topic_id, requested, &mut rand::rng())
            .await
    }

    /// Build a session with a caller-provided rng (deterministic in tests).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionCount` for a zero request.
    pub async fn build_session_with_rng<R: Rng + ?Sized>(
        &self,
        topic_id: TopicId,
        requested: usize,
        rng: &mut R,
    ) -> Result<BuiltSession, SessionError> {
        if requested == 0 {
            return Err(SessionError::InvalidQuestionCount { requested });
        }

        let bank = match self.banks.load_bank(&topic_id).await {
            Ok(bank) => bank,
            Err(err) => {
                warn!(topic = %topic_id, error = %err, "bank load failed, treating pool as empty");
                return Ok(BuiltSession::Exhausted {
                    topic_id,
                    title: String::new(),
                    requested,
                });
            }
        };

        let prior = match self.exclusions.load_used(&topic_id).await {
            Ok(used) => used,
            Err(err) => {
                warn!(topic = %topic_id, error = %err, "exclusion history unavailable, starting from empty");
                BTreeSet::new()
            }
        };

        let selection = select::draw(&bank, &prior, requested, rng)?;
        if selection.is_empty() {
            // Exhausted on entry. The history is deliberately left untouched
            // for this cycle.
            return Ok(BuiltSession::Exhausted {
                topic_id,
                title: bank.title().to_string(),
                requested,
            });
        }

        let next_history = selection.updated_history(&prior);
        if let Err(err) = self.exclusions.save_used(&topic_id, &next_history).await {
            warn!(topic = %topic_id, error = %err, "exclusion history not persisted");
        }

        debug!(
            topic = %topic_id,
            served = selection.len(),
            history_reset = selection.history_reset(),
            "session drawn"
        );

        let title = bank.title().to_string();
        Ok(BuiltSession::Ready(QuizSession::new(
            topic_id,
            title,
            requested,
            selection.into_questions(),
            self.page_size,
        )))
    }

    /// The reset flow: discard the topic's exclusion history, then build a
    /// fresh session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionCount` for a zero request.
    pub async fn reset_session(
        &self,
        topic_id: TopicId,
        requested: usize,
    ) -> Result<BuiltSession, SessionError> {
        if let Err(err) = self.exclusions.clear_used(&topic_id).await {
            warn!(topic = %topic_id, error = %err, "exclusion history not cleared");
        }
        self.build_session(topic_id, requested).await
    }
}
