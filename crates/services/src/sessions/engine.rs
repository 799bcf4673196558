use quiz_core::model::{Question, QuestionStatus, SessionPhase, TopicId};

use crate::error::SessionError;
use crate::sessions::session::QuizSession;

/// Ticket issued by `begin_loading`. `install` only commits a build whose
/// ticket is still current, so a load that finishes after the learner moved
/// on is discarded instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
}

/// Outcome of an asynchronous session build.
#[derive(Debug, Clone, PartialEq)]
pub enum BuiltSession {
    Ready(QuizSession),
    /// The topic could not supply a single question.
    Exhausted {
        topic_id: TopicId,
        title: String,
        requested: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Flow {
    Landing,
    Loading {
        topic_id: TopicId,
        requested: usize,
    },
    Session(QuizSession),
    Exhausted {
        topic_id: TopicId,
        title: String,
        requested: usize,
    },
}

/// The session phase machine: `Landing → Loading → {Active | Exhausted} →
/// Results`, with `Results/Exhausted → Loading` on reset and `→ Landing` on
/// return to start.
///
/// The engine itself is fully synchronous. The async session build runs
/// outside and is committed through `install`, so a failed or stale build
/// never disturbs the state the learner is looking at.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizEngine {
    flow: Flow,
    epoch: u64,
    page_size: usize,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEngine {
    pub const DEFAULT_PAGE_SIZE: usize = 5;

    #[must_use]
    pub fn new() -> Self {
        Self {
            flow: Flow::Landing,
            epoch: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
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

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match &self.flow {
            Flow::Landing => SessionPhase::Landing,
            Flow::Loading { .. } => SessionPhase::Loading,
            Flow::Session(session) => session.phase(),
            Flow::Exhausted { .. } => SessionPhase::Exhausted,
        }
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.flow, Flow::Exhausted { .. })
    }

    #[must_use]
    pub fn topic_id(&self) -> Option<&TopicId> {
        match &self.flow {
            Flow::Landing => None,
            Flow::Loading { topic_id, .. } | Flow::Exhausted { topic_id, .. } => Some(topic_id),
            Flow::Session(session) => Some(session.topic_id()),
        }
    }

    #[must_use]
    pub fn requested(&self) -> Option<usize> {
        match &self.flow {
            Flow::Landing => None,
            Flow::Loading { requested, .. } | Flow::Exhausted { requested, .. } => {
                Some(*requested)
            }
            Flow::Session(session) => Some(session.requested()),
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match &self.flow {
            Flow::Landing | Flow::Loading { .. } => None,
            Flow::Session(session) => Some(session.title()),
            Flow::Exhausted { title, .. } => Some(title),
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.flow {
            Flow::Session(session) => Some(session),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut QuizSession> {
        match &mut self.flow {
            Flow::Session(session) => Some(session),
            _ => None,
        }
    }

    //
    // ─── LIFECYCLE ─────────────────────────────────────────────────────────
    //

    /// Enter the loading phase for a topic and issue a load ticket.
    ///
    /// Valid from any phase: starting over mid-session simply supersedes the
    /// current state, and the epoch bump invalidates any build still in
    /// flight for the previous request.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionCount` when `requested` is zero.
    pub fn begin_loading(
        &mut self,
        topic_id: TopicId,
        requested: usize,
    ) -> Result<LoadTicket, SessionError> {
        if requested == 0 {
            return Err(SessionError::InvalidQuestionCount { requested });
        }
        self.epoch += 1;
        self.flow = Flow::Loading {
            topic_id,
            requested,
        };
        Ok(LoadTicket { epoch: self.epoch })
    }

    /// Commit a finished build. Returns false (leaving the engine untouched)
    /// when the ticket is stale or the engine is no longer loading.
    pub fn install(&mut self, ticket: LoadTicket, built: BuiltSession) -> bool {
        if ticket.epoch != self.epoch || !matches!(self.flow, Flow::Loading { .. }) {
            return false;
        }
        self.flow = match built {
            BuiltSession::Ready(session) => Flow::Session(session),
            BuiltSession::Exhausted {
                topic_id,
                title,
                requested,
            } => Flow::Exhausted {
                topic_id,
                title,
                requested,
            },
        };
        true
    }

    /// Drop everything and go back to the topic picker. Also invalidates any
    /// in-flight load ticket.
    pub fn return_to_landing(&mut self) {
        self.epoch += 1;
        self.flow = Flow::Landing;
    }

    //
    // ─── SESSION OPERATIONS ────────────────────────────────────────────────
    //

    /// Select or toggle an answer on the active session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside a session, or the session's
    /// own rejection.
    pub fn select_answer(&mut self, index: usize, option: &str) -> Result<(), SessionError> {
        self.session_mut()
            .ok_or(SessionError::NotActive)?
            .select_answer(index, option)
    }

    /// Validate the active session, freezing its score and timer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside a session, or
    /// `SessionError::Validated` when already validated.
    pub fn validate(&mut self) -> Result<(), SessionError> {
        self.session_mut()
            .ok_or(SessionError::NotActive)?
            .validate()
    }

    /// Advance the session timer by one second if it is running.
    pub fn tick(&mut self) -> bool {
        self.session_mut().is_some_and(QuizSession::tick)
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        self.session_mut()
            .is_some_and(|session| session.set_page(page))
    }

    pub fn next_page(&mut self) -> bool {
        self.session_mut().is_some_and(QuizSession::next_page)
    }

    pub fn prev_page(&mut self) -> bool {
        self.session_mut().is_some_and(QuizSession::prev_page)
    }

    pub fn goto_question(&mut self, index: usize) -> bool {
        self.session_mut()
            .is_some_and(|session| session.goto_question(index))
    }

    //
    // ─── PROJECTIONS ───────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn score(&self) -> f64 {
        self.session().map_or(0.0, QuizSession::score)
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.session().map_or(0, QuizSession::elapsed_secs)
    }

    #[must_use]
    pub fn page_questions(&self) -> &[Question] {
        match self.session() {
            Some(session) => session.page_questions(),
            None => &[],
        }
    }

    #[must_use]
    pub fn question_status(&self, index: usize) -> QuestionStatus {
        self.session()
            .map_or(QuestionStatus::Unanswered, |session| {
                session.question_status(index)
            })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
