use std::collections::HashMap;

use quiz_core::model::{Question, QuestionStatus, SessionPhase, TopicId};
use quiz_core::{Pager, QuizTimer, ScorePolicy, score};

use crate::error::SessionError;

/// One quiz attempt: the selected questions, the answer map, the derived
/// score, and the timer and page state.
///
/// A session is either active (answers mutable) or validated (score final,
/// timer frozen). Validation is irreversible; starting over means building
/// a new session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    topic_id: TopicId,
    title: String,
    requested: usize,
    questions: Vec<Question>,
    answers: HashMap<usize, String>,
    score: f64,
    policy: ScorePolicy,
    timer: QuizTimer,
    pager: Pager,
    validated: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(
        topic_id: TopicId,
        title: impl Into<String>,
        requested: usize,
        questions: Vec<Question>,
        page_size: usize,
    ) -> Self {
        let pager = Pager::new(questions.len(), page_size);
        Self {
            topic_id,
            title: title.into(),
            requested,
            questions,
            answers: HashMap::new(),
            score: 0.0,
            policy: ScorePolicy::for_question_count(requested),
            timer: QuizTimer::new(),
            pager,
            validated: false,
        }
    }

    //
    // ─── PROJECTIONS ───────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The exam size the learner asked for; the served size may be smaller
    /// when the pool runs short.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn selected_option(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn policy(&self) -> ScorePolicy {
        self.policy
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.validated {
            SessionPhase::Results
        } else {
            SessionPhase::Active
        }
    }

    #[must_use]
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Questions on the current page, in presentation order.
    #[must_use]
    pub fn page_questions(&self) -> &[Question] {
        &self.questions[self.pager.page_range()]
    }

    /// Linear index of the first question on the current page.
    #[must_use]
    pub fn page_offset(&self) -> usize {
        self.pager.page_range().start
    }

    /// Status of a question as shown in the answer grid: before validation
    /// answered/unanswered, afterwards correct/incorrect/unanswered.
    #[must_use]
    pub fn question_status(&self, index: usize) -> QuestionStatus {
        let selected = self.answers.get(&index);
        if !self.validated {
            return if selected.is_some() {
                QuestionStatus::Answered
            } else {
                QuestionStatus::Unanswered
            };
        }
        match (selected, self.questions.get(index)) {
            (Some(option), Some(question)) if question.is_correct(option) => {
                QuestionStatus::Correct
            }
            (Some(_), _) => QuestionStatus::Incorrect,
            (None, _) => QuestionStatus::Unanswered,
        }
    }

    //
    // ─── MUTATIONS ─────────────────────────────────────────────────────────
    //

    /// Select or toggle an answer.
    ///
    /// Selecting the already-chosen option deselects it; selecting another
    /// replaces it. The score is recomputed on every mutation, and the very
    /// first answer of the session starts the timer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Validated` after validation and
    /// `SessionError::QuestionOutOfRange` for an unknown question index.
    pub fn select_answer(&mut self, index: usize, option: &str) -> Result<(), SessionError> {
        if self.validated {
            return Err(SessionError::Validated);
        }
        if index >= self.questions.len() {
            return Err(SessionError::QuestionOutOfRange { index });
        }

        if self.answers.is_empty() && !self.timer.is_running() {
            self.timer.start();
        }

        if self.selected_option(index) == Some(option) {
            self.answers.remove(&index);
        } else {
            self.answers.insert(index, option.to_string());
        }

        self.recompute_score();
        Ok(())
    }

    /// Freeze the session: stop the timer and fix the final score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Validated` when called twice.
    pub fn validate(&mut self) -> Result<(), SessionError> {
        if self.validated {
            return Err(SessionError::Validated);
        }
        self.timer.stop();
        self.recompute_score();
        self.validated = true;
        Ok(())
    }

    /// Advance the timer by one second; a no-op unless it is running.
    pub fn tick(&mut self) -> bool {
        self.timer.tick()
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        self.pager.set_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev_page()
    }

    /// Jump to the page owning the given question.
    pub fn goto_question(&mut self, index: usize) -> bool {
        self.pager.goto_item(index)
    }

    fn recompute_score(&mut self) {
        self.score = score(&self.questions, &self.answers, self.policy);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
