use std::fmt;

/// Lifecycle stage of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No topic chosen yet.
    Landing,
    /// A session is being built (bank load + selection in flight).
    Loading,
    /// Questions on screen, answers mutable.
    Active,
    /// Validated: score final, timer frozen.
    Results,
    /// The topic cannot supply a single unseen question.
    Exhausted,
}

impl SessionPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Landing => "landing",
            SessionPhase::Loading => "loading",
            SessionPhase::Active => "active",
            SessionPhase::Results => "results",
            SessionPhase::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-question state as shown in the answer grid.
///
/// Before validation a question is either `Unanswered` or `Answered`; after
/// validation answered questions resolve to `Correct` or `Incorrect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Unanswered,
    Answered,
    Correct,
    Incorrect,
}

impl QuestionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionStatus::Unanswered => "unanswered",
            QuestionStatus::Answered => "answered",
            QuestionStatus::Correct => "correct",
            QuestionStatus::Incorrect => "incorrect",
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
