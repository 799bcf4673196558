use thiserror::Error;

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt must not be empty")]
    EmptyPrompt,

    #[error("question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option text must not be empty")]
    EmptyOption,

    #[error("answer does not match any option")]
    AnswerNotInOptions,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// The option order is the presentation order. The answer is compared by
/// value, so reordering the options never changes which one is correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    answer: String,
}

impl Question {
    /// Builds a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is empty, fewer than two options
    /// are given, an option is empty, or the answer matches no option.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }
        if options.iter().any(|option| option.trim().is_empty()) {
            return Err(QuestionError::EmptyOption);
        }
        let answer = answer.into();
        if !options.contains(&answer) {
            return Err(QuestionError::AnswerNotInOptions);
        }

        Ok(Self {
            prompt,
            options,
            answer,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns true when the given option text is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }

    /// Returns a copy of this question with its options in the given order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the new order is not a valid option set for
    /// this question (the constructor re-checks every invariant).
    pub fn with_option_order(&self, options: Vec<String>) -> Result<Self, QuestionError> {
        Self::new(self.prompt.clone(), options, self.answer.clone())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn builds_valid_question() {
        let question = Question::new("2 + 2?", options(&["3", "4", "5"]), "4").unwrap();
        assert_eq!(question.prompt(), "2 + 2?");
        assert_eq!(question.options().len(), 3);
        assert!(question.is_correct("4"));
        assert!(!question.is_correct("3"));
    }

    #[test]
    fn rejects_empty_prompt() {
        let err = Question::new("   ", options(&["a", "b"]), "a").unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new("q", options(&["only"]), "only").unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { len: 1 });
    }

    #[test]
    fn rejects_answer_outside_options() {
        let err = Question::new("q", options(&["a", "b"]), "c").unwrap_err();
        assert_eq!(err, QuestionError::AnswerNotInOptions);
    }

    #[test]
    fn reordered_options_keep_the_answer() {
        let question = Question::new("q", options(&["a", "b", "c"]), "b").unwrap();
        let reordered = question
            .with_option_order(options(&["c", "b", "a"]))
            .unwrap();
        assert_eq!(reordered.answer(), "b");
        assert!(reordered.is_correct("b"));
    }

    #[test]
    fn reorder_rejects_foreign_options() {
        let question = Question::new("q", options(&["a", "b"]), "a").unwrap();
        let err = question.with_option_order(options(&["x", "y"])).unwrap_err();
        assert_eq!(err, QuestionError::AnswerNotInOptions);
    }
}
