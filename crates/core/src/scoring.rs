use std::collections::HashMap;

use crate::model::Question;

/// Reward/penalty pair applied to each answered question.
///
/// The table is keyed by the *requested* exam size: a 25-question exam pays
/// +0.40 per correct answer and charges 0.20 per mistake, every other size
/// pays +0.50 and charges 0.25. Both rows top out at 10.0 for a full exam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePolicy {
    reward: f64,
    penalty: f64,
}

impl ScorePolicy {
    const LARGE_EXAM: usize = 25;

    #[must_use]
    pub fn for_question_count(requested: usize) -> Self {
        if requested == Self::LARGE_EXAM {
            Self {
                reward: 0.40,
                penalty: 0.20,
            }
        } else {
            Self {
                reward: 0.50,
                penalty: 0.25,
            }
        }
    }

    #[must_use]
    pub fn reward(&self) -> f64 {
        self.reward
    }

    #[must_use]
    pub fn penalty(&self) -> f64 {
        self.penalty
    }
}

/// Computes the session score from the current answer map.
///
/// Unanswered questions contribute nothing; the result never goes below
/// zero. This is a derived value: callers recompute it after every answer
/// mutation instead of storing partial sums.
#[must_use]
pub fn score(
    questions: &[Question],
    answers: &HashMap<usize, String>,
    policy: ScorePolicy,
) -> f64 {
    let mut total = 0.0;
    for (index, question) in questions.iter().enumerate() {
        match answers.get(&index) {
            Some(option) if question.is_correct(option) => total += policy.reward(),
            Some(_) => total -= policy.penalty(),
            None => {}
        }
    }
    total.max(0.0)
}
