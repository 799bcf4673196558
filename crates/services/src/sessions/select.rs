use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

use quiz_core::model::{Question, TopicBank};

use crate::error::SessionError;

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// Result of drawing a session subset from a topic pool.
///
/// `questions` are display copies (options already shuffled) in presentation
/// order; `drawn` holds their positions in the full pool, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    questions: Vec<Question>,
    drawn: Vec<usize>,
    history_reset: bool,
}

impl Selection {
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    /// Pool indices of the drawn questions, in presentation order.
    #[must_use]
    pub fn drawn(&self) -> &[usize] {
        &self.drawn
    }

    /// True when the exclusion history was discarded to fill this draw.
    #[must_use]
    pub fn history_reset(&self) -> bool {
        self.history_reset
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The exclusion set to persist after this draw: the prior history plus
    /// the drawn indices, or just the drawn indices after a history reset.
    #[must_use]
    pub fn updated_history(&self, prior: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut next = if self.history_reset {
            BTreeSet::new()
        } else {
            prior.clone()
        };
        next.extend(self.drawn.iter().copied());
        next
    }
}

/// Draws a non-repeating session of up to `requested` questions.
///
/// Indices already in `excluded` are skipped. When fewer than `requested`
/// unseen questions remain, the whole history is treated as exhausted and
/// the draw restarts from the full pool, so a large-enough pool always
/// serves a full-size session. The shuffled draw order is the presentation
/// order, and each drawn question gets an independently shuffled option
/// order; the answer is tracked by value and survives the reorder.
///
/// # Errors
///
/// Returns `SessionError::InvalidQuestionCount` when `requested` is zero.
/// An empty pool is not an error: it yields an empty selection, which the
/// caller maps to the exhausted phase.
pub fn draw<R: Rng + ?Sized>(
    bank: &TopicBank,
    excluded: &BTreeSet<usize>,
    requested: usize,
    rng: &mut R,
) -> Result<Selection, SessionError> {
    if requested == 0 {
        return Err(SessionError::InvalidQuestionCount { requested });
    }

    let mut available: Vec<usize> = (0..bank.len())
        .filter(|index| !excluded.contains(index))
        .collect();

    let history_reset = available.len() < requested;
    if history_reset {
        available = (0..bank.len()).collect();
    }

    available.shuffle(rng);
    available.truncate(requested);

    let mut questions = Vec::with_capacity(available.len());
    for &index in &available {
        let question = &bank.questions()[index];
        let mut options = question.options().to_vec();
        options.shuffle(rng);
        questions.push(question.with_option_order(options)?);
    }

    Ok(Selection {
        questions,
        drawn: available,
        history_reset,
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::TopicId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn build_bank(size: usize) -> TopicBank {
        let questions = (0..size)
            .map(|i| {
                Question::new(
                    format!("Q{i}"),
                    vec![
                        format!("A{i}"),
                        format!("B{i}"),
                        format!("C{i}"),
                        format!("D{i}"),
                    ],
                    format!("C{i}"),
                )
                .unwrap()
            })
            .collect();
        TopicBank::new(TopicId::new("tema1").unwrap(), "Unit 1", questions)
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn rejects_zero_request() {
        let bank = build_bank(10);
        let err = draw(&bank, &BTreeSet::new(), 0, &mut rng(1)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidQuestionCount { requested: 0 }
        ));
    }

    #[test]
    fn empty_pool_yields_empty_selection() {
        let bank = build_bank(0);
        let selection = draw(&bank, &BTreeSet::new(), 25, &mut rng(1)).unwrap();
        assert!(selection.is_empty());
        assert!(selection.drawn().is_empty());
    }

    #[test]
    fn serves_requested_size_from_fresh_pool() {
        let bank = build_bank(30);
        let selection = draw(&bank, &BTreeSet::new(), 25, &mut rng(2)).unwrap();
        assert_eq!(selection.len(), 25);
        assert!(!selection.history_reset());
    }

    #[test]
    fn small_pool_degrades_to_pool_size() {
        let bank = build_bank(10);
        let selection = draw(&bank, &BTreeSet::new(), 25, &mut rng(3)).unwrap();
        assert_eq!(selection.len(), 10);
    }

    #[test]
    fn drawn_indices_are_unique_and_in_range() {
        let bank = build_bank(30);
        let selection = draw(&bank, &BTreeSet::new(), 25, &mut rng(4)).unwrap();
        let unique: HashSet<usize> = selection.drawn().iter().copied().collect();
        assert_eq!(unique.len(), 25);
        assert!(selection.drawn().iter().all(|&index| index < 30));
    }

    #[test]
    fn excluded_indices_are_never_drawn() {
        let bank = build_bank(30);
        let excluded: BTreeSet<usize> = (0..5).collect();
        let selection = draw(&bank, &excluded, 25, &mut rng(5)).unwrap();
        assert_eq!(selection.len(), 25);
        assert!(
            selection
                .drawn()
                .iter()
                .all(|index| !excluded.contains(index))
        );
    }

    #[test]
    fn questions_match_their_drawn_indices() {
        let bank = build_bank(30);
        let selection = draw(&bank, &BTreeSet::new(), 25, &mut rng(6)).unwrap();
        for (question, &index) in selection.questions().iter().zip(selection.drawn()) {
            assert_eq!(question.prompt(), bank.questions()[index].prompt());
        }
    }

    #[test]
    fn presentation_order_is_shuffled_not_pool_order() {
        let bank = build_bank(30);
        let any_unsorted = (0..20).any(|seed| {
            let selection = draw(&bank, &BTreeSet::new(), 25, &mut rng(seed)).unwrap();
            selection.drawn().windows(2).any(|pair| pair[0] > pair[1])
        });
        assert!(any_unsorted);
    }

    #[test]
    fn option_shuffle_preserves_the_option_set_and_answer() {
        let bank = build_bank(30);
        let selection = draw(&bank, &BTreeSet::new(), 25, &mut rng(7)).unwrap();
        for (question, &index) in selection.questions().iter().zip(selection.drawn()) {
            let original = &bank.questions()[index];

            let mut shuffled: Vec<&str> =
                question.options().iter().map(String::as_str).collect();
            let mut expected: Vec<&str> =
                original.options().iter().map(String::as_str).collect();
            shuffled.sort_unstable();
            expected.sort_unstable();
            assert_eq!(shuffled, expected);

            assert_eq!(question.answer(), original.answer());
            assert!(question.is_correct(original.answer()));
        }
    }

    #[test]
    fn short_availability_resets_history() {
        let bank = build_bank(30);
        let excluded: BTreeSet<usize> = (0..25).collect();

        let selection = draw(&bank, &excluded, 25, &mut rng(8)).unwrap();
        assert!(selection.history_reset());
        assert_eq!(selection.len(), 25);

        // After the reset the persisted history is exactly this draw, not a
        // union with the stale 25 entries.
        let next = selection.updated_history(&excluded);
        assert_eq!(next.len(), 25);
        let drawn: BTreeSet<usize> = selection.drawn().iter().copied().collect();
        assert_eq!(next, drawn);
    }

    #[test]
    fn history_accumulates_across_draws_until_reset() {
        let bank = build_bank(30);

        let first = draw(&bank, &BTreeSet::new(), 10, &mut rng(9)).unwrap();
        let after_first = first.updated_history(&BTreeSet::new());
        assert_eq!(after_first.len(), 10);

        let second = draw(&bank, &after_first, 10, &mut rng(10)).unwrap();
        assert!(!second.history_reset());
        let after_second = second.updated_history(&after_first);
        assert_eq!(after_second.len(), 20);
        assert!(after_first.is_subset(&after_second));
    }
}
