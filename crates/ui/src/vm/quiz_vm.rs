use quiz_core::format_elapsed;
use services::QuizEngine;

/// UI intents dispatched from the quiz view to the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizIntent {
    SelectAnswer { index: usize, option: String },
    Validate,
    NextPage,
    PrevPage,
    GotoQuestion(usize),
    Reset,
    ReturnToLanding,
}

/// Letter shown before an option, `a` through `z`.
#[must_use]
pub fn option_letter(index: usize) -> char {
    if index < 26 {
        (b'a' + index as u8) as char
    } else {
        '?'
    }
}

#[must_use]
pub fn timer_label(engine: &QuizEngine) -> String {
    format!("Time: {}", format_elapsed(engine.elapsed_secs()))
}

/// Share of answered questions, 0–100.
#[must_use]
pub fn progress_percent(engine: &QuizEngine) -> f64 {
    let Some(session) = engine.session() else {
        return 0.0;
    };
    if session.total_questions() == 0 {
        return 0.0;
    }
    session.answered_count() as f64 / session.total_questions() as f64 * 100.0
}

#[must_use]
pub fn progress_label(engine: &QuizEngine) -> String {
    format!("Progress: {:.0}%", progress_percent(engine))
}

#[must_use]
pub fn score_label(engine: &QuizEngine) -> String {
    format!("Final score: {:.2}/10", engine.score())
}

#[must_use]
pub fn page_label(engine: &QuizEngine) -> String {
    let (page, total) = engine
        .session()
        .map_or((0, 0), |session| {
            (session.pager().page(), session.pager().total_pages())
        });
    format!("Page {} of {}", page + 1, total.max(1))
}
