use std::sync::Arc;

use services::QuizService;

/// Shared handle to the quiz services, provided by the composition root
/// (`crates/app`) when the desktop app launches.
#[derive(Clone)]
pub struct AppContext {
    quiz: Arc<QuizService>,
}

impl AppContext {
    #[must_use]
    pub fn new(quiz: Arc<QuizService>) -> Self {
        Self { quiz }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
