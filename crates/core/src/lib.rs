#![forbid(unsafe_code)]

pub mod model;
pub mod navigation;
pub mod scoring;
pub mod timer;

pub use model::{
    ParseTopicIdError, Question, QuestionError, QuestionStatus, SessionPhase, TopicBank, TopicId,
    TopicSummary,
};
pub use navigation::Pager;
pub use scoring::{ScorePolicy, score};
pub use timer::{QuizTimer, format_elapsed};
