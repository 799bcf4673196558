mod bank;
mod ids;
mod phase;
mod question;

pub use bank::{TopicBank, TopicSummary};
pub use ids::{ParseTopicIdError, TopicId};
pub use phase::{QuestionStatus, SessionPhase};
pub use question::{Question, QuestionError};
