#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use error::SessionError;
pub use sessions::{BuiltSession, LoadTicket, QuizEngine, QuizService, QuizSession, Selection};
