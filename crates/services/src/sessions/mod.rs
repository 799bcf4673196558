mod engine;
mod select;
mod service;
mod session;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use engine::{BuiltSession, LoadTicket, QuizEngine};
pub use select::{Selection, draw};
pub use service::QuizService;
pub use session::QuizSession;
