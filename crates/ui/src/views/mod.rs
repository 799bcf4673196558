mod landing;
mod quiz;
mod state;

pub use landing::LandingView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
