mod service;
mod view;

pub use crate::error::GameError;
pub use service::QuizGameService;
pub use view::{NextScreen, QuizStep, RoundAnswer, RoundSummary};
