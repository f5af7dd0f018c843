#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod model;
pub mod time;

pub use engine::{AnswerOutcome, QuizEngine, RoundState};
pub use error::Error;
pub use time::Clock;
