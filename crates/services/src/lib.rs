#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod game;
pub mod loader;
pub mod movies;
pub mod quiz_services;
pub mod statistics_service;

pub use quiz_core::Clock;

pub use config::QuizConfig;
pub use error::{GameError, LoadError, QuizServicesError, StatisticsError};
pub use game::{NextScreen, QuizGameService, QuizStep, RoundAnswer, RoundSummary};
pub use loader::{QuestionLoader, StaticQuestionLoader};
pub use movies::{MovieQuestionFactory, MoviesClient, MoviesQuestionLoader};
pub use quiz_services::QuizServices;
pub use statistics_service::StatisticsService;
