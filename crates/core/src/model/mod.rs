mod game_result;
mod question;
mod settings;
mod statistics;

pub use game_result::GameResult;
pub use question::Question;
pub use settings::{DEFAULT_ROUND_LENGTH, QuizSettings, QuizSettingsDraft, SettingsError};
pub use statistics::{StatisticsKey, StatisticsRecord};
