use thiserror::Error;
use url::Url;

/// Number of questions in a round unless configured otherwise.
pub const DEFAULT_ROUND_LENGTH: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    api_base_url: Option<String>,
    api_key: Option<String>,
    round_length: usize,
}

#[derive(Clone, Debug, Default)]
pub struct QuizSettingsDraft {
    pub api_base_url: Option<String>,
    pub api_key: Option<String>,
    pub round_length: Option<usize>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("invalid base URL")]
    InvalidBaseUrl,
    #[error("round length must be at least 1")]
    InvalidRoundLength,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the base URL is present but invalid, or the
    /// round length is zero.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let api_base_url = normalize_optional(self.api_base_url);
        let api_key = normalize_optional(self.api_key);
        let round_length = self.round_length.unwrap_or(DEFAULT_ROUND_LENGTH);

        if let Some(url) = api_base_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(SettingsError::InvalidBaseUrl);
            }
        }
        if round_length == 0 {
            return Err(SettingsError::InvalidRoundLength);
        }

        Ok(QuizSettings {
            api_base_url,
            api_key,
            round_length,
        })
    }
}

impl QuizSettings {
    #[must_use]
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn round_length(&self) -> usize {
        self.round_length
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            api_key: None,
            round_length: DEFAULT_ROUND_LENGTH,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_normalize_to_none() {
        let settings = QuizSettingsDraft {
            api_base_url: Some("   ".into()),
            api_key: Some(" key ".into()),
            round_length: None,
        }
        .validate()
        .unwrap();

        assert_eq!(settings.api_base_url(), None);
        assert_eq!(settings.api_key(), Some("key"));
        assert_eq!(settings.round_length(), DEFAULT_ROUND_LENGTH);
    }

    #[test]
    fn rejects_bad_url_and_zero_round() {
        let bad_url = QuizSettingsDraft {
            api_base_url: Some("not a url".into()),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(bad_url.validate(), Err(SettingsError::InvalidBaseUrl));

        let zero = QuizSettingsDraft {
            round_length: Some(0),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(zero.validate(), Err(SettingsError::InvalidRoundLength));
    }
}
