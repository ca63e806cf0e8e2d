use serde::{Deserialize, Serialize};
use thiserror::Error;

use assess_core::model::Difficulty;

/// Default global question cap per session.
pub const DEFAULT_MAX_QUESTIONS: u32 = 25;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_questions must be positive")]
    ZeroMaxQuestions,
}

/// Tunable session parameters.
///
/// Deployments have run with caps of 15 and 25 questions; the cap is a
/// configuration constant, not engine logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionConfig")]
pub struct SessionConfig {
    max_questions: u32,
    initial_difficulty: Difficulty,
}

/// Unvalidated mirror of [`SessionConfig`] used during deserialization.
#[derive(Deserialize)]
struct RawSessionConfig {
    max_questions: u32,
    initial_difficulty: Difficulty,
}

impl TryFrom<RawSessionConfig> for SessionConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSessionConfig) -> Result<Self, Self::Error> {
        Self::new(raw.max_questions, raw.initial_difficulty)
    }
}

impl SessionConfig {
    /// Create a config with an explicit question cap and starting tier.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroMaxQuestions` if the cap is zero.
    pub fn new(max_questions: u32, initial_difficulty: Difficulty) -> Result<Self, ConfigError> {
        if max_questions == 0 {
            return Err(ConfigError::ZeroMaxQuestions);
        }
        Ok(Self {
            max_questions,
            initial_difficulty,
        })
    }

    /// Replace the question cap.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroMaxQuestions` if the cap is zero.
    pub fn with_max_questions(self, max_questions: u32) -> Result<Self, ConfigError> {
        Self::new(max_questions, self.initial_difficulty)
    }

    /// Replace the tier every competency starts at.
    #[must_use]
    pub fn with_initial_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.initial_difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    #[must_use]
    pub fn initial_difficulty(&self) -> Difficulty {
        self.initial_difficulty
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            initial_difficulty: Difficulty::Beginner,
        }
    }
}
