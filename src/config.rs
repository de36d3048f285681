//! Engine tuning loaded from TOML.
//!
//! ```toml
//! starting_points = 50
//! base_points = 10
//! points_per_hint = 2
//! default_initial_unlocked_questions = 2
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::types::Points;

/// Points rules and quiz defaults shared by every session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Balance of a fresh wallet, credited as a single earned transaction.
    pub starting_points: Points,
    /// Fixed reward for a correct answer.
    pub base_points: Points,
    /// Extra reward per hint the question declares.
    pub points_per_hint: Points,
    /// Used by [`crate::quiz::factory::quiz_config`] when no value is given.
    ///
    /// Catalogs deserialized straight into [`crate::quiz::QuizConfig`] do not
    /// see this setting; a missing `initialUnlockedQuestions` there means 2.
    pub default_initial_unlocked_questions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_points: 50,
            base_points: 10,
            points_per_hint: 2,
            default_initial_unlocked_questions: 2,
        }
    }
}

/// Failure to read or parse an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    /// File is not valid config TOML.
    #[error("parsing config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl EngineConfig {
    /// Parse from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&text)?;
        info!(target: "rateviech", path = %path.display(), "loaded engine config");
        Ok(cfg)
    }
}
