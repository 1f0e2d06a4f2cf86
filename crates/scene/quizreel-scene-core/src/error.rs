//! Error types for the quiz scene layer.

use quizreel_animation_core::{AnimationError, ConfigError};
use quizreel_api_core::ColorParseError;

/// Malformed quiz content. Raised when loading, before any scene is built.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QuizDataError {
    #[error("quiz parse error: {reason}")]
    Parse { reason: String },

    #[error("quiz has no options")]
    NoOptions,

    #[error("correct answer index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },

    #[error("output file name '{name}' must be a bare '.mp4' file name")]
    BadFileName { name: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error(transparent)]
    Quiz(#[from] QuizDataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error("invalid color in scene config: {0}")]
    Color(#[from] ColorParseError),
}
