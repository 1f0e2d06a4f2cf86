//! quizreel scene core
//!
//! Entities and the root director of a vertical quiz video: the animated
//! question, one card per answer option, and the reveal/answer sequence.
//! Everything here only builds signals and directors; stepping and baking
//! live in `quizreel-animation-core`.

pub mod card;
pub mod config;
pub mod error;
pub mod quiz;
pub mod scene;
pub mod text;

pub use card::{floating_wave, Card, CardSignals, CardState};
pub use config::{CardStyle, FloatingStyle, SceneAssets, SceneConfig, SceneTiming, TextStyle};
pub use error::{QuizDataError, SceneError};
pub use quiz::{OptionData, QuestionData};
pub use scene::{bake_quiz, QuizRender, QuizScene, SCENE_AUDIO};
pub use text::{AnimatedText, Word};
