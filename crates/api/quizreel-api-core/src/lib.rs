//! quizreel-api-core: value kinds shared by the animation core and scene layer.
//!
//! Signals store their current value as a [`Value`]; typed handles convert to and
//! from the concrete Rust types (`f32`, [`Color`], `String`, [`Vec2`]).

pub mod blend;
pub mod color;
pub mod value;

pub use color::{Color, ColorParseError};
pub use value::{Value, ValueKind, Vec2};
