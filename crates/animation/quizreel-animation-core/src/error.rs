//! Error types for the animation core.

use crate::director::DirectorState;
use crate::ids::{DirectorId, SignalId};
use quizreel_api_core::ValueKind;

/// Malformed easing-curve tables. Raised at construction, never at evaluation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("easing curve needs at least one control point")]
    Empty,

    #[error("first control point must sit at t = 0, found t = {t}")]
    FirstNotZero { t: f32 },

    #[error("control point {index} is not finite")]
    NonFinite { index: usize },

    #[error("control point {index} has t = {t}, outside [0, 1]")]
    OutOfRange { index: usize, t: f32 },

    #[error("control point {index} has t = {t}, not greater than previous t = {prev}")]
    NotIncreasing { index: usize, prev: f32, t: f32 },
}

/// Failures reported by the host for external effects (audio, scene removal).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    #[error("unknown audio channel '{channel}'")]
    UnknownChannel { channel: String },

    #[error("playback failed on channel '{channel}': {reason}")]
    Playback { channel: String, reason: String },

    #[error("duration of channel '{channel}' is not available")]
    DurationUnavailable { channel: String },

    #[error("unknown scene node '{node}'")]
    UnknownNode { node: String },
}

/// Invalid engine configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("frame rate must be finite and positive, got {value}")]
    InvalidFrameRate { value: f32 },

    #[error("config parse error: {reason}")]
    Parse { reason: String },
}

/// Errors raised by the signal store, directors and the scheduler.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    #[error("director '{label}' is {state:?} and cannot be resumed")]
    DirectorFinished { label: String, state: DirectorState },

    #[error("director {id} is not registered with the scheduler")]
    UnknownDirector { id: DirectorId },

    #[error("director {id} failed: {message}")]
    DirectorFailed { id: DirectorId, message: String },

    #[error("director {id} did not complete within {limit}s")]
    Timeout { id: DirectorId, limit: f32 },

    #[error("signal {id} does not exist in this store")]
    UnknownSignal { id: SignalId },

    #[error("signal '{name}' already exists")]
    DuplicateSignal { name: String },

    #[error("signal '{name}' holds a {actual} value, expected {expected}")]
    SignalKind {
        name: String,
        expected: ValueKind,
        actual: ValueKind,
    },
}
