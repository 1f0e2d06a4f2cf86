//! quizreel animation core (renderer-agnostic)
//!
//! Signals hold the current value of every animatable property. Directors are
//! suspendable programs (tweens, waits, effects, child directors) stepped by a
//! single-threaded [`Scheduler`] with exact time-budget accounting, so a scene
//! can be baked into a deterministic per-frame timeline.

pub mod baking;
pub mod config;
pub mod context;
pub mod director;
pub mod easing;
pub mod effects;
pub mod error;
pub mod ids;
pub mod looping;
pub mod outputs;
pub mod scheduler;
pub mod signal;
pub mod stagger;
pub mod tween;

// Re-exports for consumers (scene crates, hosts)
pub use baking::{bake, export_baked_json, BakedTimeline, BakedTrack, BakingConfig};
pub use config::{ClockSource, Config};
pub use context::{SceneClock, StepContext};
pub use director::{Action, Director, DirectorState, HandleSlot, Progress, TIME_EPSILON};
pub use easing::{reveal_pop, ControlPoint, Easing, EasingCurve, REVEAL_POP_POINTS};
pub use effects::{Effect, EffectHost, NullHost, RecordingHost};
pub use error::{AnimationError, ConfigError, CurveError, EffectError};
pub use ids::{DirectorId, IdAllocator, SignalId};
pub use looping::{every_frame, looping, repeat};
pub use outputs::{EventKind, SceneEvent, TickReport};
pub use scheduler::Scheduler;
pub use signal::{Derived, Readable, Signal, SignalStore, SignalType};
pub use stagger::{emphasize, pulse, stagger_sequential};
pub use tween::{tween, wait, Tween, Wait};
pub use quizreel_api_core::{Color, Value, ValueKind, Vec2};
