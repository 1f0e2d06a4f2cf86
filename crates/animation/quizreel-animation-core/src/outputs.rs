//! Output contracts from the scheduler.
//!
//! Every tick produces a [`TickReport`]: the frame/time it covers and the
//! semantic events raised while stepping directors. Signal values are not
//! duplicated here; read them from the store (or bake them).

use serde::{Deserialize, Serialize};

use crate::effects::Effect;
use crate::ids::DirectorId;

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EventKind {
    DirectorSpawned {
        id: DirectorId,
        label: String,
    },
    DirectorCompleted {
        id: DirectorId,
    },
    DirectorCancelled {
        id: DirectorId,
    },
    DirectorFailed {
        id: DirectorId,
        message: String,
    },
    /// An effect the host accepted.
    Effect(Effect),
    /// An effect the host rejected; the director kept running.
    EffectFailed {
        effect: Effect,
        message: String,
    },
}

/// Event stamped with the exact scene time it happened at (may fall between frames).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneEvent {
    pub time: f32,
    pub frame: u64,
    pub kind: EventKind,
}

/// Result of one scheduler tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub frame: u64,
    /// Scene time at the end of the tick.
    pub time: f32,
    pub dt: f32,
    pub events: Vec<SceneEvent>,
    /// Directors still registered after the tick.
    pub active: usize,
}

impl TickReport {
    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.events.iter().filter_map(|e| match &e.kind {
            EventKind::Effect(effect) => Some(effect),
            _ => None,
        })
    }
}
