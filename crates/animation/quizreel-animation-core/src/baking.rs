//! Baking API: step a scheduler at a fixed rate and record every signal per frame.

use serde::{Deserialize, Serialize};

use crate::director::Director;
use crate::effects::EffectHost;
use crate::error::AnimationError;
use crate::outputs::{EventKind, SceneEvent};
use crate::scheduler::Scheduler;
use quizreel_api_core::Value;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BakingConfig {
    /// Target frame rate (Hz) for baked samples.
    pub frame_rate: f32,
    /// Upper bound on baked scene time, in seconds.
    pub max_duration: f32,
}

impl Default for BakingConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            max_duration: 600.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedTrack {
    /// Signal name (e.g. `card0/scale`).
    pub name: String,
    /// One value per frame; frame 0 is the state before the first tick.
    pub values: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedTimeline {
    pub frame_rate: f32,
    /// Scene time when the root director completed (or the limit was hit).
    pub duration: f32,
    /// False if `max_duration` was reached before the root completed.
    pub completed: bool,
    pub tracks: Vec<BakedTrack>,
    pub events: Vec<SceneEvent>,
}

impl BakedTimeline {
    pub fn frame_count(&self) -> usize {
        self.tracks.first().map(|t| t.values.len()).unwrap_or(0)
    }

    pub fn track(&self, name: &str) -> Option<&BakedTrack> {
        self.tracks.iter().find(|t| t.name == name)
    }
}

/// Spawn `root` on `scheduler` and record all signals until it completes.
///
/// Fails if the root director itself fails.
///
/// Directors spawned by `root` that outlive it (e.g. floating loops) keep
/// running until the root completes and are then left registered.
pub fn bake<H: EffectHost>(
    scheduler: &mut Scheduler<H>,
    root: Director,
    cfg: &BakingConfig,
) -> Result<BakedTimeline, AnimationError> {
    let sr = if cfg.frame_rate.is_finite() && cfg.frame_rate > 0.0 {
        cfg.frame_rate
    } else {
        60.0
    };
    let dt = 1.0 / sr;
    let max_duration = cfg.max_duration.max(0.0);

    let mut tracks: Vec<BakedTrack> = scheduler
        .store()
        .iter()
        .map(|(_, name, value)| BakedTrack {
            name: name.to_string(),
            values: vec![value.clone()],
        })
        .collect();

    let start = scheduler.time();
    let root_id = scheduler.spawn(root);
    let mut events = Vec::new();
    let mut completed = true;

    while scheduler.is_active(root_id) {
        if scheduler.time() - start >= max_duration {
            log::warn!("bake stopped at {max_duration}s before {root_id} completed");
            completed = false;
            break;
        }
        let report = scheduler.tick(dt);
        events.extend(report.events);
        for (track, (_, _, value)) in tracks.iter_mut().zip(scheduler.store().iter()) {
            track.values.push(value.clone());
        }
    }

    if let Some(message) = events.iter().find_map(|e| match &e.kind {
        EventKind::DirectorFailed { id, message } if *id == root_id => Some(message.clone()),
        _ => None,
    }) {
        return Err(AnimationError::DirectorFailed {
            id: root_id,
            message,
        });
    }

    Ok(BakedTimeline {
        frame_rate: sr,
        duration: scheduler.time() - start,
        completed,
        tracks,
        events,
    })
}

/// Export baked data as serde_json::Value (stable schema for serialization).
pub fn export_baked_json(baked: &BakedTimeline) -> serde_json::Value {
    serde_json::to_value(baked).unwrap_or(serde_json::Value::Null)
}
