//! Per-step context lent to a director while it runs.

use crate::config::{ClockSource, Config};
use crate::director::Director;
use crate::effects::{Effect, EffectHost};
use crate::error::EffectError;
use crate::ids::{DirectorId, IdAllocator};
use crate::outputs::{EventKind, SceneEvent};
use crate::signal::{Readable, Signal, SignalStore, SignalType};

/// Timing of the tick being processed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SceneClock {
    pub frame: u64,
    /// Scene time at the start of the tick.
    pub start: f32,
    pub dt: f32,
    /// Wall-clock seconds since the scheduler was created.
    pub wall: f32,
}

/// A director started from inside a step; the scheduler registers it after the step.
pub(crate) struct PendingSpawn {
    pub id: DirectorId,
    pub director: Director,
    pub budget: f32,
}

pub(crate) fn push_event(events: &mut Vec<SceneEvent>, cap: usize, event: SceneEvent) {
    if events.len() < cap {
        events.push(event);
    } else {
        log::trace!("event cap {cap} reached, dropping {:?}", event.kind);
    }
}

/// Everything a director may touch while it holds the step.
pub struct StepContext<'a> {
    pub store: &'a mut SignalStore,
    host: &'a mut dyn EffectHost,
    ids: &'a mut IdAllocator,
    config: &'a Config,
    events: &'a mut Vec<SceneEvent>,
    clock: SceneClock,
    remaining: f32,
    spawned: Vec<PendingSpawn>,
    cancels: Vec<DirectorId>,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(
        store: &'a mut SignalStore,
        host: &'a mut dyn EffectHost,
        ids: &'a mut IdAllocator,
        config: &'a Config,
        events: &'a mut Vec<SceneEvent>,
        clock: SceneClock,
        budget: f32,
    ) -> Self {
        Self {
            store,
            host,
            ids,
            config,
            events,
            clock,
            remaining: budget,
            spawned: Vec::new(),
            cancels: Vec::new(),
        }
    }

    pub(crate) fn into_requests(self) -> (Vec<PendingSpawn>, Vec<DirectorId>) {
        (self.spawned, self.cancels)
    }

    pub(crate) fn set_remaining(&mut self, budget: f32) {
        self.remaining = budget.max(0.0);
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn clock(&self) -> SceneClock {
        self.clock
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    /// Exact scene time of the operation currently executing.
    pub fn now(&self) -> f32 {
        self.clock.start + (self.clock.dt - self.remaining).max(0.0)
    }

    /// Time used by phase-driven loops, per [`ClockSource`].
    pub fn phase_time(&self) -> f32 {
        match self.config.clock {
            ClockSource::Simulated => self.now(),
            ClockSource::WallClock => self.clock.wall,
        }
    }

    pub fn get<T: SignalType>(&self, signal: &Signal<T>) -> T {
        self.store.get(signal)
    }

    pub fn read<T>(&self, readable: &impl Readable<T>) -> T {
        self.store.read(readable)
    }

    pub fn set<T: SignalType>(&mut self, signal: &Signal<T>, value: T) {
        self.store.set(signal, value);
    }

    pub fn record(&mut self, kind: EventKind) {
        let event = SceneEvent {
            time: self.now(),
            frame: self.clock.frame,
            kind,
        };
        push_event(self.events, self.config.max_events_per_tick, event);
    }

    /// Hand an effect to the host. Failures are logged and recorded, never propagated.
    pub fn issue(&mut self, effect: Effect) {
        match self.host.apply(&effect) {
            Ok(()) => self.record(EventKind::Effect(effect)),
            Err(err) => {
                log::warn!("effect {effect:?} failed at t={:.3}: {err}", self.now());
                self.record(EventKind::EffectFailed {
                    effect,
                    message: err.to_string(),
                });
            }
        }
    }

    pub fn audio_duration(&self, channel: &str) -> Result<f32, EffectError> {
        self.host.audio_duration(channel)
    }

    /// Start `director` concurrently. It begins in this step with the current remaining budget.
    pub fn spawn(&mut self, director: Director) -> DirectorId {
        let id = self.ids.alloc_director();
        self.record(EventKind::DirectorSpawned {
            id,
            label: director.label().to_string(),
        });
        self.spawned.push(PendingSpawn {
            id,
            director,
            budget: self.remaining,
        });
        id
    }

    /// Request cancellation; applied once the current director yields.
    pub fn cancel(&mut self, id: DirectorId) {
        if let Some(pos) = self.spawned.iter().position(|p| p.id == id) {
            let mut pending = self.spawned.remove(pos);
            pending.director.cancel(self.store);
            self.record(EventKind::DirectorCancelled { id });
            return;
        }
        self.cancels.push(id);
    }
}
