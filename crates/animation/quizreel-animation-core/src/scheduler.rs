//! Scheduler: owns the signal store and steps every active director once per tick.

use std::collections::VecDeque;
use std::time::Instant;

use indexmap::IndexMap;

use crate::config::Config;
use crate::context::{push_event, SceneClock, StepContext};
use crate::director::{Director, Progress};
use crate::effects::{EffectHost, NullHost};
use crate::error::{AnimationError, ConfigError};
use crate::ids::{DirectorId, IdAllocator};
use crate::outputs::{EventKind, SceneEvent, TickReport};
use crate::signal::SignalStore;

/// Single-threaded cooperative scheduler.
///
/// Directors run round-robin in registration order. A director spawned during
/// a tick starts in that same tick with its spawner's remaining budget.
#[derive(Debug)]
pub struct Scheduler<H: EffectHost = NullHost> {
    cfg: Config,
    store: SignalStore,
    ids: IdAllocator,
    active: IndexMap<DirectorId, Director>,
    host: H,
    frame: u64,
    time: f32,
    wall_origin: Instant,
    /// Events raised outside a tick (external spawn/cancel); flushed into the next report.
    pending: Vec<SceneEvent>,
}

impl Scheduler<NullHost> {
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        Self::with_host(cfg, NullHost)
    }
}

impl<H: EffectHost> Scheduler<H> {
    pub fn with_host(cfg: Config, host: H) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            store: SignalStore::new(),
            ids: IdAllocator::new(),
            active: IndexMap::new(),
            host,
            frame: 0,
            time: 0.0,
            wall_origin: Instant::now(),
            pending: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn store(&self) -> &SignalStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SignalStore {
        &mut self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Number of completed ticks.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Scene time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_active(&self, id: DirectorId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    fn external_event(&mut self, kind: EventKind) {
        let event = SceneEvent {
            time: self.time,
            frame: self.frame,
            kind,
        };
        push_event(&mut self.pending, self.cfg.max_events_per_tick, event);
    }

    /// Register a top-level director; it first runs on the next tick.
    pub fn spawn(&mut self, director: Director) -> DirectorId {
        let id = self.ids.alloc_director();
        log::debug!("spawn {id} '{}'", director.label());
        self.external_event(EventKind::DirectorSpawned {
            id,
            label: director.label().to_string(),
        });
        self.active.insert(id, director);
        id
    }

    /// Cancel immediately and run the reset hook. Unknown ids are a no-op returning `false`.
    pub fn cancel(&mut self, id: DirectorId) -> bool {
        match self.active.shift_remove(&id) {
            Some(mut director) => {
                director.cancel(&mut self.store);
                log::debug!("cancel {id} '{}'", director.label());
                self.external_event(EventKind::DirectorCancelled { id });
                true
            }
            None => {
                log::warn!("cancel of unknown {id}");
                false
            }
        }
    }

    /// Advance one frame at the configured frame rate.
    pub fn step_frame(&mut self) -> TickReport {
        let dt = self.cfg.frame_dt();
        self.tick(dt)
    }

    /// Advance scene time by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let clock = SceneClock {
            frame: self.frame,
            start: self.time,
            dt,
            wall: self.wall_origin.elapsed().as_secs_f32(),
        };
        let cap = self.cfg.max_events_per_tick;
        let mut events = std::mem::take(&mut self.pending);
        let mut queue: VecDeque<(DirectorId, f32)> =
            self.active.keys().map(|id| (*id, dt)).collect();

        while let Some((id, budget)) = queue.pop_front() {
            let Some(director) = self.active.get_mut(&id) else {
                continue;
            };
            let mut ctx = StepContext::new(
                &mut self.store,
                &mut self.host,
                &mut self.ids,
                &self.cfg,
                &mut events,
                clock,
                budget,
            );
            let result = director.resume(&mut ctx, budget);
            let (spawned, cancels) = ctx.into_requests();

            match result {
                Ok(Progress::Running) => {}
                Ok(Progress::Complete { leftover }) => {
                    if let Some(done) = self.active.shift_remove(&id) {
                        log::debug!("complete {id} '{}'", done.label());
                    }
                    let event = SceneEvent {
                        time: clock.start + (dt - leftover).max(0.0),
                        frame: clock.frame,
                        kind: EventKind::DirectorCompleted { id },
                    };
                    push_event(&mut events, cap, event);
                }
                Err(err) => {
                    if let Some(mut failed) = self.active.shift_remove(&id) {
                        failed.cancel(&mut self.store);
                    }
                    log::warn!("{id} failed: {err}");
                    let event = SceneEvent {
                        time: clock.start,
                        frame: clock.frame,
                        kind: EventKind::DirectorFailed {
                            id,
                            message: err.to_string(),
                        },
                    };
                    push_event(&mut events, cap, event);
                }
            }

            for pending in spawned {
                log::debug!("spawn {} '{}'", pending.id, pending.director.label());
                self.active.insert(pending.id, pending.director);
                queue.push_back((pending.id, pending.budget));
            }

            for target in cancels {
                if let Some(mut director) = self.active.shift_remove(&target) {
                    director.cancel(&mut self.store);
                    log::debug!("cancel {target} '{}'", director.label());
                    let event = SceneEvent {
                        time: clock.start + dt,
                        frame: clock.frame,
                        kind: EventKind::DirectorCancelled { id: target },
                    };
                    push_event(&mut events, cap, event);
                } else {
                    log::warn!("cancel of unknown {target} requested by {id}");
                }
            }
        }

        self.frame += 1;
        self.time = clock.start + dt;
        log::trace!(
            "tick {} t={:.4} dt={dt:.4} active={} events={}",
            clock.frame,
            self.time,
            self.active.len(),
            events.len()
        );
        TickReport {
            frame: clock.frame,
            time: self.time,
            dt,
            events,
            active: self.active.len(),
        }
    }

    /// Step frames until `id` leaves the active set, or fail after `max_duration` seconds.
    pub fn run_until_complete(
        &mut self,
        id: DirectorId,
        max_duration: f32,
    ) -> Result<Vec<SceneEvent>, AnimationError> {
        if !self.is_active(id) {
            return Err(AnimationError::UnknownDirector { id });
        }
        let start = self.time;
        let mut collected = Vec::new();
        while self.is_active(id) {
            if self.time - start >= max_duration {
                return Err(AnimationError::Timeout {
                    id,
                    limit: max_duration,
                });
            }
            let report = self.step_frame();
            collected.extend(report.events);
        }
        let failure = collected.iter().find_map(|e| match &e.kind {
            EventKind::DirectorFailed { id: failed, message } if *failed == id => {
                Some(message.clone())
            }
            _ => None,
        });
        match failure {
            Some(message) => Err(AnimationError::DirectorFailed { id, message }),
            None => Ok(collected),
        }
    }

    /// Resume a director that is not registered here, against this scheduler's
    /// store and host. Anything it spawns is registered as a top-level director.
    pub fn resume_detached(
        &mut self,
        director: &mut Director,
        budget: f32,
    ) -> Result<Progress, AnimationError> {
        let clock = SceneClock {
            frame: self.frame,
            start: self.time,
            dt: budget,
            wall: self.wall_origin.elapsed().as_secs_f32(),
        };
        let mut events = std::mem::take(&mut self.pending);
        let mut ctx = StepContext::new(
            &mut self.store,
            &mut self.host,
            &mut self.ids,
            &self.cfg,
            &mut events,
            clock,
            budget,
        );
        let result = director.resume(&mut ctx, budget);
        let (spawned, cancels) = ctx.into_requests();
        self.pending = events;
        for pending in spawned {
            self.active.insert(pending.id, pending.director);
        }
        for target in cancels {
            self.cancel(target);
        }
        result
    }
}
