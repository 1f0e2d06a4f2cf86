//! Tween and wait actions.

use crate::context::StepContext;
use crate::director::{Action, Director, Progress, TIME_EPSILON};
use crate::easing::Easing;
use crate::error::AnimationError;
use crate::signal::{Signal, SignalType};

/// Animates one signal from its value at first sample to `to` over `duration` seconds.
#[derive(Debug, Clone)]
pub struct Tween<T: SignalType> {
    signal: Signal<T>,
    to: T,
    duration: f32,
    easing: Option<Easing>,
    from: Option<T>,
    elapsed: f32,
}

impl<T: SignalType> Tween<T> {
    pub fn new(signal: Signal<T>, to: T, duration: f32) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            signal,
            to,
            duration,
            easing: None,
            from: None,
            elapsed: 0.0,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

impl<T: SignalType> Action for Tween<T> {
    fn resume(
        &mut self,
        ctx: &mut StepContext<'_>,
        budget: f32,
    ) -> Result<Progress, AnimationError> {
        let from = match &self.from {
            Some(from) => from.clone(),
            None => {
                let from = ctx.store.try_get(&self.signal)?;
                self.from = Some(from.clone());
                from
            }
        };

        let needed = self.duration - self.elapsed;
        if budget + TIME_EPSILON >= needed {
            // terminal sample writes the target exactly
            self.elapsed = self.duration;
            ctx.store.set(&self.signal, self.to.clone());
            return Ok(Progress::Complete {
                leftover: (budget - needed).max(0.0),
            });
        }

        self.elapsed += budget;
        let raw = (self.elapsed / self.duration).min(1.0);
        let eased = match &self.easing {
            Some(easing) => easing.apply(raw),
            None => raw,
        };
        ctx.store
            .set(&self.signal, T::interpolate(&from, &self.to, eased));
        Ok(Progress::Running)
    }
}

/// Suspends for a fixed number of simulated seconds.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    duration: f32,
    elapsed: f32,
}

impl Wait {
    pub fn new(seconds: f32) -> Self {
        let duration = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        Self {
            duration,
            elapsed: 0.0,
        }
    }
}

impl Action for Wait {
    fn resume(
        &mut self,
        _ctx: &mut StepContext<'_>,
        budget: f32,
    ) -> Result<Progress, AnimationError> {
        let needed = self.duration - self.elapsed;
        if budget + TIME_EPSILON >= needed {
            self.elapsed = self.duration;
            return Ok(Progress::Complete {
                leftover: (budget - needed).max(0.0),
            });
        }
        self.elapsed += budget;
        Ok(Progress::Running)
    }
}

/// Single-tween director.
pub fn tween<T: SignalType>(
    signal: Signal<T>,
    to: T,
    duration: f32,
    easing: Option<Easing>,
) -> Director {
    let tween = Tween::new(signal, to, duration);
    let tween = match easing {
        Some(easing) => tween.with_easing(easing),
        None => tween,
    };
    Director::new("tween").then(tween)
}

/// Director that only waits.
pub fn wait(seconds: f32) -> Director {
    Director::new("wait").wait(seconds)
}
