//! Loop controllers: repeated bodies and per-frame callbacks.
//!
//! Loops never end on their own (except [`repeat`]); stop them by cancelling
//! the spawned director's id. Cancellation runs the director's `on_cancel` hook.

use crate::context::StepContext;
use crate::director::{Action, Director, Progress, TIME_EPSILON};
use crate::error::AnimationError;
use crate::signal::SignalStore;

/// Builds a fresh body director for each iteration.
pub struct Loop<F> {
    factory: F,
    iteration: u32,
    limit: Option<u32>,
    current: Option<Director>,
}

impl<F: FnMut(u32) -> Director> Loop<F> {
    pub fn new(factory: F, limit: Option<u32>) -> Self {
        Self {
            factory,
            iteration: 0,
            limit,
            current: None,
        }
    }
}

impl<F: FnMut(u32) -> Director> Action for Loop<F> {
    fn resume(
        &mut self,
        ctx: &mut StepContext<'_>,
        budget: f32,
    ) -> Result<Progress, AnimationError> {
        let mut budget = budget;
        loop {
            if self.current.is_none() && self.limit.is_some_and(|n| self.iteration >= n) {
                return Ok(Progress::Complete { leftover: budget });
            }
            if self.current.is_none() {
                self.current = Some((self.factory)(self.iteration));
            }
            let Some(body) = self.current.as_mut() else {
                return Ok(Progress::Running);
            };
            ctx.set_remaining(budget);
            match body.resume(ctx, budget)? {
                Progress::Running => return Ok(Progress::Running),
                Progress::Complete { leftover } => {
                    self.current = None;
                    self.iteration += 1;
                    if self.limit.is_some_and(|n| self.iteration >= n) {
                        return Ok(Progress::Complete { leftover });
                    }
                    if budget - leftover <= TIME_EPSILON {
                        // zero-time iteration: hold the rest of this step
                        ctx.set_remaining(0.0);
                        return Ok(Progress::Running);
                    }
                    budget = leftover;
                }
            }
        }
    }

    fn cancel(&mut self, store: &mut SignalStore) {
        if let Some(mut body) = self.current.take() {
            body.cancel(store);
        }
    }
}

/// Runs a callback once per scheduler step, forever.
///
/// The callback sees the end of the step as "now", the same instant tweens sample.
pub struct EveryFrame<F> {
    tick: F,
}

impl<F: FnMut(&mut StepContext<'_>)> Action for EveryFrame<F> {
    fn resume(
        &mut self,
        ctx: &mut StepContext<'_>,
        _budget: f32,
    ) -> Result<Progress, AnimationError> {
        ctx.set_remaining(0.0);
        (self.tick)(ctx);
        Ok(Progress::Running)
    }
}

/// Repeat the body produced by `factory` until cancelled.
pub fn looping(
    label: impl Into<String>,
    factory: impl FnMut(u32) -> Director + 'static,
) -> Director {
    Director::new(label).then(Loop::new(factory, None))
}

/// Repeat the body exactly `times` times.
pub fn repeat(
    label: impl Into<String>,
    times: u32,
    factory: impl FnMut(u32) -> Director + 'static,
) -> Director {
    Director::new(label).then(Loop::new(factory, Some(times)))
}

/// Call `tick` once per step, at the step's end time, until cancelled.
pub fn every_frame(
    label: impl Into<String>,
    tick: impl FnMut(&mut StepContext<'_>) + 'static,
) -> Director {
    Director::new(label).then(EveryFrame { tick })
}
