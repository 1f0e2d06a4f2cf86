//! Directors: suspendable programs of tweens, waits, effects and child directors.
//!
//! A director is an explicit state machine. The scheduler hands it a time budget
//! each step; operations consume budget in order, and whatever an operation does
//! not need flows to the next one in the same step. A director yields only when
//! an operation needs more time than is left (tween, wait, awaited child).

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::context::StepContext;
use crate::easing::Easing;
use crate::effects::Effect;
use crate::error::AnimationError;
use crate::ids::DirectorId;
use crate::signal::{Signal, SignalStore, SignalType};
use crate::tween::{Tween, Wait};

/// Slack used when comparing budgets against remaining durations.
pub const TIME_EPSILON: f32 = 1e-5;

/// Outcome of resuming an action for one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Progress {
    /// Consumed the whole budget and needs more time.
    Running,
    /// Finished; `leftover` seconds of the budget are unused.
    Complete { leftover: f32 },
}

/// A resumable unit of work inside a director.
pub trait Action {
    fn resume(
        &mut self,
        ctx: &mut StepContext<'_>,
        budget: f32,
    ) -> Result<Progress, AnimationError>;

    /// Called when the owning director is cancelled mid-action.
    fn cancel(&mut self, _store: &mut SignalStore) {}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorState {
    Pending,
    Running,
    Completed,
    Cancelled,
}

type CallFn = Box<dyn FnOnce(&mut StepContext<'_>)>;
type CancelHook = Box<dyn FnOnce(&mut SignalStore)>;

enum Step {
    Action(Box<dyn Action>),
    Command(Effect),
    Call(CallFn),
    Spawn(Director, Option<HandleSlot>),
}

/// Shared cell a spawner can read later to cancel what it spawned.
#[derive(Clone, Debug, Default)]
pub struct HandleSlot(Rc<Cell<Option<DirectorId>>>);

impl HandleSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<DirectorId> {
        self.0.get()
    }

    pub fn set(&self, id: DirectorId) {
        self.0.set(Some(id));
    }

    pub fn take(&self) -> Option<DirectorId> {
        self.0.take()
    }
}

pub struct Director {
    label: String,
    steps: VecDeque<Step>,
    current: Option<Box<dyn Action>>,
    state: DirectorState,
    on_cancel: Option<CancelHook>,
}

impl fmt::Debug for Director {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Director")
            .field("label", &self.label)
            .field("state", &self.state)
            .field("queued_steps", &self.steps.len())
            .field("busy", &self.current.is_some())
            .finish()
    }
}

impl Director {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steps: VecDeque::new(),
            current: None,
            state: DirectorState::Pending,
            on_cancel: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> DirectorState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            DirectorState::Completed | DirectorState::Cancelled
        )
    }

    /// Append an arbitrary action.
    pub fn then(mut self, action: impl Action + 'static) -> Self {
        self.steps.push_back(Step::Action(Box::new(action)));
        self
    }

    pub fn tween<T: SignalType>(self, signal: Signal<T>, to: T, duration: f32) -> Self {
        self.then(Tween::new(signal, to, duration))
    }

    pub fn tween_eased<T: SignalType>(
        self,
        signal: Signal<T>,
        to: T,
        duration: f32,
        easing: Easing,
    ) -> Self {
        self.then(Tween::new(signal, to, duration).with_easing(easing))
    }

    pub fn wait(self, seconds: f32) -> Self {
        self.then(Wait::new(seconds))
    }

    /// Issue an external effect; takes no time.
    pub fn command(mut self, effect: Effect) -> Self {
        self.steps.push_back(Step::Command(effect));
        self
    }

    /// Run an internal side effect with access to the step context; takes no time.
    pub fn call(mut self, f: impl FnOnce(&mut StepContext<'_>) + 'static) -> Self {
        self.steps.push_back(Step::Call(Box::new(f)));
        self
    }

    /// Run `child` to completion before continuing.
    pub fn run(self, child: Director) -> Self {
        self.then(child)
    }

    /// Start `child` concurrently and continue immediately.
    pub fn spawn(mut self, child: Director) -> Self {
        self.steps.push_back(Step::Spawn(child, None));
        self
    }

    /// Like [`Director::spawn`], storing the child's id in `slot` once it starts.
    pub fn spawn_into(mut self, child: Director, slot: &HandleSlot) -> Self {
        self.steps
            .push_back(Step::Spawn(child, Some(slot.clone())));
        self
    }

    /// Run every child in parallel and continue when the last one completes.
    pub fn all(self, children: Vec<Director>) -> Self {
        self.then(AllOf::new(children))
    }

    /// Hook run once if this director is cancelled before completing.
    pub fn on_cancel(mut self, hook: impl FnOnce(&mut SignalStore) + 'static) -> Self {
        self.on_cancel = Some(Box::new(hook));
        self
    }

    /// Advance by at most `budget` seconds.
    pub fn resume(
        &mut self,
        ctx: &mut StepContext<'_>,
        budget: f32,
    ) -> Result<Progress, AnimationError> {
        if self.is_finished() {
            return Err(AnimationError::DirectorFinished {
                label: self.label.clone(),
                state: self.state,
            });
        }
        self.state = DirectorState::Running;
        let mut budget = budget.max(0.0);
        loop {
            ctx.set_remaining(budget);
            if let Some(action) = self.current.as_mut() {
                match action.resume(ctx, budget)? {
                    Progress::Running => return Ok(Progress::Running),
                    Progress::Complete { leftover } => {
                        self.current = None;
                        budget = leftover.max(0.0);
                        continue;
                    }
                }
            }
            match self.steps.pop_front() {
                None => {
                    self.state = DirectorState::Completed;
                    return Ok(Progress::Complete { leftover: budget });
                }
                Some(Step::Action(action)) => self.current = Some(action),
                Some(Step::Command(effect)) => ctx.issue(effect),
                Some(Step::Call(f)) => f(ctx),
                Some(Step::Spawn(child, slot)) => {
                    let id = ctx.spawn(child);
                    if let Some(slot) = slot {
                        slot.set(id);
                    }
                }
            }
        }
    }

    /// Stop this director, cancelling its current child and running the reset hook.
    pub fn cancel(&mut self, store: &mut SignalStore) {
        if self.is_finished() {
            return;
        }
        if let Some(mut action) = self.current.take() {
            action.cancel(store);
        }
        self.steps.clear();
        if let Some(hook) = self.on_cancel.take() {
            hook(store);
        }
        self.state = DirectorState::Cancelled;
    }
}

impl Action for Director {
    fn resume(
        &mut self,
        ctx: &mut StepContext<'_>,
        budget: f32,
    ) -> Result<Progress, AnimationError> {
        Director::resume(self, ctx, budget)
    }

    fn cancel(&mut self, store: &mut SignalStore) {
        Director::cancel(self, store);
    }
}

/// Parallel group; completes when every child has.
struct AllOf {
    children: Vec<Option<Director>>,
}

impl AllOf {
    fn new(children: Vec<Director>) -> Self {
        Self {
            children: children.into_iter().map(Some).collect(),
        }
    }
}

impl Action for AllOf {
    fn resume(
        &mut self,
        ctx: &mut StepContext<'_>,
        budget: f32,
    ) -> Result<Progress, AnimationError> {
        let mut running = false;
        // Smallest leftover among children finishing now = latest finish time.
        let mut leftover = budget;
        for slot in self.children.iter_mut() {
            let Some(child) = slot.as_mut() else {
                continue;
            };
            ctx.set_remaining(budget);
            match child.resume(ctx, budget)? {
                Progress::Running => running = true,
                Progress::Complete { leftover: rest } => {
                    leftover = leftover.min(rest);
                    *slot = None;
                }
            }
        }
        if running {
            Ok(Progress::Running)
        } else {
            Ok(Progress::Complete { leftover })
        }
    }

    fn cancel(&mut self, store: &mut SignalStore) {
        for child in self.children.iter_mut().flatten() {
            child.cancel(store);
        }
    }
}
