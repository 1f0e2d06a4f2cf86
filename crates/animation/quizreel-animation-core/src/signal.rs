//! Signal store: named value slots driven by tweens, plus pull-based derived reads.
//!
//! - `Signal<T>` is a writable handle to one slot.
//! - `Derived<T>` wraps a closure over the store and is recomputed on every read.
//!   It has no write API, so a derived value can never be assigned.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use hashbrown::HashMap;
use quizreel_api_core::blend::{lerp_array, lerp_f, step_hold};
use quizreel_api_core::{Color, Value, ValueKind, Vec2};

use crate::error::AnimationError;
use crate::ids::SignalId;

/// Rust types that can live in a signal slot.
pub trait SignalType: Clone + PartialEq + fmt::Debug + Default + 'static {
    const KIND: ValueKind;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;

    /// Interpolate between `from` and `to` at progress `t` (may leave [0,1] for overshooting easings).
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self;
}

impl SignalType for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }

    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        lerp_f(*from, *to, t)
    }
}

impl SignalType for Vec2 {
    const KIND: ValueKind = ValueKind::Vec2;

    fn into_value(self) -> Value {
        Value::Vec2([self.x, self.y])
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vec2([x, y]) => Some(Vec2::new(*x, *y)),
            _ => None,
        }
    }

    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        let [x, y] = lerp_array(&[from.x, from.y], &[to.x, to.y], t);
        Vec2::new(x, y)
    }
}

impl SignalType for Color {
    const KIND: ValueKind = ValueKind::ColorRgba;

    fn into_value(self) -> Value {
        Value::ColorRgba(self.to_array())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::ColorRgba(c) => Some(Color::from_array(*c)),
            _ => None,
        }
    }

    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        Color::from_array(lerp_array(&from.to_array(), &to.to_array(), t))
    }
}

impl SignalType for String {
    const KIND: ValueKind = ValueKind::Text;

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(str::to_string)
    }

    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        step_hold(from, to, t)
    }
}

/// Writable handle to a slot in a [`SignalStore`].
pub struct Signal<T> {
    id: SignalId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Signal<T> {
    fn new(id: SignalId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> SignalId {
        self.id
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> PartialEq for Signal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Signal<T> {}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signal({})", self.id)
    }
}

/// Read-only value computed from other signals each time it is read.
pub struct Derived<T> {
    compute: Rc<dyn Fn(&SignalStore) -> T>,
}

impl<T> Derived<T> {
    pub fn new(compute: impl Fn(&SignalStore) -> T + 'static) -> Self {
        Self {
            compute: Rc::new(compute),
        }
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            compute: Rc::clone(&self.compute),
        }
    }
}

impl<T> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Derived(..)")
    }
}

/// Anything whose current value can be read from a store.
pub trait Readable<T> {
    fn read_from(&self, store: &SignalStore) -> T;
}

impl<T: SignalType> Readable<T> for Signal<T> {
    fn read_from(&self, store: &SignalStore) -> T {
        store.get(self)
    }
}

impl<T> Readable<T> for Derived<T> {
    fn read_from(&self, store: &SignalStore) -> T {
        (self.compute)(store)
    }
}

#[derive(Debug, Clone)]
struct SignalSlot {
    name: String,
    value: Value,
    initial: Value,
}

/// Owner of every source signal's current value.
#[derive(Debug, Default)]
pub struct SignalStore {
    slots: Vec<SignalSlot>,
    by_name: HashMap<String, SignalId>,
}

impl SignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source signal with a unique name and an initial value.
    pub fn create<T: SignalType>(
        &mut self,
        name: impl Into<String>,
        initial: T,
    ) -> Result<Signal<T>, AnimationError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(AnimationError::DuplicateSignal { name });
        }
        let id = SignalId(self.slots.len() as u32);
        let value = initial.into_value();
        self.slots.push(SignalSlot {
            name: name.clone(),
            initial: value.clone(),
            value,
        });
        self.by_name.insert(name, id);
        Ok(Signal::new(id))
    }

    /// Build a derived signal from a closure over this store.
    pub fn derive<T>(&self, compute: impl Fn(&SignalStore) -> T + 'static) -> Derived<T> {
        Derived::new(compute)
    }

    pub fn try_get<T: SignalType>(&self, signal: &Signal<T>) -> Result<T, AnimationError> {
        let slot = self
            .slots
            .get(signal.id.0 as usize)
            .ok_or(AnimationError::UnknownSignal { id: signal.id })?;
        T::from_value(&slot.value).ok_or_else(|| AnimationError::SignalKind {
            name: slot.name.clone(),
            expected: T::KIND,
            actual: slot.value.kind(),
        })
    }

    /// Current value of a source signal. A handle from another store reads as `T::default()`.
    pub fn get<T: SignalType>(&self, signal: &Signal<T>) -> T {
        self.try_get(signal).unwrap_or_else(|err| {
            log::warn!("signal read failed: {err}");
            T::default()
        })
    }

    /// Current value of a source or derived signal.
    pub fn read<T>(&self, readable: &impl Readable<T>) -> T {
        readable.read_from(self)
    }

    pub fn set<T: SignalType>(&mut self, signal: &Signal<T>, value: T) {
        match self.slots.get_mut(signal.id.0 as usize) {
            Some(slot) => slot.value = value.into_value(),
            None => log::warn!("write to unknown {}", signal.id),
        }
    }

    /// Restore a signal to the value it was created with.
    pub fn reset<T: SignalType>(&mut self, signal: &Signal<T>) {
        if let Some(slot) = self.slots.get_mut(signal.id.0 as usize) {
            slot.value = slot.initial.clone();
        }
    }

    /// Look up a typed handle by name; `None` if absent or of another kind.
    pub fn find<T: SignalType>(&self, name: &str) -> Option<Signal<T>> {
        let id = *self.by_name.get(name)?;
        let slot = self.slots.get(id.0 as usize)?;
        (slot.value.kind() == T::KIND).then(|| Signal::new(id))
    }

    pub fn name(&self, id: SignalId) -> Option<&str> {
        self.slots.get(id.0 as usize).map(|s| s.name.as_str())
    }

    pub fn value(&self, id: SignalId) -> Option<&Value> {
        self.slots.get(id.0 as usize).map(|s| &s.value)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate `(id, name, value)` in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (SignalId, &str, &Value)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (SignalId(i as u32), s.name.as_str(), &s.value))
    }

    /// Owned `(name, value)` pairs in creation order.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.slots
            .iter()
            .map(|s| (s.name.clone(), s.value.clone()))
            .collect()
    }
}
