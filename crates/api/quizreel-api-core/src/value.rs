//! Value: runtime instances stored in signal slots.
//! All numeric types use f32.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Coarse kind of a [`Value`], used to check typed handles against slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    ColorRgba,
    Vec2,
    Text,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Float => "float",
            ValueKind::ColorRgba => "color",
            ValueKind::Vec2 => "vec2",
            ValueKind::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// RGBA color, components in [0,1]
    ColorRgba([f32; 4]),

    /// 2D vector
    Vec2([f32; 2]),

    /// Text / string; step-only for interpolation
    Text(String),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::ColorRgba(_) => ValueKind::ColorRgba,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Plain 2D vector used for positions, offsets and non-uniform scale.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same value on both axes (uniform scale).
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Value::Vec2([v.x, v.y])
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::ColorRgba(c.to_array())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}
