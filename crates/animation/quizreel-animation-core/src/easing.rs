//! Easing: piecewise-linear control-point curves plus linear and cubic-bezier timing.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub t: f32,
    pub v: f32,
}

impl ControlPoint {
    pub const fn new(t: f32, v: f32) -> Self {
        Self { t, v }
    }
}

/// Ordered `(t, v)` table. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ControlPoint>", into = "Vec<ControlPoint>")]
pub struct EasingCurve {
    points: Vec<ControlPoint>,
}

impl EasingCurve {
    /// Validates that the table is non-empty, starts at t = 0, stays finite and inside
    /// [0, 1], and has strictly increasing times.
    pub fn new(points: Vec<ControlPoint>) -> Result<Self, CurveError> {
        let first = points.first().ok_or(CurveError::Empty)?;
        if first.t != 0.0 {
            return Err(CurveError::FirstNotZero { t: first.t });
        }
        let mut prev: Option<f32> = None;
        for (index, p) in points.iter().enumerate() {
            if !p.t.is_finite() || !p.v.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if !(0.0..=1.0).contains(&p.t) {
                return Err(CurveError::OutOfRange { index, t: p.t });
            }
            if let Some(prev) = prev {
                if p.t <= prev {
                    return Err(CurveError::NotIncreasing {
                        index,
                        prev,
                        t: p.t,
                    });
                }
            }
            prev = Some(p.t);
        }
        Ok(Self { points })
    }

    pub fn from_pairs(pairs: &[[f32; 2]]) -> Result<Self, CurveError> {
        Self::new(
            pairs
                .iter()
                .map(|[t, v]| ControlPoint::new(*t, *v))
                .collect(),
        )
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Map raw progress to eased progress.
    ///
    /// `t < 0` clamps to the first point, `t` past the last point returns its value.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.max(0.0) };
        let mut prev: Option<&ControlPoint> = None;
        for p in &self.points {
            if t <= p.t {
                if t == p.t {
                    return p.v;
                }
                return match prev {
                    Some(a) => a.v + (p.v - a.v) * (t - a.t) / (p.t - a.t),
                    None => p.v,
                };
            }
            prev = Some(p);
        }
        // non-empty by construction
        self.points.last().map(|p| p.v).unwrap_or(1.0)
    }
}

impl TryFrom<Vec<ControlPoint>> for EasingCurve {
    type Error = CurveError;

    fn try_from(points: Vec<ControlPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<EasingCurve> for Vec<ControlPoint> {
    fn from(curve: EasingCurve) -> Self {
        curve.points
    }
}

/// Overshooting "pop" used when a card grows into view.
pub const REVEAL_POP_POINTS: [[f32; 2]; 20] = [
    [0.0, 0.0],
    [0.06536, 0.2849],
    [0.09, 0.37313],
    [0.11097, 0.4482],
    [0.15494, 0.58908],
    [0.18, 0.65439],
    [0.20293, 0.71415],
    [0.25264, 0.82601],
    [0.28, 0.87351],
    [0.3035, 0.91431],
    [0.35341, 0.98312],
    [0.38, 1.01],
    [0.40406, 1.33431],
    [0.45414, 1.56873],
    [0.48, 1.08004],
    [0.50577, 1.09132],
    [0.54887, 1.10074],
    [0.585, 1.0998],
    [0.67972, 1.09736],
    [1.0, 1.0],
];

static REVEAL_POP: Lazy<Arc<EasingCurve>> = Lazy::new(|| {
    // Table is validated by `reveal_pop_table_is_valid`.
    Arc::new(EasingCurve {
        points: REVEAL_POP_POINTS
            .iter()
            .map(|[t, v]| ControlPoint::new(*t, *v))
            .collect(),
    })
});

/// Shared handle to the reveal pop curve.
pub fn reveal_pop() -> Arc<EasingCurve> {
    Arc::clone(&REVEAL_POP)
}

#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// CSS-style timing function: invert x(s) by binary search, then evaluate y(s).
#[inline]
fn bezier_ease_t(t: f32, [x1, y1, x2, y2]: [f32; 4]) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Timing applied to a tween's raw progress.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    Curve(Arc<EasingCurve>),
    CubicBezier([f32; 4]),
}

impl Easing {
    pub fn reveal_pop() -> Self {
        Easing::Curve(reveal_pop())
    }

    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Curve(curve) => curve.evaluate(t),
            Easing::CubicBezier(ctrl) => bezier_ease_t(t, *ctrl),
        }
    }
}

impl From<EasingCurve> for Easing {
    fn from(curve: EasingCurve) -> Self {
        Easing::Curve(Arc::new(curve))
    }
}
