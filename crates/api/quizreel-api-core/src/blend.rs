//! Blending utilities for value types.
//! - f32 linear interpolation for floats and vector/color components
//! - hold-left step for text (switches only at t >= 1)

/// Linear interpolation for f32
#[inline]
pub fn lerp_f(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Lerp for fixed-size arrays
pub fn lerp_array<const N: usize>(a: &[f32; N], b: &[f32; N], t: f32) -> [f32; N] {
    let mut out = [0.0f32; N];
    for i in 0..N {
        out[i] = lerp_f(a[i], b[i], t);
    }
    out
}

/// Step blending for step-only values: keep `a` until the end of the span.
pub fn step_hold<T: Clone>(a: &T, b: &T, t: f32) -> T {
    if t < 1.0 {
        a.clone()
    } else {
        b.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_floats() {
        assert_eq!(lerp_f(0.0, 2.0, 0.25), 0.5);
        assert_eq!(lerp_f(1.0, 1.0, 0.7), 1.0);
    }

    #[test]
    fn lerp_arrays() {
        let r = lerp_array(&[0.0, 0.0, 0.0, 1.0], &[1.0, 2.0, 3.0, 1.0], 0.5);
        assert_eq!(r, [0.5, 1.0, 1.5, 1.0]);
    }

    #[test]
    fn step_holds_until_end() {
        let a = "left".to_string();
        let b = "right".to_string();
        assert_eq!(step_hold(&a, &b, 0.99), a);
        assert_eq!(step_hold(&a, &b, 1.0), b);
    }
}
