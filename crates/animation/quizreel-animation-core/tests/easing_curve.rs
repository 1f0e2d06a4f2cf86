use quizreel_animation_core::{reveal_pop, ControlPoint, CurveError, Easing, EasingCurve};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn three_point_curve_interpolates_segments() {
    let curve = EasingCurve::from_pairs(&[[0.0, 0.0], [0.5, 1.0], [1.0, 0.5]]).unwrap();
    assert_eq!(curve.evaluate(0.25), 0.5);
    assert_eq!(curve.evaluate(0.75), 0.75);
    assert_eq!(curve.evaluate(0.5), 1.0);
    assert_eq!(curve.evaluate(1.0), 0.5);
}

#[test]
fn out_of_range_inputs_clamp() {
    let curve = EasingCurve::from_pairs(&[[0.0, 0.0], [0.5, 1.0], [1.0, 0.5]]).unwrap();
    assert_eq!(curve.evaluate(-0.3), 0.0);
    assert_eq!(curve.evaluate(1.5), 0.5);
    assert_eq!(curve.evaluate(f32::INFINITY), 0.5);
}

#[test]
fn unit_endpoints_are_exact() {
    let curve = EasingCurve::from_pairs(&[[0.0, 0.0], [0.3, 0.8], [1.0, 1.0]]).unwrap();
    assert_eq!(curve.evaluate(0.0), 0.0);
    assert_eq!(curve.evaluate(1.0), 1.0);

    let pop = reveal_pop();
    assert_eq!(pop.evaluate(0.0), 0.0);
    assert_eq!(pop.evaluate(1.0), 1.0);
}

#[test]
fn single_point_curve_is_constant() {
    let curve = EasingCurve::new(vec![ControlPoint::new(0.0, 0.7)]).unwrap();
    assert_eq!(curve.evaluate(0.0), 0.7);
    assert_eq!(curve.evaluate(0.4), 0.7);
    assert_eq!(curve.evaluate(2.0), 0.7);
}

#[test]
fn monotonic_segment_gives_monotonic_output() {
    // The pop table rises monotonically up to t = 0.45414.
    let pop = reveal_pop();
    let mut prev = pop.evaluate(0.0);
    for i in 1..=450 {
        let v = pop.evaluate(i as f32 / 1000.0);
        assert!(v >= prev, "dip at t={}: {} < {}", i as f32 / 1000.0, v, prev);
        prev = v;
    }
}

#[test]
fn pop_overshoots_then_settles() {
    let pop = Easing::reveal_pop();
    assert!(pop.apply(0.45414) > 1.5);
    assert!(approx(pop.apply(0.8), 1.0608, 1e-3));
    assert_eq!(pop.apply(1.0), 1.0);
}

#[test]
fn malformed_tables_fail_at_construction() {
    assert_eq!(EasingCurve::new(vec![]).unwrap_err(), CurveError::Empty);
    assert_eq!(
        EasingCurve::from_pairs(&[[0.1, 0.0], [1.0, 1.0]]).unwrap_err(),
        CurveError::FirstNotZero { t: 0.1 }
    );
    assert_eq!(
        EasingCurve::from_pairs(&[[0.0, 0.0], [0.5, 0.2], [0.5, 0.9]]).unwrap_err(),
        CurveError::NotIncreasing {
            index: 2,
            prev: 0.5,
            t: 0.5
        }
    );
    assert_eq!(
        EasingCurve::from_pairs(&[[0.0, 0.0], [1.2, 1.0]]).unwrap_err(),
        CurveError::OutOfRange { index: 1, t: 1.2 }
    );
    assert_eq!(
        EasingCurve::from_pairs(&[[0.0, 0.0], [0.5, f32::NAN]]).unwrap_err(),
        CurveError::NonFinite { index: 1 }
    );
}

#[test]
fn linear_easing_is_identity() {
    assert_eq!(Easing::Linear.apply(0.37), 0.37);
    assert_eq!(Easing::default(), Easing::Linear);
}
