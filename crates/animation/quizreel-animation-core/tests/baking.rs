use quizreel_animation_core::{
    bake, every_frame, export_baked_json, AnimationError, BakingConfig, Config, Director, Easing,
    Effect, RecordingHost, Scheduler, Value,
};

fn build() -> (Scheduler<RecordingHost>, Director) {
    let mut sched = Scheduler::with_host(Config::default(), RecordingHost::new()).unwrap();
    let opacity = sched.store_mut().create("card/opacity", 0.0f32).unwrap();
    let scale = sched.store_mut().create("card/scale", 0.0f32).unwrap();
    let bob = sched.store_mut().create("card/bob", 0.0f32).unwrap();
    let root = Director::new("root")
        .tween(opacity, 1.0, 0.5)
        .command(Effect::play("card/sfx"))
        .tween_eased(scale, 1.0, 0.25, Easing::reveal_pop())
        .spawn(every_frame("bob", move |ctx| {
            let t = ctx.phase_time();
            ctx.set(&bob, (t * std::f32::consts::TAU).sin() * 0.1);
        }))
        .wait(0.25);
    (sched, root)
}

#[test]
fn baking_is_deterministic() {
    let cfg = BakingConfig {
        frame_rate: 30.0,
        ..Default::default()
    };
    let (mut a, root_a) = build();
    let (mut b, root_b) = build();
    let first = bake(&mut a, root_a, &cfg).unwrap();
    let second = bake(&mut b, root_b, &cfg).unwrap();
    assert_eq!(first, second);
    assert!(first.completed);
}

#[test]
fn frame_zero_is_initial_state() {
    let (mut sched, root) = build();
    let cfg = BakingConfig {
        frame_rate: 10.0,
        max_duration: 10.0,
    };
    let baked = bake(&mut sched, root, &cfg).unwrap();

    // 0.5 + 0.25 + 0.25 seconds at 10 Hz plus the initial frame
    assert_eq!(baked.frame_count(), 11);
    let opacity = baked.track("card/opacity").unwrap();
    assert_eq!(opacity.values[0], Value::Float(0.0));
    assert_eq!(opacity.values[5], Value::Float(1.0));
    let scale = baked.track("card/scale").unwrap();
    assert_eq!(scale.values.last(), Some(&Value::Float(1.0)));
    assert_eq!(sched.host().plays_on("card/sfx"), 1);
}

#[test]
fn time_limit_stops_bake() {
    let mut sched = Scheduler::new(Config::default()).unwrap();
    let root = Director::new("long").wait(100.0);
    let cfg = BakingConfig {
        frame_rate: 10.0,
        max_duration: 1.0,
    };
    let baked = bake(&mut sched, root, &cfg).unwrap();
    assert!(!baked.completed);
    assert!(baked.duration >= 1.0 - 1e-4);
}

#[test]
fn failing_root_is_reported() {
    let mut sched = Scheduler::new(Config::default()).unwrap();
    let mut other = quizreel_animation_core::SignalStore::new();
    let foreign = other.create("elsewhere", 1.0f32).unwrap();
    let root = Director::new("bad").tween(foreign, 2.0, 0.1);
    let err = bake(&mut sched, root, &BakingConfig::default()).unwrap_err();
    assert!(matches!(err, AnimationError::DirectorFailed { .. }));
}

#[test]
fn export_has_tracks_and_events() {
    let (mut sched, root) = build();
    let baked = bake(&mut sched, root, &BakingConfig::default()).unwrap();
    let json = export_baked_json(&baked);
    assert_eq!(json["frame_rate"], serde_json::json!(60.0));
    assert_eq!(json["tracks"].as_array().map(|t| t.len()), Some(3));
    assert!(json["events"].as_array().is_some_and(|e| !e.is_empty()));
}
