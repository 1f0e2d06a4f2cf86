use quizreel_animation_core::{Color, Config, Effect, EventKind, RecordingHost, Scheduler};
use quizreel_scene_core::{floating_wave, Card, CardState, CardStyle, OptionData, SceneAssets};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn option() -> OptionData {
    OptionData {
        text: "Lionel Messi".into(),
        image_src: "/players/messi.png".into(),
        audio_src: "/tts/messi.mp3".into(),
    }
}

fn setup(host: RecordingHost) -> (Scheduler<RecordingHost>, Card) {
    let mut sched = Scheduler::with_host(Config::default(), host).unwrap();
    let card = Card::new(
        sched.store_mut(),
        "card0",
        &option(),
        &CardStyle::default(),
        &SceneAssets::default(),
    )
    .unwrap();
    let id = sched.spawn(card.setup());
    sched.run_until_complete(id, 1.0).unwrap();
    (sched, card)
}

#[test]
fn initial_values() {
    let (sched, card) = setup(RecordingHost::new());
    let store = sched.store();
    let s = card.signals();
    assert_eq!(store.get(&s.opacity), 0.0);
    assert_eq!(store.get(&s.scale), 0.0);
    assert_eq!(store.get(&s.height), 550.0);
    assert!(approx(store.read(&s.width), 390.5, 1e-3));
    assert_eq!(store.get(&s.card_color), Color::WHITE);
    assert_eq!(store.get(&s.text_color), Color::BLACK);
    assert_eq!(store.get(&s.stroke_color), Color::WHITE);
    assert_eq!(store.get(&s.player_name), "Lionel Messi");
    assert_eq!(card.state(), CardState::Hidden);

    assert_eq!(sched.host().source("card0/sfx"), Some("/pop.mp3"));
    assert_eq!(sched.host().source("card0/tts"), Some("/tts/messi.mp3"));
}

#[test]
fn width_follows_height() {
    let (mut sched, card) = setup(RecordingHost::new());
    let s = card.signals();
    sched.store_mut().set(&s.height, 100.0);
    assert!(approx(sched.store().read(&s.width), 71.0, 1e-4));
}

#[test]
fn reveal_fades_then_pops() {
    let (mut sched, card) = setup(RecordingHost::new());
    let s = card.signals().clone();
    let t0 = sched.time();
    sched.spawn(card.reveal());

    sched.tick(0.25);
    assert!(approx(sched.store().get(&s.opacity), 0.5, 1e-4));
    assert_eq!(sched.store().get(&s.scale), 0.0);
    assert_eq!(card.state(), CardState::Revealing);
    assert!(!sched.host().is_playing("card0/sfx"));

    let report = sched.tick(0.36);
    assert_eq!(sched.store().get(&s.opacity), 1.0);
    assert!(sched.host().is_playing("card0/sfx"));
    assert!(sched.host().is_playing("card0/tts"));
    let played_at: Vec<f32> = report
        .events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Effect(Effect::PlayAudio { .. })))
        .map(|e| e.time)
        .collect();
    assert_eq!(played_at.len(), 2);
    assert!(played_at.iter().all(|t| approx(*t - t0, 0.5, 1e-4)));
    // 0.11s into the grow, the pop curve is overshooting.
    assert!(sched.store().get(&s.scale) > 1.2);

    sched.tick(0.2);
    assert_eq!(sched.store().get(&s.scale), 1.0);
    assert_eq!(card.state(), CardState::Revealed);
}

#[test]
fn answer_switches_sound_grows_and_floats() {
    let (mut sched, card) = setup(RecordingHost::new());
    let s = card.signals().clone();
    sched.store_mut().set(&s.scale, 1.0);
    let t0 = sched.time();
    let id = sched.spawn(card.answer());

    sched.tick(0.25);
    assert_eq!(sched.host().source("card0/sfx"), Some("/applause.mp3"));
    assert!(sched.host().is_playing("card0/tts"));
    assert!(approx(sched.store().get(&s.scale), 1.0, 1e-4));

    sched.tick(0.3);
    assert_eq!(sched.store().get(&s.scale), 2.0);
    assert_eq!(card.state(), CardState::HighlightedFloating);
    let floating = card.floating_handle().unwrap();
    assert!(sched.is_active(floating));
    assert!(sched.is_active(id));

    sched.run_until_complete(id, 5.0).unwrap();
    assert!(approx(sched.time() - t0, 3.5, 0.04));
    assert!(sched.is_active(floating));
}

#[test]
fn stop_floating_resets_offsets_at_any_phase() {
    for frames in [1usize, 7, 13, 28, 44] {
        let (mut sched, card) = setup(RecordingHost::new());
        let s = card.signals().clone();
        sched.spawn(card.start_floating());
        for _ in 0..frames {
            sched.step_frame();
        }
        assert!(sched.store().get(&s.floating_rotation) != 0.0);

        assert!(card.stop_floating(&mut sched));
        assert_eq!(sched.store().get(&s.floating_y), 0.0);
        assert_eq!(sched.store().get(&s.floating_rotation), 0.0);
        assert!(!card.stop_floating(&mut sched));

        sched.step_frame();
        assert_eq!(sched.store().get(&s.floating_y), 0.0);
    }
}

#[test]
fn floating_offsets_follow_scene_time() {
    let (mut sched, card) = setup(RecordingHost::new());
    let s = card.signals().clone();
    sched.spawn(card.start_floating());
    for _ in 0..15 {
        sched.step_frame();
        let wave = floating_wave(sched.time(), 1.0);
        assert!(approx(sched.store().get(&s.floating_y), wave * 0.1, 1e-6));
        assert!(approx(sched.store().get(&s.floating_rotation), wave * 10.0, 1e-4));
    }
}

#[test]
fn stop_floating_from_a_director() {
    let (mut sched, card) = setup(RecordingHost::new());
    let s = card.signals().clone();
    sched.spawn(card.start_floating());
    for _ in 0..10 {
        sched.step_frame();
    }
    let floating = card.floating_handle().unwrap();
    let stop = sched.spawn(card.stop_floating_director());
    sched.run_until_complete(stop, 1.0).unwrap();
    assert!(!sched.is_active(floating));
    assert_eq!(sched.store().get(&s.floating_y), 0.0);
    assert_eq!(sched.store().get(&s.floating_rotation), 0.0);
}

#[test]
fn restarting_floating_replaces_the_loop() {
    let (mut sched, card) = setup(RecordingHost::new());
    sched.spawn(card.start_floating());
    sched.step_frame();
    let first = card.floating_handle().unwrap();
    sched.spawn(card.start_floating());
    sched.step_frame();
    let second = card.floating_handle().unwrap();
    assert_ne!(first, second);
    assert!(!sched.is_active(first));
    assert!(sched.is_active(second));
    assert_eq!(sched.active_count(), 1);
}

#[test]
fn eliminate_removes_node() {
    let (mut sched, card) = setup(RecordingHost::new());
    let id = sched.spawn(card.eliminate());
    sched.run_until_complete(id, 1.0).unwrap();
    assert_eq!(sched.host().removed(), ["card0".to_string()]);
    assert_eq!(card.state(), CardState::Eliminated);
}

#[test]
fn shrink_is_instant() {
    let (mut sched, card) = setup(RecordingHost::new());
    let scale = card.signals().scale;
    sched.store_mut().set(&scale, 1.0);
    sched.spawn(card.shrink());
    sched.tick(0.0);
    assert_eq!(sched.store().get(&scale), 0.0);
}

#[test]
fn tts_duration_reads_the_narration_channel() {
    let host = RecordingHost::new()
        .with_duration("/tts/messi.mp3", 1.25)
        .with_duration("/pop.mp3", 0.2);
    let (sched, card) = setup(host);
    assert_eq!(card.tts_duration(sched.host()).unwrap(), 1.25);
}

#[test]
fn floating_wave_shape() {
    assert!(approx(floating_wave(0.25, 1.0), 1.0, 1e-5));
    assert!(approx(floating_wave(0.75, 1.0), -1.0, 1e-5));
    assert!(approx(floating_wave(1.25, 1.0), 1.0, 1e-4));
    assert_eq!(floating_wave(0.3, 0.0), 0.0);
}
