use quizreel_animation_core::{Config, Scheduler, SignalStore};
use quizreel_scene_core::{AnimatedText, TextStyle};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn question(sched: &mut Scheduler, text: &str) -> AnimatedText {
    AnimatedText::new(sched.store_mut(), "question", text, &TextStyle::default()).unwrap()
}

#[test]
fn splits_on_spaces_and_skips_empty_words() {
    let mut store = SignalStore::new();
    let text =
        AnimatedText::new(&mut store, "q", "  Who   scored ", &TextStyle::default()).unwrap();
    let words: Vec<&str> = text.words().iter().map(|w| w.text.as_str()).collect();
    assert_eq!(words, ["Who", "scored"]);
    assert_eq!(
        store.get(&store.find::<String>("q/word1/text").unwrap()),
        "scored"
    );
    assert_eq!(store.get(&text.font_size()), 64.0);
}

#[test]
fn words_start_hidden() {
    let mut sched = Scheduler::new(Config::default()).unwrap();
    let text = question(&mut sched, "Who scored the winning goal?");
    assert_eq!(text.words().len(), 5);
    for word in text.words() {
        assert_eq!(sched.store().get(&word.opacity), 0.0);
        assert_eq!(sched.store().get(&word.scale), 0.0);
    }
}

#[test]
fn animate_pops_words_in_order() {
    let mut sched = Scheduler::new(Config::default()).unwrap();
    let text = question(&mut sched, "Who scored the winning goal?");
    let words = text.words().to_vec();
    let id = sched.spawn(text.animate(0.1));

    // Each word takes 0.06s plus the 0.1s gap.
    sched.tick(0.165);
    assert_eq!(sched.store().get(&words[0].opacity), 1.0);
    assert_eq!(sched.store().get(&words[0].scale), 1.0);
    assert!(approx(sched.store().get(&words[1].opacity), 1.0 / 6.0, 1e-3));
    assert_eq!(sched.store().get(&words[2].opacity), 0.0);

    sched.run_until_complete(id, 2.0).unwrap();
    assert!(approx(sched.time(), 0.8, 0.02));
    for word in &words {
        assert_eq!(sched.store().get(&word.opacity), 1.0);
        assert_eq!(sched.store().get(&word.scale), 1.0);
    }
}

#[test]
fn fade_out_clears_every_word() {
    let mut sched = Scheduler::new(Config::default()).unwrap();
    let text = question(&mut sched, "Which club won?");
    for word in text.words() {
        sched.store_mut().set(&word.opacity, 1.0);
    }
    let id = sched.spawn(text.fade_out(0.1));
    sched.tick(0.3);
    assert_eq!(sched.store().get(&text.words()[0].opacity), 0.0);
    assert_eq!(sched.store().get(&text.words()[1].opacity), 1.0);

    sched.run_until_complete(id, 2.0).unwrap();
    for word in text.words() {
        assert_eq!(sched.store().get(&word.opacity), 0.0);
    }
}

#[test]
fn emphasize_pulses_one_word() {
    let mut sched = Scheduler::new(Config::default()).unwrap();
    let text = question(&mut sched, "Which club won?");
    for word in text.words() {
        sched.store_mut().set(&word.scale, 1.0);
    }
    sched.spawn(text.emphasize(1));
    sched.tick(0.2);
    assert_eq!(sched.store().get(&text.words()[1].scale), 1.3);
    assert_eq!(sched.store().get(&text.words()[0].scale), 1.0);
    sched.tick(0.1);
    assert_eq!(sched.store().get(&text.words()[1].scale), 1.0);
    assert_eq!(sched.active_count(), 0);
}

#[test]
fn emphasize_out_of_range_is_a_no_op() {
    let mut sched = Scheduler::new(Config::default()).unwrap();
    let text = question(&mut sched, "Which club won?");
    let id = sched.spawn(text.emphasize(7));
    let report = sched.tick(0.0);
    assert!(!sched.is_active(id));
    assert_eq!(report.active, 0);
    for word in text.words() {
        assert_eq!(sched.store().get(&word.scale), 0.0);
    }
}
