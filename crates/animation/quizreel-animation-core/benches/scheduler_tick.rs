//! Scheduler stepping benchmarks.
//!
//! Run with: `cargo bench --bench scheduler_tick`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quizreel_animation_core::{
    reveal_pop, stagger_sequential, Config, Director, Easing, Scheduler, Signal,
};

fn staggered_scene(words: usize) -> Scheduler {
    let mut sched = Scheduler::new(Config::default()).expect("default config is valid");
    let signals: Vec<(Signal<f32>, Signal<f32>, Signal<f32>)> = (0..words)
        .map(|i| {
            let store = sched.store_mut();
            (
                store.create(format!("w{i}/opacity"), 0.0).expect("unique"),
                store.create(format!("w{i}/scale"), 0.0).expect("unique"),
                store.create(format!("w{i}/y"), 0.0).expect("unique"),
            )
        })
        .collect();
    let pop = Easing::Curve(reveal_pop());
    let root = stagger_sequential("words", &signals, 0.01, |_, &(opacity, scale, _)| {
        Director::new("word")
            .tween(opacity, 1.0, 0.3)
            .tween_eased(scale, 1.0, 0.25, pop.clone())
    });
    // Keep every word busy concurrently as well.
    let parallel = signals
        .iter()
        .map(|&(_, _, y)| Director::new("drift").tween(y, 2.0, 5.0))
        .collect();
    sched.spawn(root);
    sched.spawn(Director::new("group").all(parallel));
    sched
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler_tick");
    for words in [8usize, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(words), &words, |b, &n| {
            b.iter_with_setup(
                || staggered_scene(n),
                |mut sched| {
                    for _ in 0..60 {
                        black_box(sched.step_frame());
                    }
                },
            )
        });
    }
    group.finish();
}

fn bench_easing(c: &mut Criterion) {
    let pop = reveal_pop();
    c.bench_function("reveal_pop_evaluate", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for i in 0..=100 {
                acc += pop.evaluate(black_box(i as f32 / 100.0));
            }
            acc
        })
    });
}

criterion_group!(benches, bench_tick, bench_easing);
criterion_main!(benches);
