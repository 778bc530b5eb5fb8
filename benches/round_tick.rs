//! Frame-loop benchmarks for the round state machine.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use quick_duel::core::{GameRng, RoundConfig, Timestamp};
use quick_duel::round::RoundState;

const FRAME_MS: u64 = 16;

fn full_round(config: &RoundConfig, seed: u64) -> RoundState {
    let mut round = RoundState::start(config.clone(), GameRng::new(seed), Timestamp(0))
        .expect("bench config is valid");
    let mut now = Timestamp(0);
    while !round.is_done() {
        now = now.plus(FRAME_MS);
        black_box(round.tick(now));
    }
    round
}

fn bench_full_round(c: &mut Criterion) {
    let config = RoundConfig::default();
    c.bench_function("silent round at 60fps", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            full_round(&config, seed)
        });
    });
}

fn bench_idle_tick(c: &mut Criterion) {
    let config = RoundConfig::default().with_wait_duration(60_000, 60_000);
    c.bench_function("idle waiting tick", |b| {
        b.iter_batched(
            || RoundState::start(config.clone(), GameRng::new(1), Timestamp(0)).expect("valid"),
            |mut round| black_box(round.tick(Timestamp(FRAME_MS))),
            BatchSize::SmallInput,
        );
    });
}

fn bench_clone_round(c: &mut Criterion) {
    let round = full_round(&RoundConfig::default().with_feint_count(5, 5), 9);
    c.bench_function("clone finished round", |b| b.iter(|| black_box(round.clone())));
}

criterion_group!(benches, bench_full_round, bench_idle_tick, bench_clone_round);
criterion_main!(benches);
