//! Benchmarks for lookback-windows generation.
#![allow(missing_docs)]

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lookback_windows::prelude::*;
use rand::Rng;

fn origin() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn random_sessions(n: usize) -> Vec<Session> {
    let mut rng = rand::thread_rng();
    let mut t = origin();
    (0..n)
        .map(|k| {
            t += TimeDelta::minutes(rng.gen_range(30..2 * 24 * 60));
            let end = t + TimeDelta::minutes(rng.gen_range(1..90));
            let session = Session::new(format!("s{k}"), t, end);
            if rng.gen_bool(0.05) { session.with_positive_label_time(end) } else { session }
        })
        .collect()
}

fn random_source(n_users: usize, sessions_per_user: usize) -> BTreeMap<UserId, Vec<Session>> {
    (0..n_users)
        .map(|i| (UserId::new(format!("user-{i:06}")), random_sessions(sessions_per_user)))
        .collect()
}

fn config() -> WindowingConfig {
    WindowingConfig::new(
        origin() + TimeDelta::days(30),
        origin() + TimeDelta::days(365),
        TimeDelta::days(14),
        TimeDelta::days(7),
    )
    .with_lookback_gap(TimeDelta::days(1))
}

fn bench_single_user(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_user");
    group.sample_size(50);

    // Sessions per user, from light to heavy browsers
    let scenarios = [(20, "light"), (200, "regular"), (2000, "heavy")];

    for (n_sessions, name) in scenarios {
        group.throughput(Throughput::Elements(n_sessions as u64));
        group.bench_with_input(BenchmarkId::new("sliding_daily", name), &n_sessions, |b, &n| {
            let generator = WindowGenerator::sliding(config(), TimeDelta::days(1)).unwrap();
            let user = UserId::new("user");
            let sessions = random_sessions(n);

            b.iter(|| generator.generate(black_box(&user), black_box(&sessions)).unwrap());
        });
    }

    group.finish();
}

fn bench_slide_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("slide_length");
    group.sample_size(50);

    let sessions = random_sessions(500);
    let user = UserId::new("user");

    for hours in [6, 24, 24 * 7] {
        group.bench_with_input(BenchmarkId::new("hours", hours), &hours, |b, &hours| {
            let generator = WindowGenerator::sliding(config(), TimeDelta::hours(hours)).unwrap();
            b.iter(|| generator.generate(black_box(&user), black_box(&sessions)).unwrap());
        });
    }

    group.finish();
}

fn bench_batch_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_threads");
    group.sample_size(20);

    let source = random_source(1000, 100);
    group.throughput(Throughput::Elements(source.len() as u64));

    for threads in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, &threads| {
            let generator = WindowGenerator::sliding(config(), TimeDelta::days(1)).unwrap();
            let processor = BatchProcessor::new(generator, BatchConfig::new().with_threads(threads));
            b.iter(|| processor.process(black_box(&source)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_user, bench_slide_length, bench_batch_threads);
criterion_main!(benches);
