//! Benchmarks for the per-tick CPU update.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use snowglobe::{
    BoundaryPolicy, CameraBasis, FrameInputs, ParticlePool, SnowConfig, SnowCore, SnowGlobe,
    ViewportSample,
};

fn bench_pool_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_step");

    for count in [1_500, 2_250, 10_000] {
        group.bench_with_input(BenchmarkId::new("particles", count), &count, |b, &count| {
            let config = SnowConfig::default().with_count(count).with_seed(1);
            let mut pool = ParticlePool::new(&config).unwrap();
            let force = Vec3::new(0.0002, -0.0001, 0.0);
            b.iter(|| {
                black_box(pool.step(black_box(force)).version());
            })
        });
    }

    group.finish();
}

fn bench_globe_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("globe_step");

    for count in [1_500, 2_250] {
        group.bench_with_input(BenchmarkId::new("shaken", count), &count, |b, &count| {
            let config = SnowConfig::default().with_count(count).with_seed(2);
            let mut x = 0.0f32;
            let shaker = move || {
                x = (x + 0.1) % 100.0;
                ViewportSample::new(Vec2::new(x.sin() * 200.0, 0.0), Vec2::new(900.0, 900.0))
            };
            let mut globe = SnowGlobe::new(&config, shaker).unwrap();
            let inputs = FrameInputs::new(Some(CameraBasis::new(Vec3::X, Vec3::Y)), 0.0);
            let mut tick = 0;
            b.iter(|| {
                tick += 1;
                black_box(globe.step(tick, &inputs).as_bytes().len());
            })
        });
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let policy = BoundaryPolicy::new(Vec3::new(0.0, 0.9, 0.0), 1.6);
    let mut rng = SmallRng::seed_from_u64(3);

    group.bench_function("initial", |b| {
        b.iter(|| black_box(policy.sample_initial(&mut rng)))
    });
    group.bench_function("respawn", |b| {
        b.iter(|| black_box(policy.sample_respawn(&mut rng)))
    });

    group.finish();
}

criterion_group!(benches, bench_pool_step, bench_globe_step, bench_sampling);
criterion_main!(benches);
