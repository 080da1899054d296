//! Long-running containment scenarios.
//!
//! Every tick must end with every particle inside the sphere, and the
//! recycling rate must settle into a steady snowfall.

use snowglobe::prelude::*;
use snowglobe::ParticlePool;

fn assert_contained(pool: &ParticlePool, tick: u64) {
    let boundary = pool.boundary();
    let radius_sq = boundary.radius() * boundary.radius();
    for (i, particle) in pool.particles().iter().enumerate() {
        let dist_sq = particle.position.distance_squared(boundary.center());
        assert!(
            dist_sq <= radius_sq,
            "particle {i} escaped at tick {tick}: |p - c|² = {dist_sq}"
        );
    }
}

#[test]
fn test_unit_sphere_ten_thousand_ticks() {
    let config = SnowConfig::default()
        .with_count(100)
        .with_sphere(Vec3::ZERO, 1.0)
        .with_seed(2024);
    let mut pool = ParticlePool::new(&config).unwrap();
    assert_contained(&pool, 0);

    let mut respawns = Vec::with_capacity(10_000);
    for tick in 1..=10_000 {
        pool.step(Vec3::ZERO);
        assert_contained(&pool, tick);
        respawns.push(pool.respawns_last_tick() as f64);
    }

    let tail = &respawns[respawns.len() - 1_000..];
    let mean = tail.iter().sum::<f64>() / tail.len() as f64;
    let variance = tail.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / tail.len() as f64;
    assert!(mean > 0.0, "snow stopped falling");
    // Independent recycling events look Poisson: variance on the order of the mean.
    assert!(variance <= 3.0 * mean, "mean {mean}, variance {variance}");

    // Over 100-tick windows the rate is steady.
    let windows: Vec<f64> = tail.chunks(100).map(|w| w.iter().sum()).collect();
    let window_mean = windows.iter().sum::<f64>() / windows.len() as f64;
    let window_var = windows
        .iter()
        .map(|w| (w - window_mean).powi(2))
        .sum::<f64>()
        / windows.len() as f64;
    assert!(
        window_var.sqrt() < 0.5 * window_mean,
        "window mean {window_mean}, std {}",
        window_var.sqrt()
    );
}

#[test]
fn test_translated_sphere_under_shaking() {
    let center = Vec3::new(2.0, -3.0, 5.0);
    let config = SnowConfig::default()
        .with_count(300)
        .with_sphere(center, 0.75)
        .with_seed(99);

    let size = Vec2::new(1024.0, 768.0);
    let mut tick_count = 0u32;
    let shaker = move || {
        tick_count += 1;
        // Swing the window back and forth, with a burst of bad readings.
        let x = ((tick_count as f32) * 0.3).sin() * 400.0;
        let y = ((tick_count as f32) * 0.17).cos() * 250.0;
        if (500..510).contains(&tick_count) {
            ViewportSample::INVALID
        } else {
            ViewportSample::new(Vec2::new(x, y), size)
        }
    };

    let mut globe = SnowGlobe::new(&config, shaker).unwrap();
    let camera = CameraBasis::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
    for tick in 1..=3_000 {
        let inputs = FrameInputs::new(Some(camera), tick as f32 / 60.0);
        globe.step(tick, &inputs);
        assert_contained(globe.pool(), tick);
        assert!(globe.last_force().is_finite());
    }
    assert!(globe.pool().total_respawns() > 0);
}

#[test]
fn test_transforms_track_particles() {
    let config = SnowConfig::default().with_count(50).with_seed(3);
    let viewport = ViewportSample::new(Vec2::ZERO, Vec2::new(800.0, 600.0));
    let mut globe = SnowGlobe::new(&config, viewport).unwrap();

    for tick in 1..=200 {
        let version_before = globe.transforms().version();
        globe.step(tick, &FrameInputs::default());
        assert_eq!(globe.transforms().version(), version_before + 1);

        for (particle, slot) in globe
            .pool()
            .particles()
            .iter()
            .zip(globe.transforms().as_slice())
        {
            assert_eq!(slot.translation(), particle.position);
        }
    }
}
