//! Force, damping and input handling through the assembled core.

use snowglobe::prelude::*;
use snowglobe::ParticlePool;

fn roomy_config(count: usize) -> SnowConfig {
    // Large enough that nothing is recycled during these short runs.
    SnowConfig::default()
        .with_count(count)
        .with_sphere(Vec3::ZERO, 100_000.0)
        .with_seed(8)
}

#[test]
fn test_inertia_decays_geometrically() {
    let mut pool = ParticlePool::new(&roomy_config(16)).unwrap();
    let impulse = Vec3::new(0.02, -0.01, 0.005);

    pool.step(impulse);
    let initial: Vec<f32> = pool
        .particles()
        .iter()
        .map(|p| p.inertial_velocity.length())
        .collect();
    for magnitude in &initial {
        assert!((magnitude - impulse.length() * 0.95).abs() < 1e-7);
    }

    for k in 1..=100 {
        pool.step(Vec3::ZERO);
        assert_eq!(pool.total_respawns(), 0);
        for (particle, magnitude) in pool.particles().iter().zip(&initial) {
            let expected = magnitude * 0.95_f32.powi(k);
            let actual = particle.inertial_velocity.length();
            assert!(
                (actual - expected).abs() <= expected * 1e-4 + 1e-12,
                "tick {k}: {actual} vs {expected}"
            );
        }
    }
}

#[test]
fn test_custom_damping_is_honored() {
    let config = roomy_config(4).with_damping(0.5);
    let mut pool = ParticlePool::new(&config).unwrap();
    pool.step(Vec3::X);
    pool.step(Vec3::ZERO);
    for particle in pool.particles() {
        assert!((particle.inertial_velocity - Vec3::X * 0.25).length() < 1e-7);
    }
}

#[test]
fn test_resize_never_shakes_the_snow() {
    let mut tick = 0;
    let source = move || {
        tick += 1;
        // Position jumps every tick, but so does the size: every reading is a resize.
        let size = Vec2::new(800.0 + tick as f32, 600.0);
        ViewportSample::new(Vec2::new(tick as f32 * 250.0, -(tick as f32) * 90.0), size)
    };
    let mut globe = SnowGlobe::new(&roomy_config(32), source).unwrap();

    for tick in 1..=20 {
        globe.step(tick, &FrameInputs::default());
        assert_eq!(globe.last_delta(), Vec2::ZERO);
        assert_eq!(globe.last_force(), Vec3::ZERO);
    }
    for particle in globe.pool().particles() {
        assert_eq!(particle.inertial_velocity, Vec3::ZERO);
    }
}

#[test]
fn test_window_drag_pushes_snow() {
    let size = Vec2::new(800.0, 600.0);
    let mut x = 0.0;
    let source = move || {
        let sample = ViewportSample::new(Vec2::new(x, 0.0), size);
        x += 40.0;
        sample
    };
    let mut globe = SnowGlobe::new(&roomy_config(32), source).unwrap();

    globe.step(1, &FrameInputs::default());
    globe.step(2, &FrameInputs::default());

    // Dragging right with no camera pushes along world +X.
    for particle in globe.pool().particles() {
        assert!(particle.inertial_velocity.x > 0.0);
        assert_eq!(particle.inertial_velocity.y, 0.0);
    }
}

#[test]
fn test_nan_viewport_is_harmless() {
    let mut globe = SnowGlobe::new(&roomy_config(32), ViewportSample::INVALID).unwrap();
    let camera = CameraBasis::new(Vec3::X, Vec3::Y);
    for tick in 1..=10 {
        globe.step(tick, &FrameInputs::new(Some(camera), 0.0));
    }
    for particle in globe.pool().particles() {
        assert!(particle.position.is_finite());
        assert_eq!(particle.inertial_velocity, Vec3::ZERO);
    }
}
