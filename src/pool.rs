//! The fixed-size particle pool and its per-tick update.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::boundary::BoundaryPolicy;
use crate::config::SnowConfig;
use crate::error::ConfigError;
use crate::force::ForceModel;
use crate::particle::Particle;
use crate::transform::{TransformBuffer, TransformWriter};

/// Spawn-time ranges copied out of the config.
#[derive(Debug, Clone, Copy)]
struct SpawnParams {
    fall_speed: f32,
    sway: f32,
    max_spin: f32,
    scale_min: f32,
    scale_max: f32,
}

impl SpawnParams {
    fn from_config(config: &SnowConfig) -> Self {
        Self {
            fall_speed: config.fall_speed,
            sway: config.fall_speed * config.sway,
            max_spin: config.max_spin,
            scale_min: config.scale_min,
            scale_max: config.scale_max,
        }
    }

    /// Overwrite `particle` with a fresh record at `position`.
    fn spawn(&self, particle: &mut Particle, position: Vec3, rng: &mut SmallRng) {
        particle.position = position;
        particle.fall_velocity = Vec3::new(
            rng.gen_range(-self.sway..=self.sway),
            -self.fall_speed * rng.gen_range(0.5..=1.5),
            rng.gen_range(-self.sway..=self.sway),
        );
        particle.inertial_velocity = Vec3::ZERO;
        particle.rotation = Vec3::new(
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
        );
        particle.rotation_speed = Vec3::new(
            rng.gen_range(-self.max_spin..=self.max_spin),
            rng.gen_range(-self.max_spin..=self.max_spin),
            rng.gen_range(-self.max_spin..=self.max_spin),
        );
        particle.scale = rng.gen_range(self.scale_min..=self.scale_max);
    }
}

/// Owns every particle record, the transform buffer and all scratch state.
///
/// Nothing is allocated after construction: [`step`](Self::step) and
/// [`initialize`](Self::initialize) only overwrite existing storage.
#[derive(Debug)]
pub struct ParticlePool {
    particles: Box<[Particle]>,
    boundary: BoundaryPolicy,
    forces: ForceModel,
    spawn: SpawnParams,
    writer: TransformWriter,
    buffer: TransformBuffer,
    rng: SmallRng,
    seed: u64,
    respawns_last_tick: usize,
    total_respawns: u64,
    ticks: u64,
}

impl ParticlePool {
    /// Build and populate a pool.
    pub fn new(config: &SnowConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(clock_seed);
        let mut pool = Self {
            particles: vec![Particle::ZERO; config.count].into_boxed_slice(),
            boundary: BoundaryPolicy::new(config.sphere_center, config.sphere_radius),
            forces: ForceModel::new(config.force_factor, config.damping),
            spawn: SpawnParams::from_config(config),
            writer: TransformWriter::new(),
            buffer: TransformBuffer::new(config.count),
            rng: SmallRng::seed_from_u64(seed),
            seed,
            respawns_last_tick: 0,
            total_respawns: 0,
            ticks: 0,
        };
        pool.initialize();
        Ok(pool)
    }

    /// Repopulate every particle from the volume distribution and publish
    /// their transforms. Storage is reused.
    pub fn initialize(&mut self) {
        for (index, particle) in self.particles.iter_mut().enumerate() {
            let position = self.boundary.sample_initial(&mut self.rng);
            self.spawn.spawn(particle, position, &mut self.rng);
            self.writer.write(&mut self.buffer, index, particle);
        }
        self.buffer.mark_updated();

        self.respawns_last_tick = 0;
        self.total_respawns = 0;
        self.ticks = 0;

        log::debug!(
            "initialized {} particles in sphere r={} at {:?} (seed {})",
            self.particles.len(),
            self.boundary.radius(),
            self.boundary.center(),
            self.seed
        );
    }

    /// Advance every particle by one tick under `external_force`.
    ///
    /// Per particle: accumulate and damp inertia, move, spin, recycle if it
    /// left the sphere, write its transform. The buffer is published once,
    /// after the last slot.
    pub fn step(&mut self, external_force: Vec3) -> &TransformBuffer {
        let mut respawns = 0;

        for (index, particle) in self.particles.iter_mut().enumerate() {
            particle.inertial_velocity = self.forces.damp(particle.inertial_velocity, external_force);
            particle.position += particle.fall_velocity + particle.inertial_velocity;
            particle.rotation += particle.rotation_speed;

            if !self.boundary.contains(particle.position) {
                let position = self.boundary.sample_respawn(&mut self.rng);
                self.spawn.spawn(particle, position, &mut self.rng);
                respawns += 1;
            }

            self.writer.write(&mut self.buffer, index, particle);
        }
        self.buffer.mark_updated();

        self.respawns_last_tick = respawns;
        self.total_respawns += respawns as u64;
        self.ticks += 1;

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("tick {}: {} respawned", self.ticks, respawns);
        }

        &self.buffer
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always `false` for a validated pool.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Every particle record, in buffer slot order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Transforms written by the last tick.
    #[inline]
    pub fn buffer(&self) -> &TransformBuffer {
        &self.buffer
    }

    /// The containment sphere.
    #[inline]
    pub fn boundary(&self) -> &BoundaryPolicy {
        &self.boundary
    }

    /// The force model built from the config.
    #[inline]
    pub fn forces(&self) -> &ForceModel {
        &self.forces
    }

    /// Seed the pool's RNG was created with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Particles recycled during the most recent tick.
    #[inline]
    pub fn respawns_last_tick(&self) -> usize {
        self.respawns_last_tick
    }

    /// Particles recycled since the last [`initialize`](Self::initialize).
    #[inline]
    pub fn total_respawns(&self) -> u64 {
        self.total_respawns
    }

    /// Ticks since the last [`initialize`](Self::initialize).
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

// Different every run when no seed is configured.
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: usize) -> SnowConfig {
        SnowConfig::default()
            .with_count(count)
            .with_sphere(Vec3::ZERO, 1.0)
            .with_seed(11)
    }

    #[test]
    fn test_new_populates_inside_sphere() {
        let pool = ParticlePool::new(&config(500)).unwrap();
        assert_eq!(pool.len(), 500);
        assert_eq!(pool.buffer().len(), 500);
        assert_eq!(pool.buffer().version(), 1);
        for (particle, slot) in pool.particles().iter().zip(pool.buffer().as_slice()) {
            assert!(pool.boundary().contains(particle.position));
            assert!(particle.fall_velocity.y < 0.0);
            assert_eq!(particle.inertial_velocity, Vec3::ZERO);
            assert_eq!(slot.translation(), particle.position);
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = ParticlePool::new(&config(0)).unwrap_err();
        assert!(matches!(err, ConfigError::ParticleCount { .. }));
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = ParticlePool::new(&config(64)).unwrap();
        let b = ParticlePool::new(&config(64)).unwrap();
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_step_integrates_in_order() {
        let cfg = config(32).with_sphere(Vec3::ZERO, 100.0);
        let mut pool = ParticlePool::new(&cfg).unwrap();
        let before: Vec<Particle> = pool.particles().to_vec();
        let force = Vec3::new(0.01, 0.0, 0.0);

        pool.step(force);

        let inertia = force * 0.95;
        for (old, new) in before.iter().zip(pool.particles()) {
            let expected = old.position + (old.fall_velocity + inertia);
            if !pool.boundary().contains(expected) {
                continue;
            }
            assert!((new.inertial_velocity - inertia).length() < 1e-7);
            assert!((new.position - expected).length() < 1e-4);
            assert!((new.rotation - (old.rotation + old.rotation_speed)).length() < 1e-5);
        }
        assert_eq!(pool.ticks(), 1);
    }

    #[test]
    fn test_buffer_published_once_per_tick() {
        let mut pool = ParticlePool::new(&config(10)).unwrap();
        let start = pool.buffer().version();
        for tick in 1..=5 {
            let version = pool.step(Vec3::ZERO).version();
            assert_eq!(version, start + tick);
        }
    }

    #[test]
    fn test_escaped_particle_respawns_with_zero_inertia() {
        let cfg = config(200).with_fall_speed(0.0);
        let mut pool = ParticlePool::new(&cfg).unwrap();

        // A hard shove sends everything out of the unit sphere.
        pool.step(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(pool.respawns_last_tick(), 200);
        for particle in pool.particles() {
            assert!(pool.boundary().contains(particle.position));
            assert_eq!(particle.inertial_velocity, Vec3::ZERO);
            assert!(particle.position.y >= 0.5 - 1e-5);
        }
    }

    #[test]
    fn test_initialize_resets_counters_without_reallocating() {
        let cfg = config(50).with_fall_speed(0.0);
        let mut pool = ParticlePool::new(&cfg).unwrap();
        pool.step(Vec3::new(5.0, 0.0, 0.0));
        assert!(pool.total_respawns() > 0);

        let storage = pool.particles().as_ptr();
        pool.initialize();
        assert_eq!(pool.particles().as_ptr(), storage);
        assert_eq!(pool.total_respawns(), 0);
        assert_eq!(pool.ticks(), 0);
    }

    #[test]
    fn test_scale_within_range() {
        let cfg = config(300).with_scale_range(0.02, 0.03);
        let pool = ParticlePool::new(&cfg).unwrap();
        for particle in pool.particles() {
            assert!((0.02..=0.03).contains(&particle.scale));
        }
    }

    #[test]
    fn test_overflowing_spawn_ranges_fail_construction() {
        let cfg = config(10).with_fall_speed(1e30).with_sway(1e10);
        assert!(matches!(
            ParticlePool::new(&cfg),
            Err(ConfigError::NotFinite { .. })
        ));
    }
}
