//! The per-particle record owned by [`ParticlePool`](crate::ParticlePool).

use glam::Vec3;

/// One snowflake.
///
/// Plain data. Records are never created or dropped after the pool is
/// built; recycling overwrites them in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// Drift per tick, fixed between respawns.
    pub fall_velocity: Vec3,
    /// Momentum imparted by the perturbation force, decays every tick.
    pub inertial_velocity: Vec3,
    /// Euler angles (XYZ order), radians.
    pub rotation: Vec3,
    /// Euler angle increment per tick.
    pub rotation_speed: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl Particle {
    pub(crate) const ZERO: Self = Self {
        position: Vec3::ZERO,
        fall_velocity: Vec3::ZERO,
        inertial_velocity: Vec3::ZERO,
        rotation: Vec3::ZERO,
        rotation_speed: Vec3::ZERO,
        scale: 1.0,
    };
}

impl Default for Particle {
    fn default() -> Self {
        Self::ZERO
    }
}
