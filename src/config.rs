//! Construction-time configuration for the snowfall core.
//!
//! Build with chained `with_*` calls, starting from the defaults:
//!
//! ```
//! use snowglobe::{SnowConfig, Vec3};
//!
//! let config = SnowConfig::default()
//!     .with_count(2_000)
//!     .with_sphere(Vec3::new(0.0, 1.0, 0.0), 1.5)
//!     .with_seed(7);
//! assert!(config.validate().is_ok());
//! ```
//!
//! The configuration is immutable once a pool has been built from it.

use glam::Vec3;

use crate::error::ConfigError;

/// Upper bound on the particle population.
pub const MAX_PARTICLES: usize = 1_000_000;

/// Parameters for a [`ParticlePool`](crate::ParticlePool).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnowConfig {
    /// Number of particles, fixed for the lifetime of the pool.
    pub count: usize,
    /// Radius of the containment sphere.
    pub sphere_radius: f32,
    /// World-space center of the containment sphere.
    pub sphere_center: Vec3,
    /// Base downward drift per tick.
    pub fall_speed: f32,
    /// Lateral sway per tick, as a fraction of `fall_speed`.
    pub sway: f32,
    /// Maximum spin per axis, radians per tick.
    pub max_spin: f32,
    /// Smallest uniform scale given to a particle.
    pub scale_min: f32,
    /// Largest uniform scale given to a particle.
    pub scale_max: f32,
    /// Viewport pixels to world force conversion factor.
    pub force_factor: f32,
    /// Per-tick multiplier applied to inertial velocity.
    pub damping: f32,
    /// RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: 1800,
            sphere_radius: 1.6,
            sphere_center: Vec3::new(0.0, 0.9, 0.0),
            fall_speed: 0.004,
            sway: 0.5,
            max_spin: 0.02,
            scale_min: 0.015,
            scale_max: 0.04,
            force_factor: 0.0003,
            damping: 0.95,
            seed: None,
        }
    }
}

impl SnowConfig {
    /// Set the number of particles.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the containment sphere.
    pub fn with_sphere(mut self, center: Vec3, radius: f32) -> Self {
        self.sphere_center = center;
        self.sphere_radius = radius;
        self
    }

    /// Set the base fall speed (world units per tick).
    pub fn with_fall_speed(mut self, fall_speed: f32) -> Self {
        self.fall_speed = fall_speed;
        self
    }

    /// Set lateral sway as a fraction of the fall speed.
    pub fn with_sway(mut self, sway: f32) -> Self {
        self.sway = sway;
        self
    }

    /// Set the maximum spin per axis (radians per tick).
    pub fn with_max_spin(mut self, max_spin: f32) -> Self {
        self.max_spin = max_spin;
        self
    }

    /// Set the per-particle scale range. Use `min == max` for a fixed scale.
    pub fn with_scale_range(mut self, min: f32, max: f32) -> Self {
        self.scale_min = min;
        self.scale_max = max;
        self
    }

    /// Set the viewport-delta to force conversion factor.
    pub fn with_force_factor(mut self, factor: f32) -> Self {
        self.force_factor = factor;
        self
    }

    /// Set the per-tick inertial damping factor.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Seed the RNG for a reproducible population.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field against its constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 || self.count > MAX_PARTICLES {
            return Err(ConfigError::ParticleCount {
                count: self.count,
                max: MAX_PARTICLES,
            });
        }

        let center = self.sphere_center;
        for (field, value) in [
            ("sphere_center.x", center.x),
            ("sphere_center.y", center.y),
            ("sphere_center.z", center.z),
            ("force_factor", self.force_factor),
        ] {
            finite(field, value)?;
        }

        positive("sphere_radius", self.sphere_radius)?;
        non_negative("fall_speed", self.fall_speed)?;
        non_negative("sway", self.sway)?;
        non_negative("max_spin", self.max_spin)?;
        positive("scale_min", self.scale_min)?;
        positive("scale_max", self.scale_max)?;
        if self.scale_min > self.scale_max {
            return Err(ConfigError::InvertedScaleRange {
                min: self.scale_min,
                max: self.scale_max,
            });
        }

        // Spawning draws from ranges built out of these products; each must
        // stay finite or the range itself is unusable.
        for (field, value) in [
            ("sphere_radius²", self.sphere_radius * self.sphere_radius),
            ("fall_speed * 1.5", self.fall_speed * 1.5),
            ("fall_speed * sway * 2", self.fall_speed * self.sway * 2.0),
            ("max_spin * 2", self.max_spin * 2.0),
        ] {
            finite(field, value)?;
        }

        finite("damping", self.damping)?;
        if !(0.0..1.0).contains(&self.damping) {
            return Err(ConfigError::Damping(self.damping));
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SnowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.damping, 0.95);
        assert_eq!(config.force_factor, 0.0003);
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = SnowConfig::default().with_count(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::ParticleCount { count: 0, .. }));
    }

    #[test]
    fn test_radius_must_be_positive_and_finite() {
        let center = Vec3::ZERO;
        let err = SnowConfig::default()
            .with_sphere(center, 0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "sphere_radius", .. }));

        let err = SnowConfig::default()
            .with_sphere(center, f32::INFINITY)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFinite { field: "sphere_radius", .. }));
    }

    #[test]
    fn test_nan_center_rejected() {
        let err = SnowConfig::default()
            .with_sphere(Vec3::new(0.0, f32::NAN, 0.0), 1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFinite { field: "sphere_center.y", .. }));
    }

    #[test]
    fn test_damping_range() {
        assert!(SnowConfig::default().with_damping(0.0).validate().is_ok());
        assert_eq!(
            SnowConfig::default().with_damping(1.0).validate(),
            Err(ConfigError::Damping(1.0))
        );
        assert_eq!(
            SnowConfig::default().with_damping(-0.1).validate(),
            Err(ConfigError::Damping(-0.1))
        );
    }

    #[test]
    fn test_scale_range() {
        assert!(SnowConfig::default()
            .with_scale_range(0.03, 0.03)
            .validate()
            .is_ok());
        let err = SnowConfig::default()
            .with_scale_range(0.05, 0.01)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedScaleRange { .. }));
    }

    #[test]
    fn test_negative_fall_speed_rejected() {
        let err = SnowConfig::default()
            .with_fall_speed(-0.01)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Negative { field: "fall_speed", .. }));
    }

    #[test]
    fn test_overflowing_sway_rejected() {
        let config = SnowConfig::default().with_fall_speed(1e30).with_sway(1e10);
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotFinite { field: "fall_speed * sway * 2", .. }
        ));
    }

    #[test]
    fn test_overflowing_radius_rejected() {
        let err = SnowConfig::default()
            .with_sphere(Vec3::ZERO, 1e20)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFinite { field: "sphere_radius²", .. }));
        assert!(SnowConfig::default()
            .with_sphere(Vec3::ZERO, 1e18)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_overflowing_spin_and_fall_rejected() {
        assert!(SnowConfig::default().with_max_spin(f32::MAX).validate().is_err());
        assert!(SnowConfig::default().with_fall_speed(f32::MAX).validate().is_err());
    }
}
