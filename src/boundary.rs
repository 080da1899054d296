//! Containment sphere and the two spawn distributions.
//!
//! Particles that leave the sphere are recycled, not clamped: they restart
//! from a fresh sample, which reads as continuous snowfall instead of flakes
//! bouncing off the glass.
//!
//! - [`BoundaryPolicy::sample_initial`] fills the whole volume uniformly and
//!   is used once, when the pool is built.
//! - [`BoundaryPolicy::sample_respawn`] draws from a band near the top of the
//!   sphere so recycled flakes appear to fall in from above.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Lower edge of the respawn band, as a fraction of the radius above center.
pub const RESPAWN_BAND_MIN: f32 = 0.5;
/// Upper edge of the respawn band, as a fraction of the radius above center.
pub const RESPAWN_BAND_MAX: f32 = 0.95;

// Fresh samples are re-checked against `contains`; rounding can put a point
// drawn on the very edge a hair outside.
const MAX_RESAMPLE: usize = 8;

/// The containment sphere.
///
/// Decides when a particle has escaped and where recycled particles reappear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPolicy {
    center: Vec3,
    radius: f32,
    radius_sq: f32,
}

impl BoundaryPolicy {
    /// A sphere of `radius` around `center`.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius,
            radius_sq: radius * radius,
        }
    }

    /// Center of the sphere in world space.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Radius of the sphere.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether `position` is inside the sphere (surface included).
    #[inline]
    pub fn contains(&self, position: Vec3) -> bool {
        position.distance_squared(self.center) <= self.radius_sq
    }

    /// Uniform-by-volume point inside the sphere.
    pub fn sample_initial<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        self.accept(rng, |policy, rng| {
            // Cube root compensates for shell area growing with r².
            let r = policy.radius * rng.gen::<f32>().cbrt();
            // acos(2u - 1) compensates for the sin(phi) area element.
            let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
            let theta = rng.gen_range(0.0..TAU);

            let sin_phi = phi.sin();
            policy.center
                + Vec3::new(
                    r * sin_phi * theta.sin(),
                    r * phi.cos(),
                    r * sin_phi * theta.cos(),
                )
        })
    }

    /// Point in the upper respawn band.
    ///
    /// Height is uniform in `[0.5R, 0.95R]` above the center, then the point is
    /// drawn uniformly by area from the sphere's cross-section at that height.
    pub fn sample_respawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        self.accept(rng, |policy, rng| {
            let height = rng.gen_range(
                policy.radius * RESPAWN_BAND_MIN..=policy.radius * RESPAWN_BAND_MAX,
            );
            policy.sample_disk(height, rng)
        })
    }

    /// Uniform-by-area point on the sphere's cross-section `height` above the center.
    pub fn sample_disk<R: Rng + ?Sized>(&self, height: f32, rng: &mut R) -> Vec3 {
        let max_r = self.cross_section_radius(height);
        // sqrt keeps the density even instead of piling up near the axis.
        let r = max_r * rng.gen::<f32>().sqrt();
        let angle = rng.gen_range(0.0..TAU);
        self.center + Vec3::new(r * angle.cos(), height, r * angle.sin())
    }

    /// Radius of the circle where the plane `height` above the center cuts the sphere.
    #[inline]
    pub fn cross_section_radius(&self, height: f32) -> f32 {
        (self.radius_sq - height * height).max(0.0).sqrt()
    }

    fn accept<R, F>(&self, rng: &mut R, mut draw: F) -> Vec3
    where
        R: Rng + ?Sized,
        F: FnMut(&Self, &mut R) -> Vec3,
    {
        for _ in 0..MAX_RESAMPLE {
            let candidate = draw(self, rng);
            if self.contains(candidate) {
                return candidate;
            }
        }
        self.center + Vec3::Y * (self.radius * RESPAWN_BAND_MIN)
    }
}
