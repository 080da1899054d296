//! Conversion of the viewport shake into a world-space force.
//!
//! A drag of `(px, py)` pixels becomes
//! `right * (px * k) + up * (-py * k)`, so dragging the window right pushes the
//! snow right as seen from the camera and dragging it down pushes it down
//! (screen y grows downward, world up does not).
//!
//! The force is shared by the whole pool and accumulated into every particle's
//! inertial velocity, which then decays by a fixed factor per tick.

use glam::{Vec2, Vec3};

/// Camera orientation in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Unit vector pointing to the right of the screen.
    pub right: Vec3,
    /// Unit vector pointing to the top of the screen.
    pub up: Vec3,
}

impl CameraBasis {
    /// World axes, used when no camera is available.
    pub const WORLD: Self = Self {
        right: Vec3::X,
        up: Vec3::Y,
    };

    /// A basis from the camera's world-space right and up vectors.
    pub fn new(right: Vec3, up: Vec3) -> Self {
        Self { right, up }
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::WORLD
    }
}

/// Reference conversion factor from pixels to world force.
pub const DEFAULT_FORCE_FACTOR: f32 = 0.0003;

/// Reference per-tick inertial damping.
pub const DEFAULT_DAMPING: f32 = 0.95;

/// Converts viewport motion into a world force and damps inertia.
///
/// Damping is applied once per tick, independent of frame time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    factor: f32,
    damping: f32,
}

impl ForceModel {
    /// A model with pixel-to-world `factor` and per-tick `damping`.
    pub fn new(factor: f32, damping: f32) -> Self {
        Self { factor, damping }
    }

    /// World force per pixel of viewport motion.
    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Fraction of inertial velocity kept each tick.
    #[inline]
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// World force for a viewport delta. `None` falls back to world axes.
    pub fn force(&self, delta: Vec2, camera: Option<&CameraBasis>) -> Vec3 {
        let basis = camera.copied().unwrap_or(CameraBasis::WORLD);
        basis.right * (delta.x * self.factor) + basis.up * (-delta.y * self.factor)
    }

    /// Accumulate `force` into `velocity`, then apply one tick of damping.
    ///
    /// Damping is per tick, not per second: a host running at twice the frame
    /// rate bleeds off momentum twice as fast in wall-clock time.
    #[inline]
    pub fn damp(&self, velocity: Vec3, force: Vec3) -> Vec3 {
        (velocity + force) * self.damping
    }
}

impl Default for ForceModel {
    fn default() -> Self {
        Self::new(DEFAULT_FORCE_FACTOR, DEFAULT_DAMPING)
    }
}
