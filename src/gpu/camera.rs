//! Orbit camera for viewing the globe.

use glam::{Mat4, Vec3};

use crate::force::CameraBasis;

/// Orbit camera around the globe center.
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Camera {
    /// Closest zoom.
    pub const MIN_DISTANCE: f32 = 0.5;
    /// Farthest zoom.
    pub const MAX_DISTANCE: f32 = 20.0;
    const MAX_PITCH: f32 = 1.5;

    /// Camera framing a sphere of `radius` around `target`.
    pub fn framing(target: Vec3, radius: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.15,
            distance: (radius * 2.8).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE),
            target,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Screen right and up in world space, for turning window drags into forces.
    pub fn basis(&self) -> CameraBasis {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        if right == Vec3::ZERO {
            return CameraBasis::WORLD;
        }
        CameraBasis::new(right, right.cross(forward))
    }

    /// Rotate by a mouse drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    /// Move toward (positive) or away from the target.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance - amount * 0.3).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }
}
