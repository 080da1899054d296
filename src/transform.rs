//! Per-instance transforms handed to the renderer.
//!
//! The [`TransformBuffer`] is allocated once with one slot per particle and
//! rewritten in place every tick. Its layout is GPU-ready: a slice of
//! [`InstanceTransform`] can be passed straight to `bytemuck::cast_slice`.
//!
//! Readers detect a fresh tick through [`TransformBuffer::version`], which
//! advances exactly once per completed tick, never per slot.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::particle::Particle;

/// Column-major model matrix for one instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    /// Matrix columns; `model[3]` holds the translation.
    pub model: [[f32; 4]; 4],
}

impl InstanceTransform {
    /// Unit scale, no rotation, at the origin.
    pub const IDENTITY: Self = Self {
        model: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// The model matrix as a [`Mat4`].
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// World-space translation.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Fixed-capacity array of instance transforms.
#[derive(Debug, Clone)]
pub struct TransformBuffer {
    transforms: Box<[InstanceTransform]>,
    version: u64,
}

impl TransformBuffer {
    /// A buffer of `capacity` identity transforms at version 0.
    pub fn new(capacity: usize) -> Self {
        Self {
            transforms: vec![InstanceTransform::IDENTITY; capacity].into_boxed_slice(),
            version: 0,
        }
    }

    /// Number of slots, one per particle.
    #[inline]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether the buffer has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Every slot, in particle order.
    #[inline]
    pub fn as_slice(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    /// Raw bytes for a GPU upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.transforms)
    }

    /// Number of completed updates. Changes once per tick.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the contents changed since a reader saw `version`.
    #[inline]
    pub fn is_newer_than(&self, version: u64) -> bool {
        self.version != version
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut InstanceTransform {
        &mut self.transforms[index]
    }

    /// Publish the slots written this tick.
    #[inline]
    pub(crate) fn mark_updated(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// Composes particle state into buffer slots.
///
/// Keeps one scratch matrix that is overwritten for every particle.
#[derive(Debug, Clone)]
pub struct TransformWriter {
    scratch: Mat4,
}

impl TransformWriter {
    /// A writer with zeroed scratch state.
    pub fn new() -> Self {
        Self {
            scratch: Mat4::IDENTITY,
        }
    }

    /// Write `translation × rotation × scale` for `particle` into slot `index`.
    #[inline]
    pub fn write(&mut self, buffer: &mut TransformBuffer, index: usize, particle: &Particle) {
        self.compose(particle.position, particle.rotation, particle.scale);
        buffer.slot_mut(index).model = self.scratch.to_cols_array_2d();
    }

    fn compose(&mut self, position: Vec3, rotation: Vec3, scale: f32) {
        let rotation = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
        self.scratch = Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position);
    }
}

impl Default for TransformWriter {
    fn default() -> Self {
        Self::new()
    }
}
