//! # snowglobe
//!
//! A bounded snowfall simulation: a fixed population of flakes falls inside a
//! sphere, is shaken by moving the host window, and is written every tick into
//! an instanced transform buffer ready for the GPU.
//!
//! The core is plain, single-threaded and allocation-free once built. The
//! windowed [`Simulation`] is an optional host around it.
//!
//! ## Quick Start
//!
//! Run the bundled window:
//!
//! ```ignore
//! use snowglobe::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Simulation::new()
//!         .with_config(SnowConfig::default().with_count(2_000))
//!         .run()
//! }
//! ```
//!
//! Or drive the core from your own renderer:
//!
//! ```
//! use snowglobe::prelude::*;
//!
//! let viewport = ViewportSample::new(Vec2::ZERO, Vec2::new(1280.0, 720.0));
//! let mut globe = SnowGlobe::new(&SnowConfig::default(), viewport).unwrap();
//!
//! for tick in 1..=3 {
//!     let transforms = globe.step(tick, &FrameInputs::default());
//!     let _bytes: &[u8] = transforms.as_bytes(); // upload as instance data
//! }
//! ```
//!
//! ## Tick order
//!
//! | Stage | Type |
//! |-------|------|
//! | Sample the viewport, zero delta on resize or bad input | [`InputSampler`] |
//! | Delta + camera basis to world force | [`ForceModel`] |
//! | Integrate, damp, recycle escaped flakes | [`ParticlePool`], [`BoundaryPolicy`] |
//! | Compose transforms, publish the buffer once | [`TransformWriter`], [`TransformBuffer`] |

pub mod boundary;
pub mod config;
pub mod error;
pub mod force;
mod globe;
mod gpu;
pub mod input;
mod particle;
mod pool;
mod simulation;
pub mod time;
pub mod transform;

pub use boundary::BoundaryPolicy;
pub use bytemuck;
pub use config::SnowConfig;
pub use error::{ConfigError, GpuError, RunError};
pub use force::{CameraBasis, ForceModel};
pub use glam::{Vec2, Vec3};
pub use globe::{FrameInputs, SnowGlobe};
pub use input::{InputSampler, ViewportSample, ViewportSource};
pub use particle::Particle;
pub use pool::ParticlePool;
pub use simulation::{Simulation, WindowViewport};
pub use transform::{InstanceTransform, TransformBuffer, TransformWriter};

/// A tick-driven particle core.
///
/// The host calls [`step`](Self::step) once per rendered frame and may read
/// the returned buffer until the next call. The core owns the buffer; the
/// host only ever borrows it.
pub trait SnowCore {
    /// Repopulate from scratch, reusing existing storage.
    fn initialize(&mut self);

    /// Advance one tick and return the freshly written transforms.
    fn step(&mut self, tick: u64, inputs: &FrameInputs) -> &TransformBuffer;

    /// Transforms written by the most recent tick (or by initialization).
    fn transforms(&self) -> &TransformBuffer;
}

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use snowglobe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SnowConfig;
    pub use crate::error::{ConfigError, RunError};
    pub use crate::force::CameraBasis;
    pub use crate::globe::{FrameInputs, SnowGlobe};
    pub use crate::input::{ViewportSample, ViewportSource};
    pub use crate::simulation::Simulation;
    pub use crate::time::FrameClock;
    pub use crate::transform::{InstanceTransform, TransformBuffer};
    pub use crate::SnowCore;
    pub use crate::{Vec2, Vec3};
}
