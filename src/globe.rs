//! The assembled snowfall core: sampler, force model and pool wired in tick order.

use glam::{Vec2, Vec3};

use crate::config::SnowConfig;
use crate::error::ConfigError;
use crate::force::CameraBasis;
use crate::input::{InputSampler, ViewportSource};
use crate::pool::ParticlePool;
use crate::transform::TransformBuffer;
use crate::SnowCore;

/// Per-tick values supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInputs {
    /// Current camera orientation, if the host has a camera.
    pub camera: Option<CameraBasis>,
    /// Seconds since start. Only forwarded to cosmetic consumers.
    pub elapsed: f32,
}

impl FrameInputs {
    /// Inputs for one tick.
    pub fn new(camera: Option<CameraBasis>, elapsed: f32) -> Self {
        Self { camera, elapsed }
    }
}

/// A snow globe: reads the shake signal from `V` and drives a [`ParticlePool`].
///
/// ```
/// use snowglobe::{FrameInputs, SnowConfig, SnowCore, SnowGlobe, ViewportSample, Vec2};
///
/// let viewport = ViewportSample::new(Vec2::ZERO, Vec2::new(800.0, 600.0));
/// let mut globe = SnowGlobe::new(&SnowConfig::default().with_count(100), viewport).unwrap();
/// let transforms = globe.step(1, &FrameInputs::default());
/// assert_eq!(transforms.len(), 100);
/// ```
#[derive(Debug)]
pub struct SnowGlobe<V> {
    source: V,
    sampler: InputSampler,
    pool: ParticlePool,
    last_tick: Option<u64>,
    last_force: Vec3,
    elapsed: f32,
}

impl<V: ViewportSource> SnowGlobe<V> {
    /// Validate `config`, build the pool and read the shake signal from `source`.
    pub fn new(config: &SnowConfig, source: V) -> Result<Self, ConfigError> {
        let pool = ParticlePool::new(config)?;
        Ok(Self {
            source,
            sampler: InputSampler::new(),
            pool,
            last_tick: None,
            last_force: Vec3::ZERO,
            elapsed: 0.0,
        })
    }

    /// The particle pool.
    #[inline]
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// The viewport source.
    #[inline]
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Mutable access to the viewport source, e.g. to attach a window.
    #[inline]
    pub fn source_mut(&mut self) -> &mut V {
        &mut self.source
    }

    /// Viewport delta sampled on the most recent tick.
    #[inline]
    pub fn last_delta(&self) -> Vec2 {
        self.sampler.delta()
    }

    /// Force applied on the most recent tick.
    #[inline]
    pub fn last_force(&self) -> Vec3 {
        self.last_force
    }

    /// Tick id passed to the most recent [`step`](SnowCore::step).
    #[inline]
    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    /// Elapsed time passed to the most recent step.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl<V: ViewportSource> SnowCore for SnowGlobe<V> {
    fn initialize(&mut self) {
        self.pool.initialize();
        self.sampler.reset();
        self.last_tick = None;
        self.last_force = Vec3::ZERO;
    }

    fn step(&mut self, tick: u64, inputs: &FrameInputs) -> &TransformBuffer {
        let delta = self.sampler.sample(&mut self.source);
        let force = self.pool.forces().force(delta, inputs.camera.as_ref());

        self.last_tick = Some(tick);
        self.last_force = force;
        self.elapsed = inputs.elapsed;

        self.pool.step(force)
    }

    fn transforms(&self) -> &TransformBuffer {
        self.pool.buffer()
    }
}
