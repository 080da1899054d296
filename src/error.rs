//! Error types for snowglobe.
//!
//! The simulation core itself never fails once constructed. Errors come from
//! configuration validation and from the optional windowed host.

use thiserror::Error;

/// A [`SnowConfig`](crate::SnowConfig) value that cannot drive a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Particle count outside `1..=MAX_PARTICLES`.
    #[error("particle count must be between 1 and {max}, got {count}")]
    ParticleCount { count: usize, max: usize },
    /// A numeric field is NaN or infinite.
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    /// A field that must be strictly positive is zero or negative.
    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    /// A field that must be non-negative is negative.
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    /// `scale_min` is larger than `scale_max`.
    #[error("scale range is inverted: min {min} > max {max}")]
    InvertedScaleRange { min: f32, max: f32 },
    /// Damping outside `[0, 1)` would never let inertia decay.
    #[error("damping must be in [0, 1), got {0}")]
    Damping(f32),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a GPU with Vulkan/Metal/DX12/WebGPU support is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture format.
    #[error("surface has no supported texture format")]
    NoSurfaceFormat,
}

/// Errors that can occur when running the windowed snow globe.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The simulation configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
