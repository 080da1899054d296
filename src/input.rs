//! Viewport sampling for the shake signal.
//!
//! The globe is "shaken" by moving the host viewport (the window) around the
//! screen. Each tick the [`InputSampler`] reads the viewport position and size
//! from an injected [`ViewportSource`] and turns consecutive readings into a
//! 2D delta in screen convention (x right, y down).
//!
//! A reading is never trusted blindly:
//!
//! - the first reading has nothing to compare against,
//! - a size change is a resize, not a drag,
//! - non-finite coordinates come from hosts that cannot report a position.
//!
//! All three produce an exact zero delta for that tick. The previous reading is
//! replaced regardless, so one bad sample only costs one tick.
//!
//! ```
//! use snowglobe::{InputSampler, ViewportSample, Vec2};
//!
//! let mut sampler = InputSampler::new();
//! let size = Vec2::new(1280.0, 720.0);
//! assert_eq!(sampler.update(ViewportSample::new(Vec2::new(10.0, 10.0), size)), Vec2::ZERO);
//! assert_eq!(sampler.update(ViewportSample::new(Vec2::new(14.0, 7.0), size)), Vec2::new(4.0, -3.0));
//! ```

use glam::Vec2;

/// One reading of the host viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSample {
    /// Top-left corner of the viewport on screen, pixels.
    pub position: Vec2,
    /// Viewport size, pixels.
    pub size: Vec2,
}

impl ViewportSample {
    /// A reading with the host unable to report anything.
    pub const INVALID: Self = Self {
        position: Vec2::NAN,
        size: Vec2::NAN,
    };

    /// A reading at `position` with inner `size`, both in pixels.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Whether all four coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.size.is_finite()
    }
}

/// Anything that can report the viewport once per tick.
///
/// Implemented for closures, so tests can script a sequence of readings:
///
/// ```
/// use snowglobe::{ViewportSample, ViewportSource, Vec2};
///
/// let mut x = 0.0;
/// let mut source = move || {
///     x += 1.0;
///     ViewportSample::new(Vec2::new(x, 0.0), Vec2::splat(100.0))
/// };
/// assert_eq!(source.sample().position.x, 1.0);
/// ```
pub trait ViewportSource {
    fn sample(&mut self) -> ViewportSample;
}

impl<F> ViewportSource for F
where
    F: FnMut() -> ViewportSample,
{
    fn sample(&mut self) -> ViewportSample {
        self()
    }
}

/// A viewport that never moves. Produces a zero delta every tick.
impl ViewportSource for ViewportSample {
    fn sample(&mut self) -> ViewportSample {
        *self
    }
}

/// Turns successive viewport readings into a per-tick delta.
#[derive(Debug, Default)]
pub struct InputSampler {
    previous: Option<ViewportSample>,
    delta: Vec2,
    // Set while consecutive readings are being discarded, so only the first
    // one in a run is logged.
    rejecting: bool,
}

impl InputSampler {
    /// A sampler with no previous reading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `source` once and return this tick's delta.
    pub fn sample<S: ViewportSource + ?Sized>(&mut self, source: &mut S) -> Vec2 {
        let current = source.sample();
        self.update(current)
    }

    /// Feed one reading and return this tick's delta.
    pub fn update(&mut self, current: ViewportSample) -> Vec2 {
        let delta = match self.previous {
            Some(previous)
                if previous.is_finite() && current.is_finite() && previous.size == current.size =>
            {
                current.position - previous.position
            }
            _ => Vec2::ZERO,
        };

        // Huge but finite coordinates can still overflow the subtraction.
        let delta = if delta.is_finite() { delta } else { Vec2::ZERO };

        if current.is_finite() {
            self.rejecting = false;
        } else if !self.rejecting {
            self.rejecting = true;
            log::warn!(
                "discarding non-finite viewport reading (position {:?}, size {:?})",
                current.position,
                current.size
            );
        }

        self.previous = Some(current);
        self.delta = delta;
        delta
    }

    /// Delta produced by the most recent tick.
    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Forget the previous reading. The next tick yields a zero delta.
    pub fn reset(&mut self) {
        self.previous = None;
        self.delta = Vec2::ZERO;
        self.rejecting = false;
    }
}
