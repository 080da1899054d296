//! Frame clock for the host loop.
//!
//! The simulation integrates per tick, not per second. [`FrameClock`] hands out
//! the tick ids and keeps wall-clock values for things that are allowed to
//! depend on real time: the shader's time uniform and the FPS readout.
//!
//! # Example
//!
//! ```
//! use snowglobe::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! let tick = clock.tick().expect("not paused");
//! assert_eq!(tick, 1);
//!
//! clock.pause();
//! assert_eq!(clock.tick(), None);
//! assert_eq!(clock.ticks(), 1);
//! ```

use std::time::{Duration, Instant};

/// Tick ids and wall-clock timing for the host loop.
///
/// Pausing stops tick ids and excludes the paused time from `elapsed`.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    tick_count: u64,
    fps: f32,
    fps_tick_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    // Wall time spent paused, excluded from `elapsed`.
    pause_elapsed: Duration,
}

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            tick_count: 0,
            fps: 0.0,
            fps_tick_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            pause_elapsed: Duration::ZERO,
        }
    }

    /// Advance to the next tick and return its id, or `None` while paused.
    ///
    /// Ids start at 1 and increase by one per call.
    pub fn tick(&mut self) -> Option<u64> {
        if self.paused {
            self.delta_secs = 0.0;
            return None;
        }

        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = (now.duration_since(self.start) - self.pause_elapsed).as_secs_f32();
        self.tick_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let ticks_since = self.tick_count - self.fps_tick_count;
            self.fps = ticks_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_tick_count = self.tick_count;
            self.fps_update_time = now;
        }

        Some(self.tick_count)
    }

    /// Seconds since start, excluding pauses.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds between the last two ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks issued so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the clock is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop handing out ticks.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume ticking. Time spent paused is not counted.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    /// Pause if running, resume if paused.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Restart tick ids and elapsed time from zero.
    pub fn reset(&mut self) {
        *self = Self {
            paused: self.paused,
            ..Self::new()
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
