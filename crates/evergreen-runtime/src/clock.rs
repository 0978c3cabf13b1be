//! Frame clock

use std::time::Instant;

/// Longest frame the clock will report; longer stalls are clamped.
const MAX_FRAME_DELTA: f64 = 0.25;

/// Tracks elapsed time and the per-frame delta fed to every animated part
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock from the wall clock. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance_by(elapsed);
    }

    /// Advance the clock by an externally measured delta (headless hosts, tests).
    ///
    /// Negative and non-finite deltas count as zero.
    pub fn advance_by(&mut self, dt: f64) {
        self.first_tick = false;
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.delta_time = dt.min(MAX_FRAME_DELTA);
        self.total_time += self.delta_time;
    }
}
