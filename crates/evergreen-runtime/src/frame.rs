//! Per-frame context and the explode trigger

use crate::clock::FrameClock;
use tracing::info;

/// Read-only view handed to every animated part once per frame.
///
/// All parts advanced in the same frame see the same `exploded` value; none of
/// them can write it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Seconds since the session started
    pub elapsed: f32,
    /// Whether the tree should be scattered this frame
    pub exploded: bool,
}

impl FrameContext {
    pub fn new(dt: f32, elapsed: f32, exploded: bool) -> Self {
        Self {
            dt,
            elapsed,
            exploded,
        }
    }

    /// Whether this frame carries a usable, positive time step
    pub fn has_time_step(&self) -> bool {
        self.dt.is_finite() && self.dt > 0.0
    }
}

/// The single "exploded" boolean, owned by whoever handles user input.
#[derive(Debug, Default)]
pub struct ExplodeTrigger {
    exploded: bool,
}

impl ExplodeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Scatter the tree. Returns true only on the assembled → exploded edge.
    pub fn explode(&mut self) -> bool {
        if self.exploded {
            return false;
        }
        self.exploded = true;
        info!("[trigger] exploded");
        true
    }

    /// Reassemble the tree. Returns true only on the exploded → assembled edge.
    pub fn reset(&mut self) -> bool {
        if !self.exploded {
            return false;
        }
        self.exploded = false;
        info!("[trigger] reset");
        true
    }

    /// Snapshot the trigger together with the clock for this frame
    pub fn context(&self, clock: &FrameClock) -> FrameContext {
        FrameContext::new(
            clock.delta_time as f32,
            clock.total_time as f32,
            self.exploded,
        )
    }
}
