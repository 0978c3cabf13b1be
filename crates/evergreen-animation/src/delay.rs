//! Frame-driven one-shot delay

/// Counts down frame deltas and fires once when the delay has elapsed.
///
/// Disarming before it fires cancels the pending activation for good; a
/// later `arm` starts a fresh countdown.
#[derive(Debug, Clone)]
pub struct DelayTimer {
    delay: f32,
    remaining: Option<f32>,
}

impl DelayTimer {
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            remaining: None,
        }
    }

    /// Start (or restart) the countdown
    pub fn arm(&mut self) {
        self.remaining = Some(self.delay);
    }

    /// Cancel any pending activation
    pub fn disarm(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Advance by `dt` seconds. Returns true on the tick the delay runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };
        if dt.is_finite() && dt > 0.0 {
            *remaining -= dt;
        }
        if *remaining <= 0.0 {
            self.remaining = None;
            return true;
        }
        false
    }
}
