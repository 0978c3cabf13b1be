//! Heart centerpiece reveal
//!
//! The centerpiece appears a short while after the tree explodes: showing it
//! arms a delay, and only once that delay elapses does the scale start easing
//! toward 1. Hiding is immediate and cancels any pending reveal.

use crate::delay::DelayTimer;
use crate::ease::approach;
use evergreen_runtime::FrameContext;
use tracing::debug;

/// Seconds between the show request and the reveal
pub const DEFAULT_REVEAL_DELAY: f32 = 0.4;

const GROW_SPEED: f32 = 3.0;
const SHRINK_SPEED: f32 = 5.0;
const PULSE_FREQUENCY: f32 = 4.0;
const PULSE_AMPLITUDE: f32 = 0.05;
const YAW_SPEED: f32 = 0.5;
const REVEALED_LIGHT_INTENSITY: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct Centerpiece {
    timer: DelayTimer,
    show: bool,
    revealed: bool,
    scale: f32,
    pulse: f32,
    yaw: f32,
}

impl Default for Centerpiece {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_DELAY)
    }
}

impl Centerpiece {
    pub fn new(reveal_delay: f32) -> Self {
        Self {
            timer: DelayTimer::new(reveal_delay),
            show: false,
            revealed: false,
            scale: 0.0,
            pulse: 1.0,
            yaw: 0.0,
        }
    }

    /// Request the centerpiece shown or hidden.
    ///
    /// Only a hidden → shown change arms the delay; repeating `true` every
    /// frame does not restart it.
    pub fn set_visible(&mut self, show: bool) {
        if show == self.show {
            return;
        }
        self.show = show;
        if show {
            self.timer.arm();
        } else {
            self.timer.disarm();
            self.revealed = false;
        }
    }

    /// Advance by one frame. Returns true on the frame the reveal fires.
    pub fn advance(&mut self, ctx: &FrameContext) -> bool {
        if !ctx.has_time_step() {
            return false;
        }

        let fired = self.timer.tick(ctx.dt);
        if fired {
            self.revealed = true;
            debug!("[centerpiece] revealed");
        }

        let (target, speed) = if self.revealed {
            (1.0, GROW_SPEED)
        } else {
            (0.0, SHRINK_SPEED)
        };
        self.scale = approach(self.scale, target, ctx.dt, speed);

        self.yaw += ctx.dt * YAW_SPEED;
        self.pulse = if self.revealed {
            1.0 + (ctx.elapsed * PULSE_FREQUENCY).sin() * PULSE_AMPLITUDE
        } else {
            1.0
        };

        fired
    }

    /// Eased scale with the heartbeat applied
    pub fn display_scale(&self) -> f32 {
        self.scale * self.pulse
    }

    /// Eased scale without the heartbeat
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Whether a reveal is armed but has not fired yet
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn light_intensity(&self) -> f32 {
        if self.revealed {
            REVEALED_LIGHT_INTENSITY
        } else {
            0.0
        }
    }

    pub fn sparkles_visible(&self) -> bool {
        self.revealed
    }

    /// Scale has reached the target implied by the reveal flag
    pub fn is_settled(&self) -> bool {
        let target = if self.revealed { 1.0 } else { 0.0 };
        self.scale == target && !self.timer.is_pending()
    }
}
