//! Per-element explosion state
//!
//! Each [`ExplosionUnit`] wraps one tree element. It remembers where the
//! element was placed, picks an outward direction from that position, and
//! eases a single `progress` scalar between 0 (assembled) and 1 (exploded).
//! Position and spin are derived from `progress` every frame.

use crate::ease::approach;
use crate::random;
use evergreen_core::Vec3;
use evergreen_runtime::FrameContext;
use rand::Rng;

/// Rest positions closer to the origin than this (squared) have no usable
/// outward direction.
const DEGENERATE_REST_LENGTH_SQ: f32 = 0.1;
/// Upward bias added to every explosion direction before renormalizing
const UPWARD_BIAS: f32 = 0.4;
/// Below this progress the element counts as home and stops spinning
const SPIN_THRESHOLD: f32 = 0.01;

/// Default easing speed while flying outward
pub const DEFAULT_EXPLODE_SPEED: f32 = 3.0;
/// Default easing speed while settling back home
pub const DEFAULT_ASSEMBLE_SPEED: f32 = 1.5;

/// Tuning for one unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionParams {
    /// Displacement at full explosion, in world units
    pub distance: f32,
    /// Spin rate multiplier at full explosion
    pub rotation_speed: f32,
    /// Fixed easing speed in both directions. `None` uses the
    /// asymmetric defaults (fast out, slow back).
    pub speed: Option<f32>,
}

impl Default for ExplosionParams {
    fn default() -> Self {
        Self {
            distance: 5.0,
            rotation_speed: 1.0,
            speed: None,
        }
    }
}

impl ExplosionParams {
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_rotation_speed(mut self, rotation_speed: f32) -> Self {
        self.rotation_speed = rotation_speed;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Easing speed for the current direction of travel
    pub fn speed_for(&self, exploding: bool) -> f32 {
        match self.speed {
            Some(speed) => speed,
            None if exploding => DEFAULT_EXPLODE_SPEED,
            None => DEFAULT_ASSEMBLE_SPEED,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Lifecycle {
    /// Mounted, rest position not captured yet
    Pending { placed: Vec3 },
    /// Rest position and direction captured; never recomputed
    Active { rest: Vec3, direction: Vec3 },
}

/// Explosion state for a single tree element
#[derive(Debug, Clone)]
pub struct ExplosionUnit {
    params: ExplosionParams,
    lifecycle: Lifecycle,
    rotation_axis: Vec3,
    progress: f32,
    position: Vec3,
    rotation: Vec3,
}

impl ExplosionUnit {
    /// Mount a unit over an element placed at `placed`.
    ///
    /// The spin axis is drawn here, once, from the caller's randomness source.
    pub fn new<R: Rng + ?Sized>(placed: Vec3, params: ExplosionParams, rng: &mut R) -> Self {
        Self {
            params,
            lifecycle: Lifecycle::Pending { placed },
            rotation_axis: random::spin_axis(rng),
            progress: 0.0,
            position: placed,
            rotation: Vec3::ZERO,
        }
    }

    /// Advance by one frame. The only mutating entry point.
    pub fn advance(&mut self, ctx: &FrameContext) {
        let (rest, direction) = self.capture();

        if !ctx.has_time_step() {
            return;
        }

        let target = if ctx.exploded { 1.0 } else { 0.0 };
        let speed = self.params.speed_for(ctx.exploded);
        self.progress = approach(self.progress, target, ctx.dt, speed);

        self.position = rest + direction * (self.params.distance * self.progress);

        if self.progress > SPIN_THRESHOLD {
            let spin = ctx.dt * self.params.rotation_speed * self.progress;
            self.rotation += self.rotation_axis * spin;
        } else {
            self.rotation = Vec3::ZERO;
        }
    }

    /// Capture the rest position on first use; afterwards return the stored pair
    fn capture(&mut self) -> (Vec3, Vec3) {
        match self.lifecycle {
            Lifecycle::Active { rest, direction } => (rest, direction),
            Lifecycle::Pending { placed } => {
                let direction = explosion_direction(placed);
                self.lifecycle = Lifecycle::Active {
                    rest: placed,
                    direction,
                };
                (placed, direction)
            }
        }
    }

    pub fn params(&self) -> &ExplosionParams {
        &self.params
    }

    /// Current explosion amount in [0, 1]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// World position for this frame
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Accumulated spin (Euler radians, XYZ)
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn rotation_axis(&self) -> Vec3 {
        self.rotation_axis
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Active { .. })
    }

    /// Captured rest position, once initialized
    pub fn rest_position(&self) -> Option<Vec3> {
        match self.lifecycle {
            Lifecycle::Active { rest, .. } => Some(rest),
            Lifecycle::Pending { .. } => None,
        }
    }

    /// Outward direction, once initialized
    pub fn direction(&self) -> Option<Vec3> {
        match self.lifecycle {
            Lifecycle::Active { direction, .. } => Some(direction),
            Lifecycle::Pending { .. } => None,
        }
    }

    /// Fully home: no displacement, no spin
    pub fn is_at_rest(&self) -> bool {
        self.progress == 0.0
    }

    pub fn is_fully_exploded(&self) -> bool {
        self.progress == 1.0
    }
}

/// Outward direction for an element resting at `rest`: away from the origin,
/// tilted upward. Elements sitting on the origin fly straight up.
pub fn explosion_direction(rest: Vec3) -> Vec3 {
    let mut direction = if rest.length_squared() < DEGENERATE_REST_LENGTH_SQ {
        Vec3::UP
    } else {
        rest.normalized_or(Vec3::UP)
    };
    direction.y += UPWARD_BIAS;
    direction.normalized_or(Vec3::UP)
}
