//! Idle motion while the tree is assembled
//!
//! Every motion here produces an [`AmbientOffset`] layered on top of a
//! part's own transform. Each instance carries a random phase picked once at
//! creation so a population of ornaments never moves in lockstep. All offsets
//! are exactly zero while exploded.

use crate::random;
use evergreen_core::Vec3;
use evergreen_runtime::FrameContext;
use rand::Rng;

/// Position and rotation (Euler radians) added to a part's transform
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmbientOffset {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl AmbientOffset {
    pub const ZERO: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };
}

// ── Ornament bobbing ──

const SWAY_PHASE_MAX: f32 = 10.0;

/// Gentle rocking of a single hanging ornament
#[derive(Debug, Clone)]
pub struct OrnamentSway {
    phase: f32,
    offset: AmbientOffset,
}

impl OrnamentSway {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            phase: random::range(rng, 0.0, SWAY_PHASE_MAX),
            offset: AmbientOffset::ZERO,
        }
    }

    pub fn advance(&mut self, ctx: &FrameContext) {
        if ctx.exploded {
            self.offset = AmbientOffset::ZERO;
            return;
        }
        let t = ctx.elapsed + self.phase;
        self.offset = AmbientOffset {
            position: Vec3::new(0.0, t.sin() * 0.05, 0.0),
            rotation: Vec3::new(0.0, (t * 0.8).sin() * 0.2, (t * 1.5).sin() * 0.1),
        };
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn offset(&self) -> AmbientOffset {
        self.offset
    }
}

// ── Decorative rings ──

const RING_YAW_SPEED: f32 = 0.2;
const RING_TILT_FREQUENCY: f32 = 0.5;
const RING_TILT_AMPLITUDE: f32 = 0.05;

/// Slow counter-rotation and wobble of the glowing rings
#[derive(Debug, Clone, Default)]
pub struct RingSway {
    yaw: f32,
    tilt: f32,
}

impl RingSway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ctx: &FrameContext) {
        if ctx.exploded {
            self.tilt = 0.0;
            return;
        }
        if ctx.has_time_step() {
            self.yaw -= ctx.dt * RING_YAW_SPEED;
        }
        self.tilt = (ctx.elapsed * RING_TILT_FREQUENCY).sin() * RING_TILT_AMPLITUDE;
    }

    /// Accumulated yaw; held (not reset) while exploded
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Wobble offset for this frame
    pub fn offset(&self) -> AmbientOffset {
        AmbientOffset {
            position: Vec3::ZERO,
            rotation: Vec3::new(self.tilt, 0.0, 0.0),
        }
    }
}

// ── Whole-tree floating ──

const FLOAT_SPEED: f32 = 0.8;
const FLOAT_ROTATION_INTENSITY: f32 = 0.1;
const FLOAT_INTENSITY: f32 = 0.2;
const FLOAT_OFFSET_MAX: f32 = 10_000.0;

/// Lazy hover of the whole tree group
#[derive(Debug, Clone)]
pub struct FloatMotion {
    offset_time: f32,
    offset: AmbientOffset,
}

impl FloatMotion {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            offset_time: random::range(rng, 0.0, FLOAT_OFFSET_MAX),
            offset: AmbientOffset::ZERO,
        }
    }

    pub fn advance(&mut self, ctx: &FrameContext) {
        if ctx.exploded {
            self.offset = AmbientOffset::ZERO;
            return;
        }
        let s = (ctx.elapsed + self.offset_time) / 4.0 * FLOAT_SPEED;
        self.offset = AmbientOffset {
            position: Vec3::new(0.0, s.sin() / 10.0 * FLOAT_INTENSITY, 0.0),
            rotation: Vec3::new(s.cos() / 8.0, s.sin() / 8.0, s.sin() / 20.0)
                * FLOAT_ROTATION_INTENSITY,
        };
    }

    pub fn offset(&self) -> AmbientOffset {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sway_is_small_and_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sway = OrnamentSway::new(&mut rng);
        for i in 0..500 {
            sway.advance(&FrameContext::new(0.016, i as f32 * 0.016, false));
            let o = sway.offset();
            assert!(o.position.y.abs() <= 0.05 + 1e-6);
            assert!(o.rotation.y.abs() <= 0.2 + 1e-6);
            assert!(o.rotation.z.abs() <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn sway_is_suppressed_when_exploded() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sway = OrnamentSway::new(&mut rng);
        sway.advance(&FrameContext::new(0.016, 1.3, false));
        assert_ne!(sway.offset(), AmbientOffset::ZERO);

        sway.advance(&FrameContext::new(0.016, 1.316, true));
        assert_eq!(sway.offset(), AmbientOffset::ZERO);
    }

    #[test]
    fn phases_desynchronize_population() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sways: Vec<OrnamentSway> = (0..50).map(|_| OrnamentSway::new(&mut rng)).collect();
        let ctx = FrameContext::new(0.016, 2.0, false);
        for s in &mut sways {
            s.advance(&ctx);
        }
        let first = sways[0].offset();
        assert!(sways.iter().any(|s| s.offset() != first));
        assert!(sways.iter().all(|s| (0.0..10.0).contains(&s.phase())));
    }

    #[test]
    fn ring_yaw_holds_while_exploded() {
        let mut ring = RingSway::new();
        for i in 0..10 {
            ring.advance(&FrameContext::new(0.1, i as f32 * 0.1, false));
        }
        let yaw = ring.yaw();
        assert!((yaw + 0.2).abs() < 1e-5);

        ring.advance(&FrameContext::new(0.1, 1.0, true));
        assert_eq!(ring.yaw(), yaw);
        assert_eq!(ring.offset(), AmbientOffset::ZERO);
    }

    #[test]
    fn float_motion_bounded_and_suppressed() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut float = FloatMotion::new(&mut rng);
        for i in 0..200 {
            float.advance(&FrameContext::new(0.05, i as f32 * 0.05, false));
            let o = float.offset();
            assert!(o.position.y.abs() <= 0.02 + 1e-6);
            assert!(o.rotation.x.abs() <= 0.0125 + 1e-6);
        }
        float.advance(&FrameContext::new(0.05, 20.0, true));
        assert_eq!(float.offset(), AmbientOffset::ZERO);
    }
}
