//! Ring and sparkle opacity

use crate::ease::approach;
use evergreen_runtime::FrameContext;

/// Opacity the rings settle at while the tree is assembled
pub const ASSEMBLED_OPACITY: f32 = 0.6;
/// Below this the auxiliary layers are skipped entirely
pub const ACTIVE_EPSILON: f32 = 0.01;

const FADE_SPEED: f32 = 3.0;

/// Fades the decorative layers out when the tree explodes and back in when it
/// reassembles.
#[derive(Debug, Clone)]
pub struct Atmosphere {
    opacity: f32,
    assembled_opacity: f32,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::new(ASSEMBLED_OPACITY)
    }
}

impl Atmosphere {
    /// Starts fully opaque and settles down to `assembled_opacity`.
    pub fn new(assembled_opacity: f32) -> Self {
        Self {
            opacity: 1.0,
            assembled_opacity: assembled_opacity.clamp(0.0, 1.0),
        }
    }

    pub fn advance(&mut self, ctx: &FrameContext) {
        if !ctx.has_time_step() {
            return;
        }
        let target = if ctx.exploded {
            0.0
        } else {
            self.assembled_opacity
        };
        self.opacity = approach(self.opacity, target, ctx.dt, FADE_SPEED);
    }

    /// Ring opacity for this frame
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the layers are worth drawing at all
    pub fn is_active(&self) -> bool {
        self.opacity > ACTIVE_EPSILON
    }

    /// Opacity relative to the assembled level, in [0, 1]. Sparkle layers
    /// scale their own base opacity by this.
    pub fn fade(&self) -> f32 {
        if self.assembled_opacity <= 0.0 {
            return 0.0;
        }
        (self.opacity / self.assembled_opacity).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(a: &mut Atmosphere, exploded: bool, seconds: f32) {
        let steps = (seconds / 0.016).round() as usize;
        for i in 0..steps {
            a.advance(&FrameContext::new(0.016, i as f32 * 0.016, exploded));
        }
    }

    #[test]
    fn settles_at_assembled_level() {
        let mut a = Atmosphere::default();
        assert_eq!(a.opacity(), 1.0);
        run(&mut a, false, 10.0);
        assert_eq!(a.opacity(), ASSEMBLED_OPACITY);
        assert!(a.is_active());
        assert_eq!(a.fade(), 1.0);
    }

    #[test]
    fn fades_out_when_exploded() {
        let mut a = Atmosphere::default();
        run(&mut a, false, 5.0);
        run(&mut a, true, 0.1);
        assert!(a.opacity() < ASSEMBLED_OPACITY);
        assert!(a.is_active());

        run(&mut a, true, 10.0);
        assert_eq!(a.opacity(), 0.0);
        assert!(!a.is_active());
        assert_eq!(a.fade(), 0.0);
    }

    #[test]
    fn fades_back_in_on_reset() {
        let mut a = Atmosphere::default();
        run(&mut a, true, 10.0);
        run(&mut a, false, 0.5);
        assert!(a.opacity() > 0.0 && a.opacity() < ASSEMBLED_OPACITY);
    }

    #[test]
    fn zero_dt_leaves_opacity_alone() {
        let mut a = Atmosphere::default();
        a.advance(&FrameContext::new(0.0, 0.0, true));
        assert_eq!(a.opacity(), 1.0);
    }
}
