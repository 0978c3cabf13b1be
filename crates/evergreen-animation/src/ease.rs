//! Exponential smoothing toward a target

/// Below this distance from the target, a value snaps onto it exactly.
pub const SNAP_EPSILON: f32 = 0.001;

/// Linear interpolation between two floats
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` a fraction `dt * speed` of the way to `target`.
///
/// Once within [`SNAP_EPSILON`] the result is `target` itself, so repeated
/// calls settle exactly instead of creeping forever. The fraction is capped
/// at 1 so a long frame lands on the target rather than past it.
pub fn approach(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if (current - target).abs() > SNAP_EPSILON {
        lerp(current, target, (dt * speed).clamp(0.0, 1.0))
    } else {
        target
    }
}
