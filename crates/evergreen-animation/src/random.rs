//! Random draws shared by the animation units and the layout
//!
//! Nothing here is seeded: callers pass in whichever `Rng` they own, so a
//! session gets fresh randomness while tests can hand in a seeded `StdRng`.

use evergreen_core::Vec3;
use rand::Rng;

/// Diagonal used when a drawn axis degenerates to zero length
const DIAGONAL_AXIS: Vec3 = Vec3::splat(0.577_350_3);

/// Returns a float in [min, max)
pub fn range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Spin axis with non-negative components, normalized.
pub fn spin_axis<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(rng.gen(), rng.gen(), rng.gen()).normalized_or(DIAGONAL_AXIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn range_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = range(&mut rng, 4.0, 12.0);
            assert!((4.0..12.0).contains(&v));
        }
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(range(&mut rng, 2.0, 2.0), 2.0);
        assert_eq!(range(&mut rng, 3.0, 1.0), 3.0);
    }

    #[test]
    fn spin_axis_is_unit_and_non_negative() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let a = spin_axis(&mut rng);
            assert!((a.length() - 1.0).abs() < 1e-4);
            assert!(a.x >= 0.0 && a.y >= 0.0 && a.z >= 0.0);
        }
        assert!((DIAGONAL_AXIS.length() - 1.0).abs() < 1e-4);
    }
}
