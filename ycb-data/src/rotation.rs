//! Random rotation matrices for test-time augmentation.

use glam::{DMat3, DVec3};
use rand::Rng;
use std::f64::consts::TAU;

/// Build `Rz(angles.z) * Ry(angles.y) * Rx(angles.x)`.
pub fn rotation_from_euler(angles: DVec3) -> DMat3 {
    DMat3::from_rotation_z(angles.z) * DMat3::from_rotation_y(angles.y) * DMat3::from_rotation_x(angles.x)
}

/// Sample three angles uniformly from `[0, 2π)` and compose them as Z·Y·X.
///
/// Every call draws fresh angles from `rng`, so each test scan gets its own
/// independent matrix.
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> DMat3 {
    let angles = DVec3::new(
        rng.random_range(0.0..TAU),
        rng.random_range(0.0..TAU),
        rng.random_range(0.0..TAU),
    );
    rotation_from_euler(angles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_random_rotation_is_orthonormal() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let r = random_rotation(&mut rng);
            let should_be_identity = r.transpose() * r;
            assert!(should_be_identity.abs_diff_eq(DMat3::IDENTITY, 1e-9));
            assert_abs_diff_eq!(r.determinant(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rotation_composition_order() {
        // Rx(90°) maps Y to Z, then Rz(90°) maps that Z to itself.
        let r = rotation_from_euler(DVec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        let v = r * DVec3::Y;
        assert!(v.abs_diff_eq(DVec3::Z, 1e-12));

        // Applied to X: Rx leaves it, Rz turns it into Y.
        let v = r * DVec3::X;
        assert!(v.abs_diff_eq(DVec3::Y, 1e-12));
    }

    #[test]
    fn test_rotations_are_independent() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = random_rotation(&mut rng);
        let b = random_rotation(&mut rng);
        assert!(!a.abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn test_same_seed_same_rotation() {
        let a = random_rotation(&mut StdRng::seed_from_u64(3));
        let b = random_rotation(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
