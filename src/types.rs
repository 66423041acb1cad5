use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Unit constants
// ---------------------------------------------------------------------------

pub const AU_KM: f64 = 149_597_870.7; // 1 astronomical unit, km
pub const KM_PER_UNIT: f64 = 1000.0; // solver output unit: thousands of km
pub const HOURS_PER_DAY: f64 = 24.0;

// ---------------------------------------------------------------------------
// Shared vector type
// ---------------------------------------------------------------------------

/// Cartesian position or direction, f64 components.
pub type Vec3 = Vector3<f64>;

/// Helpers nalgebra does not provide in the exact form the playback needs.
pub trait Vector3Ext {
    /// Unit vector in the same direction, or the zero vector when the
    /// magnitude is zero.
    fn normalize_or_zero(&self) -> Vec3;
}

impl Vector3Ext for Vec3 {
    fn normalize_or_zero(&self) -> Vec3 {
        let mag = self.norm();
        if mag > 0.0 {
            self / mag
        } else {
            Vec3::zeros()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_vector_is_zero() {
        let v = Vec3::zeros().normalize_or_zero();
        assert_eq!(v, Vec3::zeros());
        assert!(v.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn normalize_gives_unit_length() {
        let v = Vec3::new(3.0, -4.0, 12.0).normalize_or_zero();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.z - 12.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn vector_arithmetic_both_scalar_orders() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, Vec3::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Vec3::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, 2.0 * a);
        assert!((Vec3::new(2.0, 3.0, 6.0).norm() - 7.0).abs() < 1e-12);
    }
}
