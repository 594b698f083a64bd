// Vec3 helpers that glam does not provide with the exact policy we need.

use glam::Vec3;

/// Extension trait for Vec3.
pub trait Vec3Ext {
    /// Normalize, mapping a zero-length (or non-finite) vector to `Vec3::ZERO`.
    ///
    /// Callers that feed the result into geometry must treat a zero vector
    /// as "no direction".
    fn unit_or_zero(self) -> Vec3;

    /// True if every component is within `1e-8` of zero.
    fn near_zero(self) -> bool;
}

impl Vec3Ext for Vec3 {
    fn unit_or_zero(self) -> Vec3 {
        let unit = self.normalize_or_zero();
        #[cfg(debug_assertions)]
        if unit == Vec3::ZERO {
            log::debug!("normalize of degenerate vector {:?}", self);
        }
        unit
    }

    fn near_zero(self) -> bool {
        const S: f32 = 1e-8;
        self.x.abs() < S && self.y.abs() < S && self.z.abs() < S
    }
}
