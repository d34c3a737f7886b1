// Vector utilities for ray tracing
//
// Extends glam::Vec3 with the few operations the tracer needs beyond what
// glam ships: a normalize that goes through f64, mirror reflection and
// quaternion rotation about an arbitrary axis.

use glam::{DVec3, Quat, Vec3};

/// Extension trait for Vec3 to provide additional ray tracing utilities
pub trait Vec3Ext {
    /// Normalize using f64 intermediates.
    ///
    /// Unit-length inputs come back unchanged to within 1e-7. A zero vector
    /// yields NaN components; callers must not pass one.
    fn normalize_precise(self) -> Vec3;

    /// Mirror this direction about a unit `normal`: `d - 2 (d·n) n`.
    ///
    /// Length is preserved only when `normal` is unit length.
    fn reflect_about(self, normal: Vec3) -> Vec3;

    /// Rotate this vector by `angle` radians about `axis` (must be unit length).
    fn rotated_about(self, axis: Vec3, angle: f32) -> Vec3;
}

impl Vec3Ext for Vec3 {
    fn normalize_precise(self) -> Vec3 {
        let v: DVec3 = self.as_dvec3();
        let s = (1.0 / v.length_squared()).sqrt();
        (v * s).as_vec3()
    }

    fn reflect_about(self, normal: Vec3) -> Vec3 {
        self - normal * (2.0 * self.dot(normal))
    }

    fn rotated_about(self, axis: Vec3, angle: f32) -> Vec3 {
        Quat::from_axis_angle(axis, angle) * self
    }
}
