use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Primary rays leave the camera with a unit direction. Reflected rays are
/// handed back by primitives and reused as-is, so their direction is only as
/// close to unit length as the primitive's mirror formula keeps it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Move the origin `offset` units along the direction.
    #[inline]
    pub fn advanced(&self, offset: f32) -> Self {
        Self::new(self.at(offset), self.direction)
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}
