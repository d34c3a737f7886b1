//! Primitive trait and Hit record for ray/surface queries.

use crate::{Color, Ray};

/// What a primitive reports when a ray hits it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t along the ray; the hit point is `origin + direction * t`
    pub distance: f32,
    /// Surface color at the hit, alpha being the surface's own opacity
    pub color: Color,
    /// How much of a recursively traced reflection blends into `color` (0 = none)
    pub reflectivity: u8,
    /// Mirror ray leaving the hit point; ignored when `reflectivity` is 0
    pub reflected: Ray,
}

impl Hit {
    /// A hit with no reflection contribution.
    pub fn matte(distance: f32, color: Color) -> Self {
        Self {
            distance,
            color,
            reflectivity: 0,
            reflected: Ray::default(),
        }
    }
}

/// Trait for shapes that can be intersected by rays.
///
/// Implementations are pure geometric queries and must be callable from many
/// render threads at once.
pub trait Primitive: Send + Sync {
    /// Intersect `ray` with this surface.
    ///
    /// Returns `None` when the ray misses or the surface lies behind the ray
    /// origin. The ray direction is usually, but not necessarily, unit length.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;
}

impl<P: Primitive + ?Sized> Primitive for Box<P> {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        (**self).intersect(ray)
    }
}

impl<P: Primitive + ?Sized> Primitive for std::sync::Arc<P> {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        (**self).intersect(ray)
    }
}
