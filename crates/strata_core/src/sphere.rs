//! Sphere primitive for ray tracing.

use crate::{Color, Hit, Primitive, Ray};
use strata_math::{Vec3, Vec3Ext};

/// A sphere shaded by its own color scaled by the facing ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    color: Color,
    mirror: u8,
}

impl Sphere {
    /// Create a new, non-reflective sphere.
    ///
    /// Negative radius values are clamped to 0.0, which never intersects.
    pub fn new(center: Vec3, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            color,
            mirror: 0,
        }
    }

    /// Set the reflection weight (0..=255).
    pub fn with_mirror(mut self, mirror: u8) -> Self {
        self.mirror = mirror;
        self
    }

    /// Center in world space.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Radius after clamping.
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        if self.radius <= 0.0 {
            return None;
        }

        let d = ray.direction;
        let oc = self.center - ray.origin;
        let a = d.length_squared();
        if a == 0.0 {
            return None;
        }
        let h = d.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        // A tangent ray (discriminant exactly 0) still counts as a hit
        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Near root, or the far one when the origin is inside
        let mut t = (h - sqrtd) / a;
        let mut side = 1.0;
        if t <= 0.0 {
            t = (h + sqrtd) / a;
            side = -1.0;
        }
        if t <= 0.0 {
            return None;
        }

        let point = ray.at(t);
        // Unit normal pointing along the ray's side of the surface
        let normal = (self.center - point) * (side / self.radius);
        let facing = d.dot(normal);
        let mul = (facing.abs() * 256.0) as u32;

        Some(Hit {
            distance: t,
            color: self.color.scaled(mul),
            reflectivity: self.mirror,
            reflected: Ray::new(point, d.reflect_about(normal)),
        })
    }
}
