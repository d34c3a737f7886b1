//! Infinite horizontal plane with a procedural false-color pattern.

use crate::{Color, Hit, Primitive, Ray};
use strata_math::Vec3;

/// The plane `y = height`, colored by `sin(x·scale)·sin(z·scale)` through the
/// temperature ramp.
///
/// Opacity falls off toward grazing angles: alpha is `|direction.y| * 255`,
/// scaled by `opacity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkerboard {
    height: f32,
    scale: f32,
    reflectivity: u8,
    opacity: f32,
}

impl Checkerboard {
    /// Create a non-reflective, fully weighted plane.
    pub fn new(height: f32, scale: f32) -> Self {
        Self {
            height,
            scale,
            reflectivity: 0,
            opacity: 1.0,
        }
    }

    /// Set the reflection weight (0..=255).
    pub fn with_reflectivity(mut self, reflectivity: u8) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Scale the view-dependent alpha, clamped to [0, 1].
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Height of the plane.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Pattern color at a point on the plane (alpha left opaque).
    pub fn pattern_color(&self, x: f32, z: f32) -> Color {
        let t = (7.0 + (x * self.scale).sin() * (z * self.scale).sin()) * 0.125;
        let c = Color::from_temperature(t);
        // Green-dominant ramp
        Color::new(c.g, c.r, c.b, c.a)
    }
}

impl Primitive for Checkerboard {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let d = ray.direction;
        if d.y == 0.0 {
            return None;
        }

        let t = (self.height - ray.origin.y) / d.y;
        if !t.is_finite() || t <= 0.0 {
            return None;
        }

        let point = Vec3::new(ray.origin.x + d.x * t, self.height, ray.origin.z + d.z * t);
        let alpha = (d.y.abs() * 255.0 * self.opacity) as u8;

        Some(Hit {
            distance: t,
            color: self.pattern_color(point.x, point.z).with_alpha(alpha),
            reflectivity: self.reflectivity,
            reflected: Ray::new(point, Vec3::new(d.x, -d.y, d.z)),
        })
    }
}
