//! Strata Core - primitives, colors and the layered intersection engine.
//!
//! This crate provides:
//!
//! - **Color**: packed RGBA8 with fixed-point alpha compositing
//! - **Primitive contract**: the `intersect` query every shape answers
//! - **Scene**: brute-force tracer that keeps the nearest hits along a ray,
//!   follows reflections and folds the hits front to back
//! - **Bundled primitives**: an infinite patterned plane and a sphere
//!
//! # Example
//!
//! ```
//! use strata_core::{Color, Ray, Scene, Sphere, Vec3};
//!
//! let mut scene = Scene::new();
//! scene.add(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::new(0, 0, 255, 255)));
//!
//! let color = scene.trace(&Ray::new(Vec3::ZERO, Vec3::Z));
//! assert_eq!(color.a, 255);
//! ```

pub mod checkerboard;
pub mod color;
pub mod primitive;
pub mod scene;
pub mod sphere;

// Re-export commonly used types
pub use checkerboard::Checkerboard;
pub use color::Color;
pub use primitive::{Hit, Primitive};
pub use scene::{
    PrimitiveId, Scene, DEFAULT_MAX_DEPTH, DEFAULT_REFLECTION_OFFSET, HIT_EPSILON, TOP_K,
};
pub use sphere::Sphere;

/// Re-export Vec3 and Ray from strata_math
pub use strata_math::{Ray, Vec3};
